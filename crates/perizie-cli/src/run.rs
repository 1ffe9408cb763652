//! Update pipeline: fetch sheet → process cases → publish to the display.

use std::process::ExitCode;

use chrono::NaiveDate;
use perizie_core::{ProcessConfig, PublishConfig, build_payload, process};
use perizie_sync::{SheetSource, WebhookSink};
use tracing::warn;

use crate::board::print_board;

/// Everything one run needs, resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub sheet_id: String,
    pub gid: u64,
    pub source_base: String,
    /// `None` disables publishing.
    pub webhook_url: Option<String>,
    pub process: ProcessConfig,
    pub publish: PublishConfig,
    pub today: NaiveDate,
    pub dry_run: bool,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Published,
    DryRun,
    PublishingDisabled,
    SourceUnavailable,
    EmptyResult,
    DeliveryFailed,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Outcome::Published | Outcome::DryRun | Outcome::PublishingDisabled => 0,
            Outcome::SourceUnavailable => 3,
            Outcome::EmptyResult => 4,
            Outcome::DeliveryFailed => 5,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Run the full update once. Step failures are reported here and folded into
/// the returned [`Outcome`]; only local faults (serialising a dry-run payload)
/// surface as errors.
pub async fn run_update(cfg: &RunConfig) -> anyhow::Result<Outcome> {
    // 1. Read the sheet.
    let source = SheetSource::new(cfg.source_base.clone());
    let rows = match source.fetch(&cfg.sheet_id, cfg.gid).await {
        Ok(rows) => rows,
        Err(e) => {
            println!("✗ Could not read the sheet: {e}");
            return Ok(Outcome::SourceUnavailable);
        }
    };
    println!("✓ Read {} rows from the sheet", rows.len());

    // 2. Resolve active cases.
    let records = process(&rows, cfg.today, &cfg.process);
    if records.is_empty() {
        println!("✗ No active cases found");
        return Ok(Outcome::EmptyResult);
    }
    println!("✓ Processed {} active cases", records.len());
    println!();
    print_board(&records, cfg.publish.max_records);
    println!();

    // 3. Publish.
    let payload = build_payload(&records, cfg.today, &cfg.publish);
    if cfg.dry_run {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(Outcome::DryRun);
    }

    let Some(url) = &cfg.webhook_url else {
        warn!("no webhook URL configured, skipping publish");
        println!("⚠ TRMNL_WEBHOOK_URL not configured, display not updated");
        return Ok(Outcome::PublishingDisabled);
    };

    match WebhookSink::new(url.clone()).publish(&payload).await {
        Ok(status) => {
            println!("✓ Sent to display: {status}");
            Ok(Outcome::Published)
        }
        Err(e) => {
            println!("✗ Could not update the display: {e}");
            Ok(Outcome::DeliveryFailed)
        }
    }
}
