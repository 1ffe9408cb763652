mod board;
mod run;

use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use perizie_core::config::{DEFAULT_MAX_RECORDS, DEFAULT_URGENCY_THRESHOLD};
use perizie_core::{
    MissingStyle, OrderPolicy, ProcessConfig, PublishConfig, UrgencyPolicy, parse_date,
};
use perizie_sync::http::GOOGLE_DOCS_BASE;

use run::{RunConfig, run_update};

/// Value left in deployment templates when the webhook was never filled in.
const WEBHOOK_PLACEHOLDER: &str = "YOUR_WEBHOOK_URL_HERE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum UrgencyArg {
    /// Within the threshold before or after today.
    Absolute,
    /// Only upcoming dates within the threshold.
    FutureOnly,
}

impl From<UrgencyArg> for UrgencyPolicy {
    fn from(arg: UrgencyArg) -> Self {
        match arg {
            UrgencyArg::Absolute => UrgencyPolicy::Absolute,
            UrgencyArg::FutureOnly => UrgencyPolicy::FutureOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OrderArg {
    /// Nearest upcoming milestone first.
    Urgency,
    /// Sheet row order.
    Source,
}

impl From<OrderArg> for OrderPolicy {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Urgency => OrderPolicy::Urgency,
            OrderArg::Source => OrderPolicy::Source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum MissingArg {
    /// Show "N/A" and an empty date.
    Marker,
    /// Leave the fields out of the card.
    Omit,
}

impl From<MissingArg> for MissingStyle {
    fn from(arg: MissingArg) -> Self {
        match arg {
            MissingArg::Marker => MissingStyle::Marker,
            MissingArg::Omit => MissingStyle::Omit,
        }
    }
}

/// Push active court appraisal cases from a shared sheet to an e-ink display.
#[derive(Parser, Debug)]
#[command(name = "perizie", version)]
struct Cli {
    /// Spreadsheet document id.
    #[arg(long, env = "GOOGLE_SHEET_ID")]
    sheet_id: String,

    /// Tab id within the spreadsheet.
    #[arg(long, env = "GOOGLE_SHEET_GID", default_value_t = 0)]
    gid: u64,

    /// Host serving the CSV export.
    #[arg(long, env = "PERIZIE_SOURCE_BASE", default_value = GOOGLE_DOCS_BASE)]
    source_base: String,

    /// Display webhook; publishing is skipped when unset.
    #[arg(long, env = "TRMNL_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Days around today within which a milestone is urgent.
    #[arg(long, env = "PERIZIE_URGENCY_THRESHOLD", default_value_t = DEFAULT_URGENCY_THRESHOLD)]
    threshold: i64,

    #[arg(long, env = "PERIZIE_URGENCY_POLICY", value_enum, default_value_t = UrgencyArg::Absolute)]
    urgency_policy: UrgencyArg,

    #[arg(long, env = "PERIZIE_ORDER", value_enum, default_value_t = OrderArg::Urgency)]
    order: OrderArg,

    /// Maximum number of cards sent to the display.
    #[arg(long, env = "PERIZIE_MAX_RECORDS", default_value_t = DEFAULT_MAX_RECORDS)]
    max_records: usize,

    /// Rendering of milestones without a valid date.
    #[arg(long, env = "PERIZIE_MISSING", value_enum, default_value_t = MissingArg::Marker)]
    missing: MissingArg,

    /// Run date (dd/mm/yyyy or yyyy-mm-dd); defaults to the local date.
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Print the payload instead of sending it.
    #[arg(long)]
    dry_run: bool,
}

fn parse_today(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("expected dd/mm/yyyy or yyyy-mm-dd, got {s:?}"))
}

impl Cli {
    fn into_run_config(self) -> anyhow::Result<RunConfig> {
        let process = ProcessConfig {
            threshold: self.threshold,
            urgency: self.urgency_policy.into(),
            order: self.order.into(),
            ..Default::default()
        };
        process.validate()?;

        let publish = PublishConfig {
            max_records: self.max_records,
            missing: self.missing.into(),
        };
        publish.validate()?;

        let webhook_url = self
            .webhook_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty() && u != WEBHOOK_PLACEHOLDER);

        Ok(RunConfig {
            sheet_id: self.sheet_id,
            gid: self.gid,
            source_base: self.source_base,
            webhook_url,
            process,
            publish,
            today: self.today.unwrap_or_else(|| Local::now().date_naive()),
            dry_run: self.dry_run,
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("perizie v{}", env!("CARGO_PKG_VERSION"));

    let cfg = match Cli::parse().into_run_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("✗ Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("=== Perizie: display update ===");
    println!();
    let outcome = match run_update(&cfg).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("✗ {e:#}");
            return ExitCode::FAILURE;
        }
    };
    println!();
    println!("=== Done ({outcome:?}) ===");
    outcome.exit_code()
}
