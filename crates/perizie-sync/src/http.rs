//! HTTP clients: spreadsheet CSV export (source) and display webhook (sink).

use perizie_core::{Payload, RawRow};
use thiserror::Error;
use tracing::{info, warn};

use crate::sheet::{SheetError, parse_rows};

pub const GOOGLE_DOCS_BASE: &str = "https://docs.google.com";

/// The sheet could not be fetched or read. Fatal for a run.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("sheet export returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

/// The webhook did not accept the payload. Reported, not fatal.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("webhook returned {status}: {body}")]
    Server { status: u16, body: String },
}

/// Reader for a publicly shared spreadsheet's CSV export.
pub struct SheetSource {
    client: reqwest::Client,
    base_url: String,
}

impl SheetSource {
    /// `base_url` is the document host, e.g. `https://docs.google.com` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn google() -> Self {
        Self::new(GOOGLE_DOCS_BASE.to_string())
    }

    /// CSV export URL for one tab (`gid`) of a document.
    pub fn export_url(&self, sheet_id: &str, gid: u64) -> String {
        format!(
            "{}/spreadsheets/d/{}/export?format=csv&gid={}",
            self.base_url, sheet_id, gid
        )
    }

    /// Download and parse the whole tab.
    pub async fn fetch(&self, sheet_id: &str, gid: u64) -> Result<Vec<RawRow>, SourceError> {
        let url = self.export_url(sheet_id, gid);

        info!(url = %url, "fetching sheet export");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await?;
        let rows = parse_rows(&text)?;
        info!(count = rows.len(), "read sheet rows");
        Ok(rows)
    }
}

/// Display webhook that receives the summary payload.
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// POST the payload as JSON. Returns the response status on 2xx.
    ///
    /// No retry: a failed delivery waits for the next scheduled run.
    pub async fn publish(&self, payload: &Payload) -> Result<u16, DeliveryError> {
        info!(
            cards = payload.merge_variables.perizie.len(),
            total = payload.merge_variables.num_perizie,
            "posting payload to webhook"
        );
        let resp = self.client.post(&self.url).json(payload).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "webhook rejected payload");
            return Err(DeliveryError::Server {
                status: status.as_u16(),
                body,
            });
        }

        info!(status = status.as_u16(), "payload delivered");
        Ok(status.as_u16())
    }
}
