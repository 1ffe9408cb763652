//! Sync layer: pulls case rows from a shared spreadsheet, pushes the summary to the display webhook.

mod sheet;
pub use sheet::{SheetError, parse_rows};

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{DeliveryError, SheetSource, SourceError, WebhookSink};
