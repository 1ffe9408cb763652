//! CSV export parsing.

use perizie_core::RawRow;
use perizie_core::record::REQUIRED_COLUMNS;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("sheet is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Parse a CSV export with a header row into one [`RawRow`] per data line.
///
/// Header names are trimmed. Rows shorter than the header simply lack the
/// trailing columns.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|&&col| !headers.iter().any(|h| h == col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SheetError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(headers.iter().zip(record.iter()).collect::<RawRow>());
    }

    info!(rows = rows.len(), columns = ?headers, "parsed sheet export");
    Ok(rows)
}
