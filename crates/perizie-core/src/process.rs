//! Record processor: active-case filter and milestone resolution.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::{OrderPolicy, ProcessConfig};
use crate::dates::{day_offset, parse_date};
use crate::record::{
    COL_COURT, COL_JUDGE, COL_NUMBER, COL_PARTIES, COL_STATUS, COL_VENUE, Milestone,
    MilestoneStatus, NO_UPCOMING_RANK, ProcessedRecord, RawRow,
};

/// Turn sheet rows into processed records for active cases.
///
/// Rows whose status is not exactly `config.active_status` are dropped. A date
/// cell that does not parse only blanks that milestone; the row is kept.
pub fn process(rows: &[RawRow], today: NaiveDate, config: &ProcessConfig) -> Vec<ProcessedRecord> {
    let mut records: Vec<ProcessedRecord> = rows
        .iter()
        .filter(|row| row.get_or_empty(COL_STATUS) == config.active_status)
        .map(|row| process_row(row, today, config))
        .collect();

    if config.order == OrderPolicy::Urgency {
        // Stable: equal ranks keep sheet order.
        records.sort_by_key(|r| r.rank);
    }

    info!(
        rows = rows.len(),
        active = records.len(),
        order = ?config.order,
        "processed case records"
    );
    records
}

fn process_row(row: &RawRow, today: NaiveDate, config: &ProcessConfig) -> ProcessedRecord {
    let number = row.get_or_empty(COL_NUMBER).to_string();
    let milestones = Milestone::ALL.map(|m| {
        let raw = row.get_or_empty(m.column());
        let date = parse_date(raw);
        if date.is_none() && !raw.trim().is_empty() {
            debug!(case = %number, column = m.column(), value = raw, "unparsable milestone date");
        }
        let offset = date.map(|d| day_offset(d, today));
        MilestoneStatus {
            date,
            offset,
            urgent: config.urgency.is_urgent(offset, config.threshold),
        }
    });

    let any_urgent = milestones.iter().any(|s| s.urgent);
    let rank = milestones
        .iter()
        .filter_map(|s| s.offset)
        .filter(|&d| d > 0)
        .min()
        .unwrap_or(NO_UPCOMING_RANK);

    ProcessedRecord {
        number,
        court: row.get_or_empty(COL_COURT).to_string(),
        judge: row.get_or_empty(COL_JUDGE).to_string(),
        venue: row.get_or_empty(COL_VENUE).to_string(),
        parties: row.get_or_empty(COL_PARTIES).to_string(),
        milestones,
        any_urgent,
        rank,
    }
}
