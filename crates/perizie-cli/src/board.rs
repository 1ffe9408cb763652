//! Terminal summary of the processed cases.
//!
//! One line per case with the four milestone offsets; urgent ones are
//! suffixed with `!`.

use perizie_core::{Milestone, ProcessedRecord, format_offset};

const NUMBER_WIDTH: usize = 12;
const COURT_WIDTH: usize = 18;

// ── Public API ──

/// Print every record, marking the first `shown` as the ones sent to the display.
pub fn print_board(records: &[ProcessedRecord], shown: usize) {
    println!(
        "  {:<nw$} {:<cw$} {}",
        "Numero",
        "Tribunale",
        Milestone::ALL
            .iter()
            .map(|m| format!("{:<9}", m.wire_key()))
            .collect::<String>(),
        nw = NUMBER_WIDTH,
        cw = COURT_WIDTH,
    );
    for (i, rec) in records.iter().enumerate() {
        let marker = if i < shown { '*' } else { ' ' };
        println!("{marker} {}", board_line(rec));
    }
}

// ── Line rendering ──

fn board_line(rec: &ProcessedRecord) -> String {
    let cells: String = Milestone::ALL
        .iter()
        .map(|&m| format!("{:<9}", cell(rec, m)))
        .collect();
    format!(
        "{:<nw$} {:<cw$} {}",
        truncate(&rec.number, NUMBER_WIDTH),
        truncate(&rec.court, COURT_WIDTH),
        cells.trim_end(),
        nw = NUMBER_WIDTH,
        cw = COURT_WIDTH,
    )
}

fn cell(rec: &ProcessedRecord, m: Milestone) -> String {
    let status = rec.milestone(m);
    match status.offset {
        None => "-".to_string(),
        Some(days) if status.urgent => format!("{}!", format_offset(days)),
        Some(days) => format_offset(days),
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}
