//! Case records as read from the spreadsheet and as derived for the display.

use std::collections::HashMap;

use chrono::NaiveDate;

pub const COL_NUMBER: &str = "Numero_Perizia";
pub const COL_COURT: &str = "Tribunale";
pub const COL_JUDGE: &str = "Giudice";
pub const COL_VENUE: &str = "Luogo_IOP";
pub const COL_PARTIES: &str = "Parti";
pub const COL_STATUS: &str = "Stato";

/// Columns a sheet must carry for a run to proceed.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_NUMBER,
    COL_COURT,
    COL_STATUS,
    Milestone::Oath.column(),
    Milestone::Start.column(),
    Milestone::Draft.column(),
    Milestone::Filing.column(),
];

/// Rank assigned to a record with no milestone strictly in the future.
pub const NO_UPCOMING_RANK: i64 = 999;

/// One spreadsheet row: trimmed column name to raw cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell, trimming the column name.
    pub fn insert(&mut self, column: &str, value: impl Into<String>) {
        self.fields.insert(column.trim().to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Cell value, or `""` when the column is absent.
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k.as_ref(), v);
        }
        row
    }
}

/// The four tracked dates of a case, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    /// Expert's oath (giuramento).
    Oath,
    /// Start of operations (inizio operazioni peritali).
    Start,
    /// Draft report (bozza).
    Draft,
    /// Final filing (deposito).
    Filing,
}

impl Milestone {
    pub const ALL: [Milestone; 4] = [
        Milestone::Oath,
        Milestone::Start,
        Milestone::Draft,
        Milestone::Filing,
    ];

    /// Source column holding this milestone's date.
    pub const fn column(self) -> &'static str {
        match self {
            Milestone::Oath => "Data_Giuramento",
            Milestone::Start => "Data_Inizio",
            Milestone::Draft => "Data_Bozza",
            Milestone::Filing => "Data_Deposito",
        }
    }

    /// Key prefix consumed by the display template.
    pub const fn wire_key(self) -> &'static str {
        match self {
            Milestone::Oath => "giur",
            Milestone::Start => "inizio",
            Milestone::Draft => "bozza",
            Milestone::Filing => "dep",
        }
    }

    const fn index(self) -> usize {
        match self {
            Milestone::Oath => 0,
            Milestone::Start => 1,
            Milestone::Draft => 2,
            Milestone::Filing => 3,
        }
    }
}

/// Derived state of one milestone relative to the run date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MilestoneStatus {
    /// Parsed calendar date; `None` when the cell did not parse.
    pub date: Option<NaiveDate>,
    /// Days from the run date (positive = future).
    pub offset: Option<i64>,
    pub urgent: bool,
}

/// An active case with its milestones resolved against the run date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedRecord {
    pub number: String,
    pub court: String,
    pub judge: String,
    pub venue: String,
    pub parties: String,
    pub milestones: [MilestoneStatus; 4],
    pub any_urgent: bool,
    /// Smallest strictly positive offset, or [`NO_UPCOMING_RANK`].
    pub rank: i64,
}

impl ProcessedRecord {
    pub fn milestone(&self, m: Milestone) -> &MilestoneStatus {
        &self.milestones[m.index()]
    }
}
