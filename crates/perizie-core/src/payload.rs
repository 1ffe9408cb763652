//! Webhook payload consumed by the e-ink display template.
//!
//! Key names are fixed by the template and must not change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{MISSING_MARKER, MissingStyle, PublishConfig};
use crate::dates::{format_date, format_offset, italian_label};
use crate::record::{Milestone, MilestoneStatus, ProcessedRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub merge_variables: MergeVariables,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeVariables {
    pub data_aggiornamento: String,
    /// Active cases before truncation.
    pub num_perizie: usize,
    pub perizie: Vec<PublishedRecord>,
}

/// One card on the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedRecord {
    pub numero: String,
    pub tribunale: String,
    pub giudice: String,
    pub luogo_iop: String,
    pub parti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub giur: Option<String>,
    pub giur_urg: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub giur_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inizio: Option<String>,
    pub inizio_urg: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inizio_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bozza: Option<String>,
    pub bozza_urg: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bozza_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep: Option<String>,
    pub dep_urg: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep_data: Option<String>,
    pub any_urgent: bool,
}

/// Rendered `(offset, date)` pair for one milestone.
fn render(status: &MilestoneStatus, missing: MissingStyle) -> (Option<String>, Option<String>) {
    match (status.offset, status.date, missing) {
        (Some(days), Some(date), _) => (Some(format_offset(days)), Some(format_date(date))),
        (_, _, MissingStyle::Marker) => (Some(MISSING_MARKER.to_string()), Some(String::new())),
        (_, _, MissingStyle::Omit) => (None, None),
    }
}

impl PublishedRecord {
    pub fn from_processed(rec: &ProcessedRecord, missing: MissingStyle) -> Self {
        let [giur, inizio, bozza, dep] = Milestone::ALL.map(|m| rec.milestone(m));
        let (giur_off, giur_data) = render(giur, missing);
        let (inizio_off, inizio_data) = render(inizio, missing);
        let (bozza_off, bozza_data) = render(bozza, missing);
        let (dep_off, dep_data) = render(dep, missing);

        Self {
            numero: rec.number.clone(),
            tribunale: rec.court.clone(),
            giudice: rec.judge.clone(),
            luogo_iop: rec.venue.clone(),
            parti: rec.parties.clone(),
            giur: giur_off,
            giur_urg: giur.urgent,
            giur_data,
            inizio: inizio_off,
            inizio_urg: inizio.urgent,
            inizio_data,
            bozza: bozza_off,
            bozza_urg: bozza.urgent,
            bozza_data,
            dep: dep_off,
            dep_urg: dep.urgent,
            dep_data,
            any_urgent: rec.any_urgent,
        }
    }
}

/// Assemble the payload: date label, total count, and at most
/// `config.max_records` cards in the given order.
pub fn build_payload(records: &[ProcessedRecord], today: NaiveDate, config: &PublishConfig) -> Payload {
    let perizie = records
        .iter()
        .take(config.max_records)
        .map(|r| PublishedRecord::from_processed(r, config.missing))
        .collect();

    Payload {
        merge_variables: MergeVariables {
            data_aggiornamento: italian_label(today),
            num_perizie: records.len(),
            perizie,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OrderPolicy, ProcessConfig};
    use crate::process::process;
    use crate::record::{COL_COURT, COL_NUMBER, COL_STATUS, RawRow};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn active_row(number: &str, oath: &str) -> RawRow {
        [
            (COL_NUMBER, number),
            (COL_COURT, "Milano"),
            (COL_STATUS, "Attiva"),
            (Milestone::Oath.column(), oath),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn truncates_but_counts_all() {
        let today = ymd(2025, 1, 1);
        let rows: Vec<_> = (0..10).map(|i| active_row(&format!("{i}/2025"), "")).collect();
        let records = process(
            &rows,
            today,
            &ProcessConfig {
                order: OrderPolicy::Source,
                ..Default::default()
            },
        );
        let cfg = PublishConfig {
            max_records: 5,
            ..Default::default()
        };
        let payload = build_payload(&records, today, &cfg);
        assert_eq!(payload.merge_variables.num_perizie, 10);
        let numbers: Vec<_> = payload
            .merge_variables
            .perizie
            .iter()
            .map(|p| p.numero.as_str())
            .collect();
        assert_eq!(numbers, ["0/2025", "1/2025", "2/2025", "3/2025", "4/2025"]);
    }

    #[test]
    fn wire_shape_with_markers() {
        let today = ymd(2025, 1, 1);
        let records = process(&[active_row("12/2024", "01/01/2030")], today, &ProcessConfig::default());
        let payload = build_payload(&records, today, &PublishConfig::default());
        let json = serde_json::to_value(&payload).unwrap();

        let vars = &json["merge_variables"];
        assert_eq!(vars["data_aggiornamento"], "Mercoledì 01 gennaio 2025");
        assert_eq!(vars["num_perizie"], 1);

        let card = &vars["perizie"][0];
        assert_eq!(card["numero"], "12/2024");
        assert_eq!(card["tribunale"], "Milano");
        assert_eq!(card["giudice"], "");
        assert_eq!(card["luogo_iop"], "");
        assert_eq!(card["giur"], "+1826");
        assert_eq!(card["giur_urg"], false);
        assert_eq!(card["giur_data"], "01/01/2030");
        for key in ["inizio", "bozza", "dep"] {
            assert_eq!(card[key], "N/A");
            assert_eq!(card[format!("{key}_data")], "");
            assert_eq!(card[format!("{key}_urg")], false);
        }
        assert_eq!(card["any_urgent"], false);
    }

    #[test]
    fn two_digit_year_renders_as_missing() {
        let today = ymd(2025, 1, 1);
        let records = process(&[active_row("3/2025", "14/03/25")], today, &ProcessConfig::default());
        assert_eq!(records[0].milestone(Milestone::Oath).offset, None);

        let payload = build_payload(&records, today, &PublishConfig::default());
        let card = &payload.merge_variables.perizie[0];
        assert_eq!(card.giur.as_deref(), Some("N/A"));
        assert_eq!(card.giur_data.as_deref(), Some(""));
        assert!(!card.giur_urg);
    }

    #[test]
    fn omit_style_drops_missing_keys() {
        let today = ymd(2025, 1, 1);
        let records = process(&[active_row("1", "01/01/2025")], today, &ProcessConfig::default());
        let cfg = PublishConfig {
            missing: MissingStyle::Omit,
            ..Default::default()
        };
        let payload = build_payload(&records, today, &cfg);
        let json = serde_json::to_value(&payload).unwrap();
        let card = json["merge_variables"]["perizie"][0].as_object().unwrap();

        assert_eq!(card["giur"], "0");
        assert_eq!(card["giur_urg"], true);
        assert_eq!(card["any_urgent"], true);
        assert!(!card.contains_key("inizio"));
        assert!(!card.contains_key("inizio_data"));
        assert!(card.contains_key("inizio_urg"));
    }

    #[test]
    fn empty_records_yield_empty_list() {
        let payload = build_payload(&[], ymd(2025, 1, 1), &PublishConfig::default());
        assert_eq!(payload.merge_variables.num_perizie, 0);
        assert!(payload.merge_variables.perizie.is_empty());
    }
}
