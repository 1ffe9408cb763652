//! Milestone date parsing, offsets, and Italian display labels.
//!
//! Sheet cells carry either `dd/mm/yyyy` (as typed by hand) or `yyyy-mm-dd`
//! (as produced by the spreadsheet's own date cells). Anything else is treated
//! as no date at all.

use chrono::{Datelike, NaiveDate, Weekday};

const DAY_FIRST: &str = "%d/%m/%Y";
const ISO: &str = "%Y-%m-%d";

const WEEKDAYS_IT: [&str; 7] = [
    "Lunedì",
    "Martedì",
    "Mercoledì",
    "Giovedì",
    "Venerdì",
    "Sabato",
    "Domenica",
];

const MONTHS_IT: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

/// Parse a cell as `dd/mm/yyyy`, falling back to `yyyy-mm-dd`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    // chrono's `%Y` takes any digit count; only four-digit years are accepted.
    let day_first = s
        .rsplit_once('/')
        .filter(|(_, year)| is_four_digit_year(year))
        .and_then(|_| NaiveDate::parse_from_str(s, DAY_FIRST).ok());
    day_first.or_else(|| {
        s.split_once('-')
            .filter(|(year, _)| is_four_digit_year(year))
            .and_then(|_| NaiveDate::parse_from_str(s, ISO).ok())
    })
}

fn is_four_digit_year(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Render a date as `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DAY_FIRST).to_string()
}

/// Whole days from `today` to `date`.
pub fn day_offset(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

/// Sign-prefixed day count; zero renders as plain `"0"`.
pub fn format_offset(days: i64) -> String {
    if days == 0 {
        "0".to_string()
    } else {
        format!("{days:+}")
    }
}

/// Italian long-form label, e.g. `"Venerdì 16 ottobre 2026"`.
pub fn italian_label(date: NaiveDate) -> String {
    format!(
        "{} {:02} {} {}",
        weekday_it(date.weekday()),
        date.day(),
        MONTHS_IT[date.month0() as usize],
        date.year()
    )
}

fn weekday_it(day: Weekday) -> &'static str {
    WEEKDAYS_IT[day.num_days_from_monday() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_day_first() {
        assert_eq!(parse_date("01/01/2030"), Some(ymd(2030, 1, 1)));
        assert_eq!(parse_date("31/12/2024"), Some(ymd(2024, 12, 31)));
    }

    #[test]
    fn falls_back_to_iso() {
        assert_eq!(parse_date("2025-03-14"), Some(ymd(2025, 3, 14)));
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_date("  2025-03-14 "), Some(ymd(2025, 3, 14)));
    }

    #[test]
    fn rejects_other_forms() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("14.03.2025"), None);
        assert_eq!(parse_date("31/02/2025"), None);
        assert_eq!(parse_date("2025/03/14"), None);
    }

    #[test]
    fn rejects_short_years() {
        assert_eq!(parse_date("14/03/25"), None);
        assert_eq!(parse_date("25-03-14"), None);
        assert_eq!(parse_date("1/1/30"), None);
        assert_eq!(parse_date("14/03/02025"), None);
        assert_eq!(parse_date("1/1/2030"), Some(ymd(2030, 1, 1)));
    }

    #[test]
    fn format_then_parse_is_same_day() {
        for d in [ymd(2025, 1, 1), ymd(2024, 2, 29), ymd(1999, 12, 31), ymd(2030, 7, 4)] {
            assert_eq!(parse_date(&format_date(d)), Some(d));
        }
    }

    #[test]
    fn format_pads_day_and_month() {
        assert_eq!(format_date(ymd(2025, 3, 4)), "04/03/2025");
    }

    #[test]
    fn offsets_keep_sign() {
        let today = ymd(2025, 1, 1);
        assert_eq!(day_offset(ymd(2030, 1, 1), today), 1826);
        assert_eq!(day_offset(ymd(2024, 12, 29), today), -3);
        assert_eq!(day_offset(today, today), 0);
    }

    #[test]
    fn offset_rendering() {
        assert_eq!(format_offset(0), "0");
        assert_eq!(format_offset(5), "+5");
        assert_eq!(format_offset(-12), "-12");
    }

    #[test]
    fn italian_label_uses_local_names() {
        assert_eq!(italian_label(ymd(2026, 10, 16)), "Venerdì 16 ottobre 2026");
        assert_eq!(italian_label(ymd(2025, 1, 5)), "Domenica 05 gennaio 2025");
        assert_eq!(italian_label(ymd(2024, 12, 30)), "Lunedì 30 dicembre 2024");
    }
}
