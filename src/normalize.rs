use chrono::{Datelike, NaiveDateTime};
use std::fmt;

/// Display marker for "no value".
pub const UNSET: &str = "---";

/// Default dates written by the template when nobody filled the field in.
const SENTINEL_DATE_PREFIXES: [&str; 2] = ["2000-01-01", "1899-12-30"];
const SENTINEL_YEAR: i32 = 2000;

/// A raw spreadsheet value, detached from the workbook backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Excel error value such as `#N/A`; treated like an empty cell.
    Error(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Float(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Cell::Bool(true) => f.write_str("True"),
            Cell::Bool(false) => f.write_str("False"),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Cell::Error(e) => f.write_str(e),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// Turn a raw cell into the string shown to the user.
///
/// Empty cells, sentinel dates and placeholder values collapse to [`UNSET`];
/// ISO-shaped dates are rewritten to `DD-MM-YYYY`. Never fails.
pub fn normalize(cell: &Cell) -> String {
    match cell {
        Cell::Empty | Cell::Error(_) => UNSET.to_string(),
        Cell::DateTime(dt) if dt.year() == SENTINEL_YEAR || dt.year() < 1900 => UNSET.to_string(),
        Cell::DateTime(dt) => dt.format("%d-%m-%Y").to_string(),
        other => normalize_str(&other.to_string()),
    }
}

/// String half of [`normalize`], also used for values already stringified.
pub fn normalize_str(raw: &str) -> String {
    let s = raw.trim();

    if SENTINEL_DATE_PREFIXES.iter().any(|prefix| s.starts_with(prefix)) {
        return UNSET.to_string();
    }

    if let Some(date) = iso_to_day_month_year(s) {
        return date;
    }

    if s.to_lowercase().contains("dropdown") || s == "0" {
        return UNSET.to_string();
    }

    s.to_string()
}

/// `YYYY-MM-DD...` becomes `DD-MM-YYYY`; anything else is `None`.
fn iso_to_day_month_year(s: &str) -> Option<String> {
    let head: Vec<char> = s.chars().take(10).collect();
    if head.len() < 10 || head[4] != '-' || head[7] != '-' {
        return None;
    }

    let head: String = head.into_iter().collect();
    let mut parts = head.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d), None) => Some(format!("{}-{}-{}", d, m, y)),
        _ => None,
    }
}

pub fn is_unset(value: &str) -> bool {
    value == UNSET
}

/// Explicit "no" in the REA columns.
pub fn is_no(value: &str) -> bool {
    value.eq_ignore_ascii_case("NEE")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Cell {
        Cell::DateTime(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_empty_and_error_cells_are_unset() {
        assert_eq!(normalize(&Cell::Empty), UNSET);
        assert_eq!(normalize(&Cell::Error("#N/A".into())), UNSET);
    }

    #[test]
    fn test_date_cells() {
        assert_eq!(normalize(&date(2000, 1, 1)), UNSET);
        assert_eq!(normalize(&date(2000, 6, 15)), UNSET);
        assert_eq!(normalize(&date(2023, 5, 17)), "17-05-2023");
        // Excel's day zero, however the reader renders it
        assert_eq!(normalize(&date(1899, 12, 30)), UNSET);
        assert_eq!(normalize(&date(1899, 12, 31)), UNSET);
        assert_eq!(normalize(&date(1900, 1, 1)), "01-01-1900");
    }

    #[test]
    fn test_sentinel_date_strings() {
        assert_eq!(normalize(&"1899-12-30 00:00:00".into()), UNSET);
        assert_eq!(normalize(&"2000-01-01".into()), UNSET);
    }

    #[test]
    fn test_iso_strings_are_reformatted() {
        assert_eq!(normalize(&"2023-05-17".into()), "17-05-2023");
        assert_eq!(normalize(&"  2023-05-17 13:45:00 ".into()), "17-05-2023");
    }

    #[test]
    fn test_malformed_iso_shape_falls_through() {
        // four dash-separated parts in the first ten characters
        assert_eq!(normalize(&"2023-05-1-x".into()), "2023-05-1-x");
        assert_eq!(normalize(&"abcd-e-f".into()), "abcd-e-f");
    }

    #[test]
    fn test_placeholders_are_unset() {
        assert_eq!(normalize(&"0".into()), UNSET);
        assert_eq!(normalize(&Cell::Int(0)), UNSET);
        assert_eq!(normalize(&Cell::Float(0.0)), UNSET);
        assert_eq!(normalize(&"Dropdown".into()), UNSET);
        assert_eq!(normalize(&"-- kies uit DROPDOWN --".into()), UNSET);
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(normalize(&" Beleidsplan ".into()), "Beleidsplan");
        assert_eq!(normalize(&Cell::Float(3.0)), "3");
        assert_eq!(normalize(&Cell::Float(2.5)), "2.5");
        assert_eq!(normalize(&Cell::Bool(true)), "True");
        assert_eq!(normalize(&"10".into()), "10");
    }

    #[test]
    fn test_multibyte_input_does_not_panic() {
        assert_eq!(normalize(&"é".into()), "é");
        assert_eq!(normalize(&"éééé-éé-éé".into()), "éé-éé-éééé");
        assert_eq!(normalize(&"日本語テキスト".into()), "日本語テキスト");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let inputs = [
            "2023-05-17",
            "2023-05-17T00:00:00",
            "1899-12-30",
            "Dropdown",
            "0",
            "  JA ",
            "nee",
            "2023-05-1-x",
            "abcd-ef-gh-ij",
            "",
            "17-05-2023",
        ];
        for input in inputs {
            let once = normalize_str(input);
            assert_eq!(normalize_str(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_rea_helpers() {
        assert!(is_unset(UNSET));
        assert!(!is_unset("JA"));
        assert!(is_no("NEE"));
        assert!(is_no("nee"));
        assert!(!is_no("JA"));
    }
}
