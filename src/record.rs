use crate::normalize::{normalize, normalize_str, Cell, UNSET};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Identifier column plus the nine positional data columns.
pub const RECORD_COLUMNS: usize = 10;

/// One evidence item as entered in the spreadsheet. Every field except `id`
/// holds a normalized display value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub criteria: String,
    #[serde(rename = "type")]
    pub evidence_type: String,
    pub context: String,
    pub description: String,
    pub level: String,
    pub relevant: String,
    pub authentic: String,
    pub current: String,
    pub date: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RowError {
    #[error("row has {found} columns, expected at least {expected}")]
    TooShort { found: usize, expected: usize },
}

impl Record {
    /// A record with every field unset; handy as a base for tests and fixtures.
    pub fn unset(id: &str) -> Self {
        Self {
            id: id.to_string(),
            criteria: UNSET.to_string(),
            evidence_type: UNSET.to_string(),
            context: UNSET.to_string(),
            description: UNSET.to_string(),
            level: UNSET.to_string(),
            relevant: UNSET.to_string(),
            authentic: UNSET.to_string(),
            current: UNSET.to_string(),
            date: UNSET.to_string(),
        }
    }

    pub fn from_row(id: String, row: &[Cell]) -> Result<Self, RowError> {
        if row.len() < RECORD_COLUMNS {
            return Err(RowError::TooShort {
                found: row.len(),
                expected: RECORD_COLUMNS,
            });
        }

        Ok(Self {
            id,
            criteria: normalize_criteria(&row[1]),
            evidence_type: normalize(&row[2]),
            context: normalize(&row[3]),
            description: normalize(&row[4]),
            level: normalize(&row[5]),
            relevant: normalize(&row[6]),
            authentic: normalize(&row[7]),
            current: normalize(&row[8]),
            date: normalize(&row[9]),
        })
    }

    /// The REA check fields: level, relevant, authentic, current and date.
    pub fn rea_fields(&self) -> [&str; 5] {
        [
            self.level.as_str(),
            self.relevant.as_str(),
            self.authentic.as_str(),
            self.current.as_str(),
            self.date.as_str(),
        ]
    }
}

/// Identifier from the first column: exactly one ASCII letter, uppercased.
pub fn parse_identifier(cell: &Cell) -> Option<String> {
    let candidate = cell.to_string().to_uppercase();
    let candidate = candidate.trim();

    let mut chars = candidate.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_string()),
        _ => None,
    }
}

/// Criteria cells read like `"3.2 Some criterion"`; only the part after the
/// first `.` is shown, and a value without a `.` counts as unset.
fn normalize_criteria(cell: &Cell) -> String {
    let raw = cell.to_string();
    match raw.split_once('.') {
        Some((_, rest)) => normalize_str(rest),
        None => UNSET.to_string(),
    }
}

/// Build records from data rows, in sheet order. Rows without a single-letter
/// identifier are skipped silently; malformed rows are logged and skipped.
pub fn extract<R: AsRef<[Cell]>>(rows: &[R]) -> Vec<Record> {
    let mut records = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let Some(id) = row.first().and_then(parse_identifier) else {
            continue;
        };

        match Record::from_row(id.clone(), row) {
            Ok(record) => {
                debug!("Row {}: extracted record {}", index, record.id);
                records.push(record);
            }
            Err(err) => {
                warn!("Row error ({}) at data row {}: {}", id, index, err);
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(id: &str, rest: [&str; 9]) -> Vec<Cell> {
        let mut cells = vec![Cell::from(id)];
        cells.extend(rest.iter().map(|s| {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::from(*s)
            }
        }));
        cells
    }

    #[test]
    fn test_identifier_filter() {
        assert_eq!(parse_identifier(&"c".into()), Some("C".to_string()));
        assert_eq!(parse_identifier(&" d ".into()), Some("D".to_string()));
        assert_eq!(parse_identifier(&"AB".into()), None);
        assert_eq!(parse_identifier(&"1".into()), None);
        assert_eq!(parse_identifier(&"".into()), None);
        assert_eq!(parse_identifier(&"é".into()), None);
        assert_eq!(parse_identifier(&Cell::Empty), None);
        assert_eq!(parse_identifier(&Cell::Int(7)), None);
    }

    #[test]
    fn test_extract_full_row() {
        let rows = vec![row(
            "a",
            [
                "1.1 Beleid en visie",
                "Policy",
                "General",
                "Beleidsplan 2023",
                "3",
                "JA",
                "JA",
                "nee",
                "2023-05-17 00:00:00",
            ],
        )];

        let records = extract(&rows);
        assert_eq!(
            records,
            vec![Record {
                id: "A".to_string(),
                criteria: "1 Beleid en visie".to_string(),
                evidence_type: "Policy".to_string(),
                context: "General".to_string(),
                description: "Beleidsplan 2023".to_string(),
                level: "3".to_string(),
                relevant: "JA".to_string(),
                authentic: "JA".to_string(),
                current: "nee".to_string(),
                date: "17-05-2023".to_string(),
            }]
        );
    }

    #[test]
    fn test_criteria_without_dot_is_unset() {
        let rows = vec![row("b", ["Beleid", "", "", "", "", "", "", "", ""])];
        let records = extract(&rows);
        assert_eq!(records[0].criteria, UNSET);
        assert_eq!(records[0], Record::unset("B"));
    }

    #[test]
    fn test_skips_non_identifier_rows_and_keeps_order() {
        let rows = vec![
            row("", ["", "", "", "", "", "", "", "", ""]),
            row("B", ["", "Policy", "", "", "", "", "", "", ""]),
            row("Toelichting", ["", "", "", "", "", "", "", "", ""]),
            row("1", ["", "", "", "", "", "", "", "", ""]),
            row("a", ["", "", "Ctx", "", "", "", "", "", ""]),
        ];
        let ids: Vec<String> = extract(&rows).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_short_row_is_skipped_without_aborting() {
        let rows = vec![
            vec![Cell::from("A"), Cell::from("1.x")],
            row("B", ["", "Policy", "", "", "", "", "", "", ""]),
        ];
        let records = extract(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "B");
    }

    #[test]
    fn test_from_row_reports_short_row() {
        let err = Record::from_row("A".into(), &vec![Cell::Empty; 4]).unwrap_err();
        assert_eq!(
            err,
            RowError::TooShort {
                found: 4,
                expected: RECORD_COLUMNS
            }
        );
    }
}
