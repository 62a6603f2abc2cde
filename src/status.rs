use crate::normalize::{is_no, is_unset};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Entry and evidence present, REA check complete.
    Good,
    /// Evidence present but no spreadsheet entry.
    Wrong,
    /// Spreadsheet entry without evidence.
    Empty,
    /// Neither entry nor evidence.
    NoData,
    /// Entry and evidence present, but an REA field is unset or `NEE`.
    Incomplete,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Good,
        Status::Incomplete,
        Status::Empty,
        Status::Wrong,
        Status::NoData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Good => "GOOD",
            Status::Wrong => "WRONG",
            Status::Empty => "EMPTY",
            Status::NoData => "NODATA",
            Status::Incomplete => "INCOMPLETE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The spreadsheet counts as filled in when either type or context is set.
pub fn has_entry(record: &Record) -> bool {
    !is_unset(&record.evidence_type) || !is_unset(&record.context)
}

pub fn classify(record: &Record, files: &[String]) -> Status {
    match (has_entry(record), !files.is_empty()) {
        (true, true) => {
            let rea_failed = record
                .rea_fields()
                .iter()
                .any(|value| is_unset(value) || is_no(value));
            if rea_failed {
                Status::Incomplete
            } else {
                Status::Good
            }
        }
        (true, false) => Status::Empty,
        (false, true) => Status::Wrong,
        (false, false) => Status::NoData,
    }
}
