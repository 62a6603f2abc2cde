use crate::normalize::{is_no, is_unset};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_FILES: &str = "Geen bestanden aanwezig";
pub const LEVEL_MISSING: &str = "Niveau niet ingevuld";
pub const RELEVANT_MISSING: &str = "Relevant niet ingevuld";
pub const NOT_RELEVANT: &str = "Bewijs is als niet relevant gemarkeerd";
pub const AUTHENTIC_MISSING: &str = "Authentiek niet ingevuld";
pub const NOT_AUTHENTIC: &str = "Bewijs is als niet authentiek gemarkeerd";
pub const CURRENT_MISSING: &str = "Actueel niet ingevuld";
pub const NOT_CURRENT: &str = "Bewijs is als niet actueel gemarkeerd";
pub const DATE_MISSING: &str = "Datum niet ingevuld";

/// Shown instead of the list when nothing is left to do.
pub const COMPLETE: &str = "Bewijs is compleet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A field nobody filled in.
    Warning,
    /// Missing evidence or an explicit `NEE`.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub severity: Severity,
    pub message: String,
}

impl Todo {
    fn warning(message: &str) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.to_string(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            severity: Severity::Error,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Remediation notes for one record, in a fixed order. An empty list means
/// the evidence is complete.
pub fn build_todos(record: &Record, has_files: bool) -> Vec<Todo> {
    let mut todos = Vec::new();

    if !has_files {
        todos.push(Todo::error(NO_FILES));
    }

    if is_unset(&record.level) {
        todos.push(Todo::warning(LEVEL_MISSING));
    }

    let yes_no_fields = [
        (&record.relevant, RELEVANT_MISSING, NOT_RELEVANT),
        (&record.authentic, AUTHENTIC_MISSING, NOT_AUTHENTIC),
        (&record.current, CURRENT_MISSING, NOT_CURRENT),
    ];
    for (value, missing, marked_no) in yes_no_fields {
        if is_unset(value) {
            todos.push(Todo::warning(missing));
        } else if is_no(value) {
            todos.push(Todo::error(marked_no));
        }
    }

    if is_unset(&record.date) {
        todos.push(Todo::warning(DATE_MISSING));
    }

    todos
}
