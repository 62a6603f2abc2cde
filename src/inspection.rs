use crate::evidence;
use crate::record::Record;
use crate::status::{classify, Status};
use crate::todo::{build_todos, Todo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Everything the front-end needs for one identifier: the card shows `id`
/// and `status`, the detail view the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    pub record: Record,
    pub files: Vec<String>,
    pub status: Status,
    pub todos: Vec<Todo>,
}

impl Inspection {
    pub fn new(record: Record, files: Vec<String>) -> Self {
        let status = classify(&record, &files);
        let todos = build_todos(&record, !files.is_empty());
        Self {
            record,
            files,
            status,
            todos,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn is_complete(&self) -> bool {
        self.todos.is_empty()
    }
}

pub fn inspect(record: Record, evidence_root: &Path) -> Inspection {
    let files = evidence::list_files(evidence_root, &record.id);
    Inspection::new(record, files)
}

/// Number of inspections per status.
pub fn summarize(inspections: &[Inspection]) -> BTreeMap<Status, usize> {
    let mut summary = BTreeMap::new();
    for inspection in inspections {
        *summary.entry(inspection.status).or_insert(0) += 1;
    }
    summary
}
