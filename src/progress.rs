use crate::inspection::Inspection;
use std::path::Path;

/// Trait for reporting refresh progress.
///
/// The CLI implements it with an indicatif spinner. All methods have default
/// no-op implementations.
pub trait RefreshReporter {
    fn on_refresh_start(&self, _excel_path: &Path) {}
    fn on_rows_read(&self, _rows: usize) {}
    fn on_inspection(&self, _inspection: &Inspection) {}
    fn on_refresh_complete(&self, _records: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl RefreshReporter for SilentReporter {}
