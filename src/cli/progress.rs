use evidence_checker::{Inspection, RefreshReporter};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;

/// Spinner while the workbook is read and the evidence folders are checked.
pub struct CliReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl RefreshReporter for CliReporter {
    fn on_refresh_start(&self, excel_path: &Path) {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        pb.set_style(style);
        pb.set_message(format!("Reading {}...", excel_path.display()));
        pb.enable_steady_tick(Duration::from_millis(80));

        if let Some(old) = self.bar.borrow_mut().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn on_rows_read(&self, rows: usize) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_message(format!("Checking evidence for {} rows...", rows));
        }
    }

    fn on_inspection(&self, inspection: &Inspection) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_message(format!("Checked {}", inspection.id()));
        }
    }

    fn on_refresh_complete(&self, records: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Loaded {} records in {:.2}s",
            records, duration_secs
        );
    }
}
