use crate::config::AppConfig;
use crate::error::Error;
use crate::inspection::{inspect, Inspection};
use crate::progress::RefreshReporter;
use crate::project::{self, ProjectPaths};
use crate::record;
use crate::workbook;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

pub const EXCEL_MISSING: &str = "Excel file missing!";
pub const EVIDENCE_MISSING: &str = "Evidence folder missing!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshState {
    Idle,
    /// Requested; runs on the front-end's next tick.
    Pending,
    /// Finished; the refresh control stays disabled until the deadline.
    CoolingDown(Instant),
}

/// Front-end state for one checker window: the selected project, the
/// refresh guard and the inspections of the last refresh.
#[derive(Debug)]
pub struct Session {
    config: AppConfig,
    project: Option<ProjectPaths>,
    state: RefreshState,
    inspections: Vec<Inspection>,
    message: Option<String>,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            project: None,
            state: RefreshState::Idle,
            inspections: Vec::new(),
            message: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn project(&self) -> Option<&ProjectPaths> {
        self.project.as_ref()
    }

    pub fn inspections(&self) -> &[Inspection] {
        &self.inspections
    }

    pub fn inspection(&self, id: &str) -> Option<&Inspection> {
        self.inspections
            .iter()
            .find(|inspection| inspection.id().eq_ignore_ascii_case(id))
    }

    /// Last user-visible status or error line.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// A refresh is pending, or finished but still cooling down.
    pub fn is_loading(&self, now: Instant) -> bool {
        match self.state {
            RefreshState::Idle => false,
            RefreshState::Pending => true,
            RefreshState::CoolingDown(until) => now < until,
        }
    }

    pub fn refresh_pending(&self) -> bool {
        self.state == RefreshState::Pending
    }

    pub fn refresh_enabled(&self, now: Instant) -> bool {
        self.project.is_some() && !self.is_loading(now)
    }

    /// Select a project folder. Returns whether the folder resolved; a
    /// resolved folder also schedules a refresh unless one is pending or
    /// cooling down (see [`Session::refresh_pending`]). On failure the
    /// selection is cleared and the error kept as the message.
    pub fn select_project(&mut self, folder: &Path, now: Instant) -> bool {
        match project::locate(folder, &self.config.evidence_dir_name) {
            Ok(paths) => {
                info!("Selected project {}", folder.display());
                self.project = Some(paths);
                self.message = None;
                if !self.request_refresh(now) {
                    debug!("Refresh for {} deferred until the cool-down ends", folder.display());
                }
                true
            }
            Err(err) => {
                error!("Cannot use {}: {}", folder.display(), err);
                self.project = None;
                self.message = Some(err.to_string());
                false
            }
        }
    }

    /// Schedule a refresh. A no-op while one is pending or cooling down.
    pub fn request_refresh(&mut self, now: Instant) -> bool {
        if self.project.is_none() || self.is_loading(now) {
            return false;
        }
        self.state = RefreshState::Pending;
        true
    }

    /// Run a scheduled refresh to completion, then start the cool-down.
    /// Returns `None` when nothing was scheduled.
    pub fn run_pending_refresh(
        &mut self,
        reporter: &dyn RefreshReporter,
    ) -> Option<Result<usize, Error>> {
        if self.state != RefreshState::Pending {
            return None;
        }

        let result = self.refresh(reporter);
        match &result {
            Ok(count) => self.message = Some(format!("Loaded {} records.", count)),
            Err(err) => {
                error!("Refresh failed: {}", err);
                self.message = Some(err.to_string());
            }
        }

        self.state = RefreshState::CoolingDown(Instant::now() + self.config.refresh_cooldown());
        Some(result)
    }

    fn refresh(&mut self, reporter: &dyn RefreshReporter) -> Result<usize, Error> {
        let Some(project) = self.project.clone() else {
            return Err(Error::MissingProject(project::missing_project_message(
                &self.config.evidence_dir_name,
            )));
        };

        if !project.excel_path.is_file() {
            return Err(Error::MissingProject(EXCEL_MISSING.to_string()));
        }
        if !project.evidence_root.is_dir() {
            return Err(Error::MissingProject(EVIDENCE_MISSING.to_string()));
        }

        self.inspections.clear();

        let start = Instant::now();
        reporter.on_refresh_start(&project.excel_path);

        let rows = workbook::read_data_rows(&project.excel_path, self.config.header_rows)?;
        reporter.on_rows_read(rows.len());

        for record in record::extract(&rows) {
            let inspection = inspect(record, &project.evidence_root);
            reporter.on_inspection(&inspection);
            self.inspections.push(inspection);
        }

        let duration = start.elapsed();
        info!(
            "Refreshed {} records in {:.2}s",
            self.inspections.len(),
            duration.as_secs_f64()
        );
        reporter.on_refresh_complete(self.inspections.len(), duration.as_secs_f64());

        Ok(self.inspections.len())
    }
}
