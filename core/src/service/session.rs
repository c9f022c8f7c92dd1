use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::input::{apply_inputs, parse_line};
use crate::model::log_entry::LogEntry;
use crate::model::metrics::{MetricInputs, MetricResult};
use crate::model::rating::{Rating, RatingThresholds};
use crate::repository::{LogRepository, SessionLogRepository};
use crate::service::export::{to_csv_string, write_csv_file};
use crate::service::summary::LogSummary;
use crate::time::{parse_log_date, today};

/// Everything one dashboard session owns: the inputs being edited, the
/// date the next snapshot is filed under, and the log of saved snapshots.
///
/// Handlers receive the session explicitly; dropping it discards the log.
pub struct DashboardSession<R: LogRepository> {
    repo: R,
    inputs: MetricInputs,
    result: MetricResult,
    log_date: NaiveDate,
    thresholds: RatingThresholds,
}

impl DashboardSession<SessionLogRepository> {
    /// A fresh in-memory session dated today.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let mut session = Self::new(SessionLogRepository::new(), config.defaults, today());
        session.thresholds = config.thresholds;
        session
    }
}

impl<R: LogRepository> DashboardSession<R> {
    pub fn new(repo: R, inputs: MetricInputs, log_date: NaiveDate) -> Self {
        Self {
            repo,
            inputs,
            result: inputs.compute(),
            log_date,
            thresholds: RatingThresholds::default(),
        }
    }

    pub fn inputs(&self) -> &MetricInputs {
        &self.inputs
    }

    pub fn set_inputs(&mut self, inputs: MetricInputs) {
        self.inputs = inputs;
        self.result = inputs.compute();
    }

    /// Updates the inputs from a line of `key:value` tokens. On error the
    /// current inputs are kept.
    pub fn update_inputs(&mut self, line: &str) -> Result<()> {
        let inputs = apply_inputs(&self.inputs, &parse_line(line))?;
        self.set_inputs(inputs);
        Ok(())
    }

    pub fn result(&self) -> &MetricResult {
        &self.result
    }

    pub fn rate(&self, ratio: f64) -> Rating {
        self.thresholds.rate(ratio)
    }

    pub fn log_date(&self) -> NaiveDate {
        self.log_date
    }

    pub fn set_log_date(&mut self, date: NaiveDate) {
        self.log_date = date;
    }

    /// Parses and selects the date the next snapshot is filed under.
    pub fn select_log_date(&mut self, input: &str) -> Result<NaiveDate> {
        let date = parse_log_date(input)?;
        self.set_log_date(date);
        Ok(date)
    }

    /// Appends a snapshot of the current result under the selected date.
    pub fn save(&mut self) -> LogEntry {
        let entry = LogEntry::new(self.log_date, &self.result);
        self.repo.append(entry.clone());
        entry
    }

    /// Saved snapshots in insertion order.
    pub fn entries(&self) -> &[LogEntry] {
        self.repo.entries()
    }

    /// Saved snapshots ordered by date, or `None` when nothing is saved yet.
    pub fn trend(&self) -> Option<Vec<LogEntry>> {
        if self.repo.is_empty() {
            return None;
        }
        Some(self.repo.sorted_by_date())
    }

    pub fn summary(&self) -> Option<LogSummary> {
        LogSummary::from_entries(self.repo.entries())
    }

    /// CSV text of the log, or `None` when nothing is saved yet.
    pub fn export_csv(&self) -> Result<Option<String>> {
        if self.repo.is_empty() {
            debug!("export requested with empty log");
            return Ok(None);
        }
        to_csv_string(self.repo.entries()).map(Some)
    }

    /// Writes the CSV to `path`. Returns `None` without touching the file
    /// system when nothing is saved yet.
    pub fn export_to(&self, path: &Path) -> Result<Option<PathBuf>> {
        if self.repo.is_empty() {
            debug!("export requested with empty log");
            return Ok(None);
        }
        write_csv_file(path, self.repo.entries())?;
        info!(path = %path.display(), rows = self.repo.len(), "exported log");
        Ok(Some(path.to_path_buf()))
    }
}
