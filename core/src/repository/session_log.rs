use tracing::debug;

use crate::model::log_entry::LogEntry;
use crate::repository::traits::LogRepository;

/// In-memory log that lives as long as its owning session.
#[derive(Debug, Default, Clone)]
pub struct SessionLogRepository {
    entries: Vec<LogEntry>,
}

impl SessionLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogRepository for SessionLogRepository {
    fn append(&mut self, entry: LogEntry) {
        debug!(date = %entry.date, oee = entry.oee, "appending log entry");
        self.entries.push(entry);
    }

    fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}
