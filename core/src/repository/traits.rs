use crate::model::log_entry::LogEntry;

/// Append-only store of dated metric snapshots.
pub trait LogRepository {
    fn append(&mut self, entry: LogEntry);
    /// All entries in insertion order.
    fn entries(&self) -> &[LogEntry];

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Entries ordered by date. Entries sharing a date keep their insertion order.
    fn sorted_by_date(&self) -> Vec<LogEntry> {
        let mut entries = self.entries().to_vec();
        entries.sort_by_key(|e| e.date);
        entries
    }
}
