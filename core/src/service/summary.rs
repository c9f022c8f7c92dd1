use crate::model::log_entry::LogEntry;

/// Aggregate view of a session log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSummary {
    pub count: usize,
    pub mean_availability: f64,
    pub mean_performance: f64,
    pub mean_quality: f64,
    pub mean_oee: f64,
    pub best: LogEntry,
    pub worst: LogEntry,
}

impl LogSummary {
    /// `None` for an empty log. Ties on OEE resolve to the earliest entry.
    pub fn from_entries(entries: &[LogEntry]) -> Option<Self> {
        let first = entries.first()?;
        let n = entries.len() as f64;
        let mean = |f: fn(&LogEntry) -> f64| entries.iter().map(f).sum::<f64>() / n;

        let mut best = first;
        let mut worst = first;
        for entry in &entries[1..] {
            if entry.oee > best.oee {
                best = entry;
            }
            if entry.oee < worst.oee {
                worst = entry;
            }
        }

        Some(Self {
            count: entries.len(),
            mean_availability: mean(|e| e.availability),
            mean_performance: mean(|e| e.performance),
            mean_quality: mean(|e| e.quality),
            mean_oee: mean(|e| e.oee),
            best: best.clone(),
            worst: worst.clone(),
        })
    }
}
