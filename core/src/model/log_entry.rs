use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::metrics::MetricResult;

/// A dated snapshot of the metrics, taken on an explicit save.
///
/// Ratios are stored as fractions. `performance` is the raw value, so it
/// can exceed 1; `oee` was computed from the clamped one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
}

impl LogEntry {
    pub fn new(date: NaiveDate, result: &MetricResult) -> Self {
        Self {
            date,
            availability: result.availability,
            performance: result.raw_performance,
            quality: result.quality,
            oee: result.oee,
        }
    }
}
