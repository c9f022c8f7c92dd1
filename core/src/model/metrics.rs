//! OEE computation.
//!
//! A pure function from shift parameters to Availability, Performance,
//! Quality and their product. No input is rejected: degenerate values are
//! guarded so the result is always complete and every reported ratio that
//! feeds OEE stays within `[0, 1]`.

use serde::{Deserialize, Serialize};

/// Smallest running time used as a denominator, in minutes.
pub const MIN_RUNNING_TIME: f64 = 1e-9;

/// Shift parameters entered by the user.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MetricInputs {
    /// Planned production time in minutes.
    pub planned_production_time: f64,
    /// Unplanned stops in minutes.
    pub downtime: f64,
    /// Ideal time to produce one unit, in minutes.
    pub ideal_cycle_time: f64,
    pub total_units: u32,
    /// Units meeting specification. Expected to be at most `total_units`.
    pub good_units: u32,
}

impl Default for MetricInputs {
    fn default() -> Self {
        Self {
            planned_production_time: 480.0,
            downtime: 60.0,
            ideal_cycle_time: 0.5,
            total_units: 800,
            good_units: 780,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricResult {
    /// Planned time minus downtime, never below [`MIN_RUNNING_TIME`].
    pub running_time: f64,
    pub availability: f64,
    /// Throughput ratio before clamping. May exceed 1 when the ideal cycle
    /// time is set slower than the line actually runs.
    pub raw_performance: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
}

impl MetricInputs {
    pub fn compute(&self) -> MetricResult {
        let planned = non_negative(self.planned_production_time);
        let downtime = non_negative(self.downtime);
        let ideal_cycle_time = non_negative(self.ideal_cycle_time);

        let running_time = (planned - downtime).max(MIN_RUNNING_TIME);

        let availability = unit_clamp(safe_ratio(running_time, planned));
        let raw_performance = finite_or_zero(safe_ratio(
            ideal_cycle_time * self.total_units as f64,
            running_time,
        ));
        let performance = unit_clamp(raw_performance);
        let quality = unit_clamp(safe_ratio(self.good_units as f64, self.total_units as f64));

        MetricResult {
            running_time,
            availability,
            raw_performance,
            performance,
            quality,
            oee: availability * performance * quality,
        }
    }
}

// NaN and negatives collapse to zero.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

// Overflowing products (e.g. a cycle time near f64::MAX) collapse to zero.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn unit_clamp(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
