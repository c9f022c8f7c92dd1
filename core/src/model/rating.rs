use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Poor,
    Fair,
    Good,
}

impl Rating {
    pub fn label(&self) -> &'static str {
        match self {
            Rating::Poor => "Poor",
            Rating::Fair => "Fair",
            Rating::Good => "Good",
        }
    }
}

/// Lower bounds (inclusive) of the `Fair` and `Good` bands.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RatingThresholds {
    pub fair: f64,
    pub good: f64,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self {
            fair: 0.6,
            good: 0.85,
        }
    }
}

impl RatingThresholds {
    pub fn rate(&self, ratio: f64) -> Rating {
        if ratio.is_nan() || ratio < self.fair {
            Rating::Poor
        } else if ratio < self.good {
            Rating::Fair
        } else {
            Rating::Good
        }
    }
}
