pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::DashboardConfig;
pub use error::{Error, Result};
pub use input::{apply_inputs, expand_key, format_inputs, parse_args, parse_line, ParsedInput, INPUT_KEYS};
pub use model::log_entry::LogEntry;
pub use model::metrics::{MetricInputs, MetricResult};
pub use model::rating::{Rating, RatingThresholds};
pub use repository::{LogRepository, SessionLogRepository};
pub use service::session::DashboardSession;
pub use service::summary::LogSummary;
pub use time::{parse_log_date, today};
