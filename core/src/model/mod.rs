pub mod log_entry;
pub mod metrics;
pub mod rating;
