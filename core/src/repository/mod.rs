pub mod session_log;
pub mod traits;

// Re-export
pub use session_log::SessionLogRepository;
pub use traits::LogRepository;
