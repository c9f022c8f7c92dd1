pub mod export;
pub mod session;
pub mod summary;

mod session_test;
