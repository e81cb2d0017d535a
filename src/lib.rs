pub mod analyze;
pub mod chain;
pub mod config;
pub mod error;
pub mod log;
