// Public API for the speech relay library

pub mod config;
pub mod data;
pub mod errors;
pub mod retention_monitor;
pub mod server;
pub mod speech;
pub mod storage;
pub mod trace;

// Re-export commonly used types
pub use config::Config;
pub use data::AppState;
pub use errors::{RelayError, Result};
