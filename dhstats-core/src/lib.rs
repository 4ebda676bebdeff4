//! dhstats Core - Shared data structures and infrastructure
//!
//! Defines the feature record, the error type, logging and configuration used by
//! every other dhstats crate

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
