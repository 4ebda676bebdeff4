//! dhstats Report - Aggregation and report output
//!
//! Folds feature records into [`Statistics`] and renders them as text or JSON

pub mod render;
pub mod statistics;

pub use render::*;
pub use statistics::*;
