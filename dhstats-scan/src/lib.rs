//! dhstats Scan - Design history extraction
//!
//! Walks a design-history tree and turns each feature document into a
//! [`dhstats_core::Feature`] record

pub mod analyzer;
pub mod extractor;
pub mod filter;
pub mod scanner;

pub use analyzer::*;
pub use extractor::*;
pub use filter::*;
pub use scanner::*;
