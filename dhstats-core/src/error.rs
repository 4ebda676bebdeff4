//! Unified error handling
//!
//! Structured error types with context and recovery suggestions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::error;

pub type StatsResult<T> = Result<T, StatsError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata, e.g. the document path
    pub metadata: HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for dhstats
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Scan error: {message}")]
    Scan {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Extraction error: {message}")]
    Extraction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StatsError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            StatsError::Scan { context, .. } => Some(context),
            StatsError::Extraction { context, .. } => Some(context),
            StatsError::Config { context, .. } => Some(context),
            StatsError::Render { context, .. } => Some(context),
            StatsError::Io(_) => None,
        }
    }

    /// Log the error with appropriate level
    ///
    /// Per-document errors name the document from the context's `path` metadata.
    pub fn log(&self) {
        let context = self.context();
        let component = context.map(|c| c.component.as_str());
        let operation = context.and_then(|c| c.operation.as_deref());
        match self {
            StatsError::Scan { .. } | StatsError::Extraction { .. } => {
                let document = context
                    .and_then(|c| c.metadata.get("path"))
                    .map(String::as_str)
                    .unwrap_or("<unknown>");
                error!(
                    document = %document,
                    operation = ?operation,
                    error = %self,
                    "Error processing document"
                );
            }
            StatsError::Config { .. } => {
                error!(component = ?component, error = %self, "Configuration error");
            }
            _ => {
                error!(component = ?component, operation = ?operation, error = %self, "Error occurred");
            }
        }
    }
}
