//! Configuration management

use crate::error::{ErrorContext, StatsError, StatsResult};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Base directory of the design-history views, relative to the project root
pub const DEFAULT_BASE_DIR: &str = "app/views/design-history";
/// File name of a feature's design-history document
pub const DEFAULT_DOCUMENT_NAME: &str = "index.html";
pub const DEFAULT_TOP_N: usize = 20;
pub const DEFAULT_REPORT_TITLE: &str = "DESIGN HISTORY STATISTICS FOR DDAT CAPABILITY FRAMEWORK";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub scan: ScanConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory holding one sub-directory per feature
    pub base_dir: String,
    /// Document file name to look for below `base_dir`
    pub document_name: String,
    /// Directory names never descended into; empty means the whole tree
    pub excluded_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_dir: DEFAULT_BASE_DIR.to_string(),
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            excluded_dirs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of features listed in the iteration ranking
    pub top_n: usize,
    /// Banner line at the top of the text report
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

impl StatsConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> StatsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StatsError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_metadata("path", &path.display().to_string())
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: StatsConfig = toml::from_str(&content).map_err(|e| StatsError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_metadata("path", &path.display().to_string())
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> StatsResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| StatsError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| StatsError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> StatsResult<()> {
        if self.scan.base_dir.trim().is_empty() {
            return Err(StatsError::Config {
                message: "scan.base_dir must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set scan.base_dir to the design-history views directory"),
            });
        }

        if self.scan.document_name.is_empty()
            || self.scan.document_name.contains(['/', '\\'])
        {
            return Err(StatsError::Config {
                message: format!(
                    "scan.document_name must be a plain file name, got '{}'",
                    self.scan.document_name
                ),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Use a bare file name such as index.html"),
            });
        }

        if self.report.top_n == 0 {
            return Err(StatsError::Config {
                message: "report.top_n must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set report.top_n to a positive value"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StatsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scan.base_dir, "app/views/design-history");
        assert_eq!(config.scan.document_name, "index.html");
        assert_eq!(config.report.top_n, 20);
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let mut config = StatsConfig::default();
        config.report.top_n = 0;
        assert!(matches!(config.validate(), Err(StatsError::Config { .. })));
    }

    #[test]
    fn test_document_name_with_separator_rejected() {
        let mut config = StatsConfig::default();
        config.scan.document_name = "nested/index.html".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StatsConfig = toml::from_str("[report]\ntop_n = 5\n").unwrap();
        assert_eq!(config.report.top_n, 5);
        assert_eq!(config.report.title, DEFAULT_REPORT_TITLE);
        assert_eq!(config.scan.base_dir, DEFAULT_BASE_DIR);
    }
}
