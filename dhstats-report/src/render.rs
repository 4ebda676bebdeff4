//! Report rendering
//!
//! Turns a [`Statistics`] bundle plus the scanned features into the printed
//! report, or into a JSON document.

use crate::statistics::Statistics;
use dhstats_core::{ErrorContext, Feature, ReportConfig, StatsError, StatsResult};
use serde::Serialize;
use std::str::FromStr;

pub const NO_FEATURES_MESSAGE: &str = "No features found. Please check the file paths.";

const RULE_WIDTH: usize = 80;

/// Output formats supported by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Sectioned plain-text report
    #[default]
    Text,
    /// Statistics and ranking as pretty-printed JSON
    Json,
}

impl FromStr for ReportFormat {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(StatsError::Render {
                message: format!("Unsupported report format: {}", other),
                source: None,
                context: ErrorContext::new("report_renderer")
                    .with_operation("parse_format")
                    .with_suggestion("Use 'text' or 'json'"),
            }),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    statistics: &'a Statistics,
    top_features: Vec<&'a Feature>,
}

/// Renders reports according to a [`ReportConfig`]
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    config: ReportConfig,
}

impl ReportRenderer {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn render_as(
        &self,
        format: ReportFormat,
        stats: &Statistics,
        features: &[Feature],
    ) -> StatsResult<String> {
        match format {
            ReportFormat::Text => Ok(self.render(stats, features)),
            ReportFormat::Json => self.render_json(stats, features),
        }
    }

    /// Text report. An empty corpus renders as a single explanatory line.
    pub fn render(&self, stats: &Statistics, features: &[Feature]) -> String {
        if stats.total_features == 0 {
            return format!("{}\n", NO_FEATURES_MESSAGE);
        }

        let mut content = String::new();
        let double_rule = "=".repeat(RULE_WIDTH);

        content.push_str(&format!(
            "{}\n{}\n{}\n\n",
            double_rule, self.config.title, double_rule
        ));

        section(&mut content, "1. DESIGN COMMUNICATION");
        content.push_str(&format!(
            "Total features documented: {}\n",
            stats.total_features
        ));
        content.push_str(&format!(
            "Features with documented user needs: {}\n",
            with_percentage(stats, stats.features_with_user_needs)
        ));
        content.push_str(&format!(
            "Features with research objectives: {}\n",
            stats.features_with_objectives
        ));
        content.push_str(&format!(
            "Features with documented findings: {}\n",
            with_percentage(stats, stats.features_with_findings)
        ));
        content.push_str(&format!(
            "Features with recommendations: {}\n",
            stats.features_with_recommendations
        ));
        content.push_str(&format!(
            "Features with user quotes: {}\n\n",
            stats.features_with_quotes
        ));

        section(&mut content, "2. DESIGNING FOR EVERYONE");
        content.push_str(&format!(
            "Features with accessibility considerations: {}\n\n",
            with_percentage(stats, stats.features_with_accessibility)
        ));

        section(&mut content, "3. DESIGNING STRATEGICALLY");
        content.push_str(&format!(
            "Features with user needs defined: {}\n",
            with_percentage(stats, stats.features_with_user_needs)
        ));
        content.push_str("\nPhase breakdown:\n");
        for (phase, count) in &stats.phase_breakdown {
            content.push_str(&format!("  - {}: {}\n", phase, count));
        }
        content.push_str("\nStatus breakdown:\n");
        for (status, count) in &stats.status_breakdown {
            content.push_str(&format!("  - {}: {}\n", status, count));
        }
        content.push('\n');

        section(&mut content, "4. EVIDENCE-BASED DESIGN");
        content.push_str(&format!(
            "Total research iterations across all features: {}\n",
            stats.total_iterations
        ));
        content.push_str(&format!(
            "Features with multiple iterations: {}\n",
            with_percentage(stats, stats.features_with_multiple_iterations)
        ));
        content.push_str(&format!(
            "Features with documented findings: {}\n",
            stats.features_with_findings
        ));
        content.push_str(&format!(
            "Features with user quotes: {}\n\n",
            stats.features_with_quotes
        ));

        section(&mut content, "5. ITERATIVE DESIGN");
        content.push_str(&format!(
            "Total iterations across all features: {}\n",
            stats.total_iterations
        ));
        content.push_str(&format!(
            "Average iterations per feature: {:.1}\n",
            stats.average_iterations()
        ));
        content.push_str(&format!(
            "Features with 2+ iterations: {}\n",
            with_percentage(stats, stats.features_with_multiple_iterations)
        ));
        content.push_str(&format!(
            "Features with 3+ iterations: {}\n",
            stats.features_with_at_least(3)
        ));
        content.push_str(&format!(
            "Features with 4+ iterations: {}\n",
            stats.features_with_at_least(4)
        ));
        content.push_str("\nIteration distribution:\n");
        for (iterations, count) in &stats.iteration_distribution {
            content.push_str(&format!(
                "  - {} iteration(s): {} feature(s)\n",
                iterations, count
            ));
        }
        content.push('\n');

        section(&mut content, "6. FEATURES BY ITERATION COUNT");
        for feature in self.top_features(features) {
            content.push_str(&format!(
                "  {}: {} iteration(s)\n",
                feature.name, feature.iterations
            ));
        }

        content
    }

    /// Statistics and ranked features as pretty JSON
    pub fn render_json(&self, stats: &Statistics, features: &[Feature]) -> StatsResult<String> {
        let report = JsonReport {
            statistics: stats,
            top_features: self.top_features(features),
        };

        serde_json::to_string_pretty(&report).map_err(|e| StatsError::Render {
            message: format!("Failed to serialize report to JSON: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("report_renderer").with_operation("render_json"),
        })
    }

    /// Features by iteration count, descending; ties keep discovery order
    pub fn top_features<'a>(&self, features: &'a [Feature]) -> Vec<&'a Feature> {
        let mut ranked: Vec<&Feature> = features.iter().collect();
        ranked.sort_by(|a, b| b.iterations.cmp(&a.iterations));
        ranked.truncate(self.config.top_n);
        ranked
    }
}

/// Render a text report with the default configuration
pub fn render(stats: &Statistics, features: &[Feature]) -> String {
    ReportRenderer::default().render(stats, features)
}

fn section(content: &mut String, title: &str) {
    content.push_str(&format!("{}\n{}\n", title, "-".repeat(RULE_WIDTH)));
}

fn with_percentage(stats: &Statistics, count: usize) -> String {
    format!("{} ({:.1}%)", count, stats.percentage(count))
}
