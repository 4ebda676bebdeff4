//! Statistics aggregated over all scanned features

use dhstats_core::Feature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cross-feature counts for one report run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_features: usize,
    pub total_iterations: usize,
    pub features_with_multiple_iterations: usize,
    pub features_with_accessibility: usize,
    pub features_with_quotes: usize,
    pub features_with_findings: usize,
    pub features_with_objectives: usize,
    pub features_with_recommendations: usize,
    pub features_with_user_needs: usize,
    /// Only statuses that occur; features without one are left out
    pub status_breakdown: BTreeMap<String, usize>,
    pub phase_breakdown: BTreeMap<String, usize>,
    /// Iteration count to number of features with that count
    pub iteration_distribution: BTreeMap<usize, usize>,
}

impl Statistics {
    /// Fold the features into a statistics bundle in one pass
    pub fn aggregate(features: &[Feature]) -> Self {
        let mut stats = Self::default();

        for feature in features {
            stats.total_features += 1;
            stats.total_iterations += feature.iterations;

            if feature.has_multiple_iterations() {
                stats.features_with_multiple_iterations += 1;
            }
            if feature.has_accessibility {
                stats.features_with_accessibility += 1;
            }
            if feature.has_quotes {
                stats.features_with_quotes += 1;
            }
            if feature.has_findings {
                stats.features_with_findings += 1;
            }
            if feature.has_objectives {
                stats.features_with_objectives += 1;
            }
            if feature.has_recommendations {
                stats.features_with_recommendations += 1;
            }
            if feature.has_user_need {
                stats.features_with_user_needs += 1;
            }

            if let Some(status) = &feature.status {
                *stats.status_breakdown.entry(status.clone()).or_insert(0) += 1;
            }
            if let Some(phase) = &feature.phase {
                *stats.phase_breakdown.entry(phase.clone()).or_insert(0) += 1;
            }
            *stats
                .iteration_distribution
                .entry(feature.iterations)
                .or_insert(0) += 1;
        }

        stats
    }

    /// Number of features with at least `iterations` iterations
    pub fn features_with_at_least(&self, iterations: usize) -> usize {
        self.iteration_distribution
            .range(iterations..)
            .map(|(_, count)| count)
            .sum()
    }

    /// `count` as a share of all features, in percent; 0 for an empty corpus
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total_features == 0 {
            return 0.0;
        }
        count as f64 / self.total_features as f64 * 100.0
    }

    pub fn average_iterations(&self) -> f64 {
        if self.total_features == 0 {
            return 0.0;
        }
        self.total_iterations as f64 / self.total_features as f64
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn feature(name: &str, iterations: usize) -> Feature {
        Feature {
            name: name.to_string(),
            path: format!("design-history/{}/index.html", name),
            rounds: iterations,
            history_entries: 0,
            summaries_count: 0,
            iterations,
            has_accessibility: false,
            has_quotes: false,
            has_findings: false,
            has_objectives: false,
            has_recommendations: false,
            has_user_need: false,
            status: None,
            phase: None,
        }
    }

    fn sample() -> Vec<Feature> {
        let mut upload = feature("upload", 3);
        upload.has_accessibility = true;
        upload.has_findings = true;
        upload.status = Some("Live".to_string());
        upload.phase = Some("Beta".to_string());

        let mut search = feature("search", 1);
        search.has_user_need = true;
        search.has_quotes = true;
        search.status = Some("Live".to_string());

        let mut notify = feature("notify", 2);
        notify.has_objectives = true;
        notify.has_recommendations = true;
        notify.phase = Some("Alpha".to_string());

        vec![upload, search, notify]
    }

    #[test]
    fn test_aggregate_counts() {
        let stats = Statistics::aggregate(&sample());

        assert_eq!(stats.total_features, 3);
        assert_eq!(stats.total_iterations, 6);
        assert_eq!(stats.features_with_multiple_iterations, 2);
        assert_eq!(stats.features_with_accessibility, 1);
        assert_eq!(stats.features_with_quotes, 1);
        assert_eq!(stats.features_with_findings, 1);
        assert_eq!(stats.features_with_objectives, 1);
        assert_eq!(stats.features_with_recommendations, 1);
        assert_eq!(stats.features_with_user_needs, 1);
    }

    #[test]
    fn test_breakdowns_omit_absent_values() {
        let stats = Statistics::aggregate(&sample());

        assert_eq!(stats.status_breakdown.len(), 1);
        assert_eq!(stats.status_breakdown["Live"], 2);
        assert_eq!(stats.phase_breakdown["Alpha"], 1);
        assert_eq!(stats.phase_breakdown["Beta"], 1);
        assert!(stats.status_breakdown.values().sum::<usize>() <= stats.total_features);
    }

    #[test]
    fn test_distribution_sums_to_total() {
        let stats = Statistics::aggregate(&sample());

        assert_eq!(
            stats.iteration_distribution.values().sum::<usize>(),
            stats.total_features
        );
        assert_eq!(stats.iteration_distribution[&1], 1);
        assert_eq!(stats.iteration_distribution[&2], 1);
        assert_eq!(stats.iteration_distribution[&3], 1);
        assert_eq!(stats.features_with_at_least(2), 2);
        assert_eq!(stats.features_with_at_least(3), 1);
        assert_eq!(stats.features_with_at_least(4), 0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let features = sample();
        assert_eq!(
            Statistics::aggregate(&features),
            Statistics::aggregate(&features)
        );
    }

    #[test]
    fn test_empty_input() {
        let stats = Statistics::aggregate(&[]);
        assert_eq!(stats, Statistics::default());
        assert_eq!(stats.percentage(0), 0.0);
        assert_eq!(stats.average_iterations(), 0.0);
    }
}
