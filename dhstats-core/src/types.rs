//! Core data type definitions

use serde::{Deserialize, Serialize};

/// One analyzed design-history document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Display name, from `featureName` or the containing directory
    pub name: String,
    /// Document location relative to the parent of the scan base directory
    pub path: String,
    /// Entries in the `researchRounds` list
    pub rounds: usize,
    /// `roundNumber` markers
    pub history_entries: usize,
    /// `title: "Round N ..."` markers
    pub summaries_count: usize,
    /// Never below 1, see [`Feature::derive_iterations`]
    pub iterations: usize,
    pub has_accessibility: bool,
    pub has_quotes: bool,
    pub has_findings: bool,
    pub has_objectives: bool,
    pub has_recommendations: bool,
    pub has_user_need: bool,
    pub status: Option<String>,
    pub phase: Option<String>,
}

impl Feature {
    /// Iteration count for a feature given its three raw measurements.
    ///
    /// A feature with nothing measurable still counts as one design pass.
    pub fn derive_iterations(rounds: usize, history_entries: usize, summaries_count: usize) -> usize {
        rounds.max(history_entries).max(summaries_count).max(1)
    }

    pub fn has_multiple_iterations(&self) -> bool {
        self.iterations > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_iterations_takes_maximum() {
        assert_eq!(Feature::derive_iterations(3, 0, 0), 3);
        assert_eq!(Feature::derive_iterations(1, 4, 2), 4);
        assert_eq!(Feature::derive_iterations(0, 2, 5), 5);
    }

    #[test]
    fn test_derive_iterations_defaults_to_one() {
        assert_eq!(Feature::derive_iterations(0, 0, 0), 1);
        assert_eq!(Feature::derive_iterations(1, 0, 0), 1);
    }
}
