//! Feature analysis: one document's text in, one [`Feature`] record out

use crate::extractor::{compile, FieldExtractor};
use dhstats_core::{Feature, StatsResult};
use regex::Regex;

/// Lower-cased keywords signalling accessibility work
pub const ACCESSIBILITY_KEYWORDS: &[&str] = &[
    "accessibility",
    "accessible",
    "screen reader",
    "wcag",
    "aria",
    "keyboard",
    "focus",
    "a11y",
    "designed for everyone",
];

/// Derives a [`Feature`] from document text.
///
/// Every pattern is compiled once here, so analysing a document cannot fail.
#[derive(Debug, Clone)]
pub struct FeatureAnalyzer {
    fields: FieldExtractor,
    history_marker: Regex,
    summary_title: Regex,
    quote_patterns: Vec<Regex>,
    findings_marker: Regex,
    objectives_marker: Regex,
    recommendations_marker: Regex,
}

impl FeatureAnalyzer {
    pub fn new() -> StatsResult<Self> {
        Ok(Self {
            fields: FieldExtractor::new()?,
            history_marker: compile(r#"roundNumber:\s*"([^"]+)""#)?,
            summary_title: compile(r#"title:\s*"(Round \d+[^"]*)""#)?,
            quote_patterns: vec![
                compile(r#"(?i)type:\s*"quotes""#)?,
                compile(r"(?i)Participant \d+")?,
                compile(r#"(?i)"[^"]*" - [^"]+"#)?,
            ],
            findings_marker: compile(r#"type:\s*"findings""#)?,
            objectives_marker: compile(r#"type:\s*"objectives""#)?,
            recommendations_marker: compile(r#"type:\s*"recommendations""#)?,
        })
    }

    /// Analyze one document.
    ///
    /// `directory_name` is the document's containing directory, used for the
    /// display name when `featureName` is not declared. `path` is stored as-is.
    pub fn analyze(&self, text: &str, directory_name: &str, path: &str) -> Feature {
        let name = self
            .fields
            .feature_name(text)
            .unwrap_or_else(|| name_from_directory(directory_name));

        let rounds = self.fields.research_round_count(text);
        let history_entries = self.history_marker.find_iter(text).count();
        let summaries_count = self.summary_title.find_iter(text).count();

        Feature {
            name,
            path: path.to_string(),
            rounds,
            history_entries,
            summaries_count,
            iterations: Feature::derive_iterations(rounds, history_entries, summaries_count),
            has_accessibility: has_accessibility_mentions(text),
            has_quotes: self.quote_patterns.iter().any(|p| p.is_match(text)),
            has_findings: self.findings_marker.is_match(text),
            has_objectives: self.objectives_marker.is_match(text),
            has_recommendations: self.recommendations_marker.is_match(text),
            has_user_need: self.fields.user_need(text).is_some(),
            status: self.fields.status(text),
            phase: self.fields.phase(text),
        }
    }
}

/// Analyze document text on its own, without a directory to fall back on
pub fn analyze(text: &str) -> StatsResult<Feature> {
    Ok(FeatureAnalyzer::new()?.analyze(text, "", ""))
}

pub fn has_accessibility_mentions(text: &str) -> bool {
    let lowered = text.to_lowercase();
    ACCESSIBILITY_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// `upload-evidence-v2` becomes `Upload Evidence V2`
pub fn name_from_directory(directory_name: &str) -> String {
    title_case(&directory_name.replace('-', " "))
}

/// Upper-case every letter that follows a non-letter, lower-case the rest
pub fn title_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut previous_is_letter = false;

    for c in input.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> FeatureAnalyzer {
        FeatureAnalyzer::new().unwrap()
    }

    #[test]
    fn test_research_rounds_drive_iterations() {
        let text = r#"{% set researchRounds = ["Round 1", "Round 2", "Round 3"] %}"#;
        let feature = analyze(text).unwrap();
        assert_eq!(feature.rounds, 3);
        assert_eq!(feature.history_entries, 0);
        assert_eq!(feature.summaries_count, 0);
        assert_eq!(feature.iterations, 3);
    }

    #[test]
    fn test_history_entries_drive_iterations() {
        let text = r#"
            researchHistory: [
              { roundNumber: "1", date: "March" },
              { roundNumber: "2", date: "April" },
              { roundNumber: "3", date: "May" }
            ]
        "#;
        let feature = analyze(text).unwrap();
        assert_eq!(feature.rounds, 0);
        assert_eq!(feature.history_entries, 3);
        assert_eq!(feature.iterations, 3);
    }

    #[test]
    fn test_summary_titles_counted() {
        let text = r#"
            { title: "Round 1 - discovery interviews" },
            { title: "Round 2" },
            { title: "Background" }
        "#;
        let feature = analyze(text).unwrap();
        assert_eq!(feature.summaries_count, 2);
        assert_eq!(feature.iterations, 2);
    }

    #[test]
    fn test_unmeasured_feature_has_one_iteration() {
        let feature = analyze("<h1>Search</h1><p>Plain page.</p>").unwrap();
        assert_eq!(feature.rounds, 0);
        assert_eq!(feature.history_entries, 0);
        assert_eq!(feature.summaries_count, 0);
        assert_eq!(feature.iterations, 1);
        assert!(!feature.has_multiple_iterations());
    }

    #[test]
    fn test_iterations_is_maximum_of_measurements() {
        let text = r#"
            {% set researchRounds = ["Round 1", "Round 2"] %}
            roundNumber: "1"
            title: "Round 1 findings"
            title: "Round 2 findings"
            title: "Round 3 findings"
            title: "Round 4 findings"
        "#;
        let feature = analyze(text).unwrap();
        assert_eq!(feature.rounds, 2);
        assert_eq!(feature.history_entries, 1);
        assert_eq!(feature.summaries_count, 4);
        assert_eq!(feature.iterations, 4);
    }

    #[test]
    fn test_accessibility_keywords_any_case() {
        assert!(analyze("<div aria-label=\"x\">ARIA</div>").unwrap().has_accessibility);
        assert!(has_accessibility_mentions("Meets wcag 2.2 AA"));
        assert!(has_accessibility_mentions("Tested with a Screen Reader"));
        assert!(has_accessibility_mentions("Designed for Everyone"));
        assert!(!has_accessibility_mentions("<p>Upload a file</p>"));
    }

    #[test]
    fn test_quote_signals() {
        assert!(analyze(r#"{ type: "quotes", items: [] }"#).unwrap().has_quotes);
        assert!(analyze("participant 12 said it was slow").unwrap().has_quotes);
        assert!(analyze(r#""It was confusing" - caseworker"#).unwrap().has_quotes);
        assert!(!analyze("<p>No voices here</p>").unwrap().has_quotes);
    }

    #[test]
    fn test_section_markers() {
        let text = r#"
            { type: "findings" },
            { type:"objectives" }
        "#;
        let feature = analyze(text).unwrap();
        assert!(feature.has_findings);
        assert!(feature.has_objectives);
        assert!(!feature.has_recommendations);
    }

    #[test]
    fn test_section_markers_are_case_sensitive() {
        let feature = analyze(r#"TYPE: "Recommendations""#).unwrap();
        assert!(!feature.has_recommendations);
    }

    #[test]
    fn test_categorical_fields() {
        let text = r#"
            {% set status = "In development" %}
            {% set userNeed = "As a user I need to..." %}
        "#;
        let feature = analyze(text).unwrap();
        assert_eq!(feature.status.as_deref(), Some("In development"));
        assert_eq!(feature.phase, None);
        assert!(feature.has_user_need);
    }

    #[test]
    fn test_missing_user_need_declaration() {
        let text = r#"
            {% set featureName = "Search" %}
            <p>The userNeed for this is still being agreed.</p>
        "#;
        let feature = analyze(text).unwrap();
        assert!(!feature.has_user_need);
        assert!(!analyze("").unwrap().has_user_need);
    }

    #[test]
    fn test_name_prefers_declaration() {
        let text = r#"{% set featureName = "Bulk upload" %}"#;
        let feature = analyzer().analyze(text, "bulk-upload-v1", "design-history/x/index.html");
        assert_eq!(feature.name, "Bulk upload");
        assert_eq!(feature.path, "design-history/x/index.html");
    }

    #[test]
    fn test_name_falls_back_to_directory() {
        let feature = analyzer().analyze("<p></p>", "check-your-answers", "p");
        assert_eq!(feature.name, "Check Your Answers");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("sign in"), "Sign In");
        assert_eq!(title_case("MVP release"), "Mvp Release");
        assert_eq!(title_case("titan mvp 1.2"), "Titan Mvp 1.2");
        assert_eq!(title_case("step2done"), "Step2Done");
        assert_eq!(title_case(""), "");
    }
}
