//! Field extraction from templated design-history documents
//!
//! Documents declare variables with `{% set NAME = ... %}` and carry inline
//! `key: "value"` markers. Both are matched as plain text; nothing here parses
//! HTML or the template language.

use dhstats_core::{ErrorContext, StatsError, StatsResult};
use regex::Regex;

/// Compile a pattern, mapping failures onto an extraction error
pub(crate) fn compile(pattern: &str) -> StatsResult<Regex> {
    Regex::new(pattern).map_err(|e| StatsError::Extraction {
        message: format!("Invalid extraction pattern '{}': {}", pattern, e),
        source: Some(Box::new(e)),
        context: ErrorContext::new("field_extractor").with_operation("compile"),
    })
}

/// The compiled declaration patterns for one variable name.
///
/// Tried in order: array literal, tight string (`"..."%}`), spaced string
/// (`"..." %}`). The first form with any match decides the result.
#[derive(Debug, Clone)]
pub struct DeclaredField {
    patterns: [Regex; 3],
}

impl DeclaredField {
    pub fn new(name: &str) -> StatsResult<Self> {
        let escaped = regex::escape(name);
        let prefix = format!(r"(?s)\{{%\s*set\s+{}\s*=\s*", escaped);

        Ok(Self {
            patterns: [
                compile(&format!(r"{}\[(.*?)\]\s*%\}}", prefix))?,
                compile(&format!(r#"{}"(.*?)"%\}}"#, prefix))?,
                compile(&format!(r#"{}"(.*?)"\s*%\}}"#, prefix))?,
            ],
        })
    }

    /// Inner content of every declaration of the first matching form
    pub fn extract(&self, text: &str) -> Vec<String> {
        for pattern in &self.patterns {
            let matches: Vec<String> = pattern
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .collect();

            if !matches.is_empty() {
                return matches;
            }
        }

        Vec::new()
    }
}

/// Extract the values declared for `field_name`, one element per declaration.
///
/// Returns an empty vector when the document never declares the field.
pub fn extract_declared_list_or_string(text: &str, field_name: &str) -> StatsResult<Vec<String>> {
    Ok(DeclaredField::new(field_name)?.extract(text))
}

/// Compiled patterns for every field a feature document may declare
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    feature_name: DeclaredField,
    research_rounds: DeclaredField,
    quoted_literal: Regex,
    status: Regex,
    phase: Regex,
    user_need: Regex,
}

impl FieldExtractor {
    pub fn new() -> StatsResult<Self> {
        Ok(Self {
            feature_name: DeclaredField::new("featureName")?,
            research_rounds: DeclaredField::new("researchRounds")?,
            quoted_literal: compile(r#""([^"]+)""#)?,
            status: compile(r#"status\s*=\s*"([^"]+)""#)?,
            phase: compile(r#"phase\s*=\s*"([^"]+)""#)?,
            user_need: compile(r#"(?s)userNeed\s*=\s*"(.*?)""#)?,
        })
    }

    /// Declared `featureName` with surrounding quote characters removed
    pub fn feature_name(&self, text: &str) -> Option<String> {
        self.feature_name
            .extract(text)
            .into_iter()
            .next()
            .map(|value| value.trim_matches(|c| c == '"' || c == '\'').to_string())
    }

    /// Number of quoted entries in the first `researchRounds` declaration
    pub fn research_round_count(&self, text: &str) -> usize {
        match self.research_rounds.extract(text).first() {
            Some(rounds) => self.quoted_literal.find_iter(rounds).count(),
            None => 0,
        }
    }

    pub fn status(&self, text: &str) -> Option<String> {
        first_capture(&self.status, text)
    }

    pub fn phase(&self, text: &str) -> Option<String> {
        first_capture(&self.phase, text)
    }

    /// `userNeed` statement, possibly spanning lines, trimmed
    pub fn user_need(&self, text: &str) -> Option<String> {
        first_capture(&self.user_need, text).map(|value| value.trim().to_string())
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
