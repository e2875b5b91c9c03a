//! Comparison data model
//!
//! Requests flow in as [`ComparisonRequest`], the remote service answers with a
//! [`RawResponse`], and the parser turns that into a read-only
//! [`ComparisonResult`] for the renderer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::error::ComparisonError;

/// Text used when the remote service answers without any body
pub const EMPTY_ANALYSIS_FALLBACK: &str = "No analysis generated.";

/// Two vehicle models to compare, plus optional supplemental data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    model_a: String,
    model_b: String,
    supplemental_text: Option<String>,
}

impl ComparisonRequest {
    /// Create a request, rejecting blank or whitespace-only model names.
    ///
    /// Names are kept verbatim; they are embedded into the prompt as typed.
    pub fn new(
        model_a: impl Into<String>,
        model_b: impl Into<String>,
        supplemental_text: Option<String>,
    ) -> Result<Self, ComparisonError> {
        let model_a = model_a.into();
        let model_b = model_b.into();

        if model_a.trim().is_empty() || model_b.trim().is_empty() {
            return Err(ComparisonError::InputValidation);
        }

        Ok(Self {
            model_a,
            model_b,
            supplemental_text,
        })
    }

    pub fn model_a(&self) -> &str {
        &self.model_a
    }

    pub fn model_b(&self) -> &str {
        &self.model_b
    }

    pub fn supplemental_text(&self) -> Option<&str> {
        self.supplemental_text.as_deref()
    }
}

/// A web source the remote service used to ground its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

/// Raw answer from the remote service, before any parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub text: String,
    pub citations: Vec<Citation>,
}

impl RawResponse {
    /// Build a raw response, substituting the fallback text for a missing or empty body
    pub fn new(text: Option<String>, citations: Vec<Citation>) -> Self {
        let text = text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| EMPTY_ANALYSIS_FALLBACK.to_string());
        Self { text, citations }
    }
}

/// Buckets a response line can land in.
///
/// Declaration order is the order sections appear in the prompt and in
/// serialized output.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKey {
    ScoreRationale,
    KeySimilarities,
    KeyDifferences,
    TechSpecs,
    QualitativeEdge,
    General,
}

impl SectionKey {
    /// Keys that can be introduced by a header line. `General` is only the fallback.
    pub const HEADERS: [SectionKey; 5] = [
        SectionKey::ScoreRationale,
        SectionKey::KeySimilarities,
        SectionKey::KeyDifferences,
        SectionKey::TechSpecs,
        SectionKey::QualitativeEdge,
    ];
}

/// Response lines grouped by section, in original order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedSections {
    sections: BTreeMap<SectionKey, Vec<String>>,
}

impl ParsedSections {
    pub(crate) fn from_map(sections: BTreeMap<SectionKey, Vec<String>>) -> Self {
        Self { sections }
    }

    /// Lines of a section, or `None` if the response never touched it
    pub fn get(&self, key: SectionKey) -> Option<&[String]> {
        self.sections.get(&key).map(Vec::as_slice)
    }

    /// Lines of a section, empty when absent
    pub fn lines(&self, key: SectionKey) -> &[String] {
        self.get(key).unwrap_or_default()
    }

    pub fn contains(&self, key: SectionKey) -> bool {
        self.sections.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = SectionKey> + '_ {
        self.sections.keys().copied()
    }

    /// Total number of lines across all sections
    pub fn line_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// True when no header keyword was recognized at all
    pub fn is_degraded(&self) -> bool {
        self.sections.keys().all(|k| *k == SectionKey::General)
    }
}

/// Everything the renderer needs for one comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub model_a: String,
    pub model_b: String,
    pub similarity_score: u8,
    pub sections: ParsedSections,
    pub citations: Vec<Citation>,
}

impl ComparisonResult {
    /// Display-ready items of a section with list markers removed
    pub fn items(&self, key: SectionKey) -> Vec<String> {
        self.sections
            .lines(key)
            .iter()
            .map(|line| strip_list_marker(line).to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }
}

/// Strip leading bullet, heading and numbering markers (`#`, `*`, `-`, digits, `.`, whitespace)
pub fn strip_list_marker(line: &str) -> &str {
    line.trim_start_matches(|c: char| {
        c == '#' || c == '*' || c == '.' || c == '-' || c.is_whitespace() || c.is_ascii_digit()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_blank_names() {
        assert!(matches!(
            ComparisonRequest::new("   ", "Ola S1 Pro", None),
            Err(ComparisonError::InputValidation)
        ));
        assert!(matches!(
            ComparisonRequest::new("Ather 450X", "\t\n", None),
            Err(ComparisonError::InputValidation)
        ));
        assert!(ComparisonRequest::new("Ather 450X", "Ola S1 Pro", None).is_ok());
    }

    #[test]
    fn test_request_keeps_names_verbatim() {
        let request = ComparisonRequest::new(" Ather 450X ", "Ola S1 Pro", Some("a,b".into()))
            .expect("valid request");
        assert_eq!(request.model_a(), " Ather 450X ");
        assert_eq!(request.supplemental_text(), Some("a,b"));
    }

    #[test]
    fn test_raw_response_fallback_text() {
        assert_eq!(RawResponse::new(None, vec![]).text, EMPTY_ANALYSIS_FALLBACK);
        assert_eq!(
            RawResponse::new(Some(String::new()), vec![]).text,
            EMPTY_ANALYSIS_FALLBACK
        );
        assert_eq!(RawResponse::new(Some("hi".into()), vec![]).text, "hi");
    }

    #[test]
    fn test_section_key_names() {
        assert_eq!(SectionKey::KeySimilarities.to_string(), "KEY_SIMILARITIES");
        assert_eq!(
            "tech_specs".parse::<SectionKey>().ok(),
            Some(SectionKey::TechSpecs)
        );
        assert!("SIMILARITY_SCORE".parse::<SectionKey>().is_err());
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("* Fast charging"), "Fast charging");
        assert_eq!(strip_list_marker("1. Range differs"), "Range differs");
        assert_eq!(strip_list_marker("### - Note"), "Note");
        assert_eq!(strip_list_marker("Plain line"), "Plain line");
    }
}
