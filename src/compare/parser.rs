//! Response Parser
//!
//! Turns the free-text answer of the remote service into [`ParsedSections`]
//! and a similarity score. Classification is a single line-oriented pass:
//! a line that looks like one of the known labels switches the active
//! section, every other line is appended to whichever section is active.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::error::ComparisonError;
use super::types::{ParsedSections, SectionKey};
use crate::log_debug;

/// Marker the remote service emits when it rejects the two names
pub const VALIDATION_MARKER: &str = "VALIDATION_ERROR:";

/// Lines at least this long need a colon to count as a header
pub const HEADER_MAX_BARE_LEN: usize = 40;

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)(SCORE_RATIONALE|KEY_SIMILARITIES|KEY_DIFFERENCES|TECH_SPECS|QUALITATIVE_EDGE)")
        .expect("header pattern is valid")
});

static SCORE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)SIMILARITY_SCORE:\s*([0-9]+)").expect("score pattern is valid")
});

/// Score and sections extracted from one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub similarity_score: u8,
    pub sections: ParsedSections,
}

/// Parse a raw response body.
///
/// A body carrying [`VALIDATION_MARKER`] short-circuits into
/// [`ComparisonError::RemoteValidation`] before any section is built.
pub fn parse_response(text: &str) -> Result<ParsedResponse, ComparisonError> {
    if let Some(reason) = validation_reason(text) {
        log_debug!("Remote validation failed: {}", reason);
        return Err(ComparisonError::RemoteValidation { reason });
    }

    let sections = parse_sections(text);
    let similarity_score = extract_similarity_score(text);

    if sections.is_degraded() {
        log_debug!("No section headers recognized; all lines kept in GENERAL");
    }
    log_debug!(
        "Parsed response: score {}, {} lines in {} sections",
        similarity_score,
        sections.line_count(),
        sections.keys().count()
    );

    Ok(ParsedResponse {
        similarity_score,
        sections,
    })
}

/// Reason following the validation marker, up to the next line break
pub fn validation_reason(text: &str) -> Option<String> {
    let (_, after) = text.split_once(VALIDATION_MARKER)?;
    let reason = after.trim().lines().next().unwrap_or_default();
    Some(reason.trim_end().to_string())
}

/// `SIMILARITY_SCORE: <n>` anywhere in the text, saturated to 100; 0 when absent
pub fn extract_similarity_score(text: &str) -> u8 {
    let Some(digits) = SCORE_PATTERN.captures(text).and_then(|c| c.get(1)) else {
        return 0;
    };

    // ASCII digits only, so the one parse failure left is overflow
    digits
        .as_str()
        .parse::<u32>()
        .map_or(100, |value| u8::try_from(value.min(100)).unwrap_or(100))
}

/// Section keyword a line mentions, if any (leftmost match)
pub fn match_header_keyword(line: &str) -> Option<SectionKey> {
    HEADER_PATTERN
        .find(line)
        .and_then(|m| m.as_str().parse::<SectionKey>().ok())
}

/// Header classification for a trimmed line.
///
/// A line is a header when it mentions a keyword and either contains a colon
/// or is shorter than [`HEADER_MAX_BARE_LEN`] characters. Long prose that
/// merely mentions a keyword stays a content line.
pub fn is_header_line(line: &str) -> Option<SectionKey> {
    let key = match_header_keyword(line)?;
    let short = line.chars().count() < HEADER_MAX_BARE_LEN;
    (line.contains(':') || short).then_some(key)
}

/// Inline content carried on a header line after its label
fn inline_content(line: &str, key: SectionKey) -> Option<String> {
    let fragment = line.rsplit([':', '#', '*']).next().unwrap_or_default().trim();

    if fragment.is_empty() || fragment.eq_ignore_ascii_case(key.as_ref()) {
        None
    } else {
        Some(fragment.to_string())
    }
}

/// Accumulator threaded through the single classification pass
struct SectionFold {
    current: SectionKey,
    sections: BTreeMap<SectionKey, Vec<String>>,
}

impl SectionFold {
    fn new() -> Self {
        Self {
            current: SectionKey::General,
            sections: BTreeMap::new(),
        }
    }

    fn push_line(mut self, line: &str) -> Self {
        if let Some(key) = is_header_line(line) {
            self.current = key;
            let bucket = self.sections.entry(key).or_default();
            if let Some(content) = inline_content(line, key) {
                bucket.push(content);
            }
        } else {
            self.sections
                .entry(self.current)
                .or_default()
                .push(line.to_string());
        }
        self
    }
}

/// Split the text into sections; blank lines are dropped, nothing else is
pub fn parse_sections(text: &str) -> ParsedSections {
    let fold = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .fold(SectionFold::new(), SectionFold::push_line);

    ParsedSections::from_map(fold.sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "SIMILARITY_SCORE: 85\nSCORE_RATIONALE: Both target premium urban commuters.\nKEY_SIMILARITIES:\n* Fast charging\nKEY_DIFFERENCES:\n* Range differs";

    #[test]
    fn test_end_to_end_scenario() {
        let parsed = parse_response(SCENARIO).expect("scenario parses");
        assert_eq!(parsed.similarity_score, 85);
        assert_eq!(
            parsed.sections.lines(SectionKey::ScoreRationale),
            ["Both target premium urban commuters."]
        );
        assert_eq!(
            parsed.sections.lines(SectionKey::KeySimilarities),
            ["* Fast charging"]
        );
        assert_eq!(
            parsed.sections.lines(SectionKey::KeyDifferences),
            ["* Range differs"]
        );
        assert_eq!(
            parsed.sections.lines(SectionKey::General),
            ["SIMILARITY_SCORE: 85"]
        );
    }

    #[test]
    fn test_decorated_headers_route_to_same_bucket() {
        for header in [
            "KEY_SIMILARITIES:",
            "**KEY_SIMILARITIES**",
            "### Key_Similarities",
            "1. KEY_SIMILARITIES:",
            "**KEY_SIMILARITIES**:",
        ] {
            let sections = parse_sections(&format!("{header}\n- Same motor supplier"));
            assert_eq!(
                sections.lines(SectionKey::KeySimilarities),
                ["- Same motor supplier"],
                "header variant {header:?}"
            );
            assert!(!sections.contains(SectionKey::General), "{header:?}");
        }
    }

    #[test]
    fn test_bare_short_header_without_colon() {
        assert_eq!(
            is_header_line("KEY_DIFFERENCES"),
            Some(SectionKey::KeyDifferences)
        );
    }

    #[test]
    fn test_header_length_boundary() {
        // 39 characters, no colon: still a header
        let short = "key_differences are listed here belowxx";
        assert_eq!(short.chars().count(), 39);
        assert_eq!(is_header_line(short), Some(SectionKey::KeyDifferences));

        // 40 characters, no colon: prose
        let long = "key_differences are listed here belowxxx";
        assert_eq!(long.chars().count(), 40);
        assert_eq!(is_header_line(long), None);

        // 40+ characters with a colon: header again
        let with_colon = "key_differences are listed here below: x";
        assert_eq!(is_header_line(with_colon), Some(SectionKey::KeyDifferences));
    }

    #[test]
    fn test_long_prose_mentioning_keyword_is_content() {
        let text = "KEY_SIMILARITIES:\n* Both ship with fast charging\nThe tech_specs table below compares the battery packs in detail";
        let sections = parse_sections(text);
        assert_eq!(
            sections.lines(SectionKey::KeySimilarities),
            [
                "* Both ship with fast charging",
                "The tech_specs table below compares the battery packs in detail"
            ]
        );
        assert!(!sections.contains(SectionKey::TechSpecs));
    }

    #[test]
    fn test_repeated_header_appends() {
        let text = "KEY_DIFFERENCES:\n* Price\nTECH_SPECS:\n| a | b | c |\nKEY_DIFFERENCES: Warranty\n* Range";
        let sections = parse_sections(text);
        assert_eq!(
            sections.lines(SectionKey::KeyDifferences),
            ["* Price", "Warranty", "* Range"]
        );
    }

    #[test]
    fn test_header_without_content_creates_empty_section() {
        let sections = parse_sections("QUALITATIVE_EDGE:\n\n");
        assert_eq!(sections.get(SectionKey::QualitativeEdge), Some(&[] as &[String]));
    }

    #[test]
    fn test_inline_content_equal_to_keyword_is_not_seeded() {
        let sections = parse_sections("## Tech_Specs");
        assert_eq!(sections.lines(SectionKey::TechSpecs).len(), 0);
        assert!(sections.contains(SectionKey::TechSpecs));
    }

    #[test]
    fn test_partition_preserves_every_line_in_order() {
        let text = "intro one\n\n   intro two  \nSCORE_RATIONALE: why\nmore why\nKEY_SIMILARITIES\nsame\nKEY_DIFFERENCES:\ndiff 1\ndiff 2\nQUALITATIVE_EDGE:\nfeel";
        let sections = parse_sections(text);

        assert_eq!(
            sections.lines(SectionKey::General),
            ["intro one", "intro two"]
        );
        assert_eq!(
            sections.lines(SectionKey::ScoreRationale),
            ["why", "more why"]
        );
        assert_eq!(sections.lines(SectionKey::KeySimilarities), ["same"]);
        assert_eq!(
            sections.lines(SectionKey::KeyDifferences),
            ["diff 1", "diff 2"]
        );
        assert_eq!(sections.lines(SectionKey::QualitativeEdge), ["feel"]);

        // 12 lines, 1 blank, 3 label-only headers; the rationale header seeds "why"
        assert_eq!(sections.line_count(), 12 - 1 - 3);
    }

    #[test]
    fn test_no_headers_degrades_to_general() {
        let text = "Line one\nLine two\nLine three";
        let parsed = parse_response(text).expect("plain text parses");
        assert!(parsed.sections.is_degraded());
        assert_eq!(
            parsed.sections.lines(SectionKey::General),
            ["Line one", "Line two", "Line three"]
        );
        assert_eq!(parsed.similarity_score, 0);
    }

    #[test]
    fn test_score_extraction() {
        assert_eq!(extract_similarity_score("SIMILARITY_SCORE: 73"), 73);
        assert_eq!(extract_similarity_score("similarity_score:42"), 42);
        assert_eq!(extract_similarity_score("no score here"), 0);
        assert_eq!(extract_similarity_score("SIMILARITY_SCORE: n/a"), 0);
        assert_eq!(extract_similarity_score("SIMILARITY_SCORE: 250"), 100);
        assert_eq!(
            extract_similarity_score("SIMILARITY_SCORE: 99999999999999999999"),
            100
        );
    }

    #[test]
    fn test_score_ignores_non_ascii_digits() {
        assert_eq!(extract_similarity_score("SIMILARITY_SCORE: \u{0667}\u{0663}"), 0);
        assert_eq!(extract_similarity_score("SIMILARITY_SCORE: \u{FF17}\u{FF13}"), 0);
        assert_eq!(extract_similarity_score("SIMILARITY_SCORE: 7\u{0663}"), 7);
    }

    #[test]
    fn test_header_keyword_matching_is_ascii_only() {
        // Kelvin sign in place of 'K'
        let line = "\u{212A}EY_DIFFERENCES: Range";
        assert_eq!(match_header_keyword(line), None);
        assert_eq!(is_header_line(line), None);
        assert_eq!(
            match_header_keyword("key_differences: Range"),
            Some(SectionKey::KeyDifferences)
        );
    }

    #[test]
    fn test_validation_short_circuit() {
        let err = parse_response("VALIDATION_ERROR: Not a valid two-wheeler\nSCORE_RATIONALE: x")
            .expect_err("validation marker must fail");
        assert_eq!(
            err,
            ComparisonError::RemoteValidation {
                reason: "Not a valid two-wheeler".to_string()
            }
        );
    }

    #[test]
    fn test_validation_reason_after_prose() {
        assert_eq!(
            validation_reason("Sorry.\nVALIDATION_ERROR:\n  Unknown model 'Foo'  \nmore"),
            Some("Unknown model 'Foo'".to_string())
        );
        assert_eq!(validation_reason("all good"), None);
    }
}
