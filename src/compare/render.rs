//! Terminal rendering of comparison results
//!
//! Each themed section of a [`ComparisonResult`] becomes a coloured block.
//! Sections the response never produced are skipped, and the GENERAL bucket
//! is never shown.

use super::specs::{SpecRow, extract_spec_rows};
use super::types::{Citation, ComparisonResult, SectionKey};
use crate::ui::rgb::{
    ACCENT_CYAN, AMBER, DIM_SEPARATOR, DIM_WHITE, EMERALD, ERROR_RED, ORANGE, TEXT,
};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

const WRAP_WIDTH: usize = 88;
const GAUGE_CELLS: usize = 20;
const CITATION_TITLE_MAX: usize = 25;

/// Score bands used for the gauge colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            71.. => Self::High,
            41..=70 => Self::Medium,
            _ => Self::Low,
        }
    }

    fn color(self) -> (u8, u8, u8) {
        match self {
            Self::High => EMERALD,
            Self::Medium => AMBER,
            Self::Low => ERROR_RED,
        }
    }
}

/// One-line reading of a similarity score
pub fn verdict(score: u8) -> &'static str {
    match score {
        81.. => "These models are highly direct competitors.",
        51..=80 => "Significant overlap in target segments.",
        _ => "Distinct categories or value propositions.",
    }
}

/// Citation title shortened for display
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > CITATION_TITLE_MAX {
        let head: String = title.chars().take(CITATION_TITLE_MAX).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

/// Filled and empty gauge cells for a score
fn gauge_cells(score: u8) -> (usize, usize) {
    let filled = usize::from(score.min(100)) * GAUGE_CELLS / 100;
    (filled, GAUGE_CELLS - filled)
}

fn paint(text: &str, color: (u8, u8, u8)) -> colored::ColoredString {
    text.truecolor(color.0, color.1, color.2)
}

fn section_heading(output: &mut String, title: &str, color: (u8, u8, u8)) {
    writeln!(
        output,
        "\n{} {} {}",
        paint("─", color),
        paint(&title.to_uppercase(), color).bold(),
        paint(
            &"─".repeat(60usize.saturating_sub(title.len())),
            DIM_SEPARATOR
        )
    )
    .expect("write to string should not fail");
}

fn write_bullets(output: &mut String, items: &[String], bullet_color: (u8, u8, u8)) {
    for item in items {
        let wrapped = textwrap::wrap(item, WRAP_WIDTH - 4);
        for (i, line) in wrapped.iter().enumerate() {
            let bullet = if i == 0 { "•" } else { " " };
            writeln!(output, "  {} {}", paint(bullet, bullet_color), paint(line, TEXT))
                .expect("write to string should not fail");
        }
    }
}

fn write_score(output: &mut String, result: &ComparisonResult) {
    let band = ScoreBand::from_score(result.similarity_score);
    let (filled, empty) = gauge_cells(result.similarity_score);

    writeln!(
        output,
        "\n  {} {}{} {}",
        paint("MARKET SCORE", ACCENT_CYAN).bold(),
        paint(&"█".repeat(filled), band.color()),
        paint(&"░".repeat(empty), DIM_SEPARATOR),
        paint(&format!("{}/100", result.similarity_score), band.color()).bold()
    )
    .expect("write to string should not fail");
    writeln!(
        output,
        "  {}",
        paint(verdict(result.similarity_score), DIM_WHITE).italic()
    )
    .expect("write to string should not fail");

    let rationale = result.sections.lines(SectionKey::ScoreRationale);
    if !rationale.is_empty() {
        writeln!(output).expect("write to string should not fail");
        for line in textwrap::wrap(&rationale.join(" "), WRAP_WIDTH - 4) {
            writeln!(output, "  {} {}", paint("▎", ACCENT_CYAN), paint(&line, DIM_WHITE).italic())
                .expect("write to string should not fail");
        }
    }
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(cell));
    format!("{cell}{}", " ".repeat(fill))
}

/// Render the spec table with aligned columns
pub fn format_spec_table(model_a: &str, model_b: &str, rows: &[SpecRow]) -> String {
    let mut output = String::new();
    let rows: Vec<&SpecRow> = rows.iter().filter(|row| !row.is_header_row()).collect();
    if rows.is_empty() {
        return output;
    }

    let widths = rows.iter().fold(
        [
            "FEATURE".width(),
            model_a.width(),
            model_b.width(),
        ],
        |[f, a, b], row| {
            [
                f.max(row.feature.width()),
                a.max(row.model_a.width()),
                b.max(row.model_b.width()),
            ]
        },
    );

    writeln!(
        output,
        "  {}  {}  {}",
        paint(&pad("FEATURE", widths[0]), DIM_WHITE).bold(),
        paint(&pad(&model_a.to_uppercase(), widths[1]), DIM_WHITE).bold(),
        paint(&pad(&model_b.to_uppercase(), widths[2]), DIM_WHITE).bold()
    )
    .expect("write to string should not fail");
    writeln!(
        output,
        "  {}",
        paint(&"─".repeat(widths.iter().sum::<usize>() + 4), DIM_SEPARATOR)
    )
    .expect("write to string should not fail");

    for row in rows {
        writeln!(
            output,
            "  {}  {}  {}",
            paint(&pad(&row.feature, widths[0]), DIM_WHITE).bold(),
            paint(&pad(&row.model_a, widths[1]), TEXT),
            paint(&pad(&row.model_b, widths[2]), TEXT)
        )
        .expect("write to string should not fail");
    }

    output
}

fn write_citations(output: &mut String, citations: &[Citation]) {
    if citations.is_empty() {
        return;
    }

    writeln!(output, "\n  {}", paint("VERIFIED VIA:", DIM_SEPARATOR).bold())
        .expect("write to string should not fail");
    for citation in citations {
        writeln!(
            output,
            "    {} {}",
            paint(&truncate_title(&citation.title), DIM_WHITE),
            paint(&citation.uri, DIM_SEPARATOR).underline()
        )
        .expect("write to string should not fail");
    }
}

/// Render the full report for the terminal
pub fn format_report(result: &ComparisonResult) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "{}  {}  {}",
        paint(&result.model_a, TEXT).bold(),
        paint("VS", DIM_SEPARATOR),
        paint(&result.model_b, TEXT).bold()
    )
    .expect("write to string should not fail");

    write_score(&mut output, result);

    if result.sections.contains(SectionKey::KeySimilarities) {
        section_heading(&mut output, "Common Ground", EMERALD);
        write_bullets(&mut output, &result.items(SectionKey::KeySimilarities), EMERALD);
    }

    if result.sections.contains(SectionKey::KeyDifferences) {
        section_heading(&mut output, "Key Contrasts", ORANGE);
        write_bullets(&mut output, &result.items(SectionKey::KeyDifferences), ORANGE);
    }

    let rows = extract_spec_rows(result.sections.lines(SectionKey::TechSpecs));
    let table = format_spec_table(&result.model_a, &result.model_b, &rows);
    if !table.is_empty() {
        section_heading(&mut output, "Hard Specification Comparison", DIM_WHITE);
        output.push_str(&table);
    }

    if result.sections.contains(SectionKey::QualitativeEdge) {
        section_heading(&mut output, "Qualitative Benchmarking (Software & UX)", ACCENT_CYAN);
        write_bullets(&mut output, &result.items(SectionKey::QualitativeEdge), ACCENT_CYAN);
    }

    write_citations(&mut output, &result.citations);

    output
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a ComparisonResult,
    spec_rows: Vec<SpecRow>,
}

/// Render the result (plus extracted spec rows) as pretty JSON
pub fn format_json(result: &ComparisonResult) -> Result<String> {
    let report = JsonReport {
        result,
        spec_rows: extract_spec_rows(result.sections.lines(SectionKey::TechSpecs)),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
