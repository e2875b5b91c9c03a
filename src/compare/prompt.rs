use super::parser::VALIDATION_MARKER;
use super::types::ComparisonRequest;
use crate::log_debug;
use std::fmt::Write;

/// Build the single prompt sent for a comparison.
///
/// Both names and the supplemental data are embedded verbatim. The label
/// block mirrors the keywords the response parser recognizes.
pub fn create_comparison_prompt(request: &ComparisonRequest) -> String {
    let model_a = request.model_a();
    let model_b = request.model_b();

    let mut prompt = format!(
        "As an expert EV automotive industry analyst, compare:\n\
        1. {model_a}\n\
        2. {model_b}\n\n"
    );

    if let Some(data) = request.supplemental_text() {
        write!(prompt, "Reference this supplemental data:\n{data}\n\n")
            .expect("writing to string should never fail");
    }

    write!(
        prompt,
        "CRITICAL VALIDATION:\n\
        Verify if both are valid electric two-wheelers. If invalid, start with: \"{VALIDATION_MARKER} [Reason]\".\n\n\
        IF VALID, YOU MUST USE THE EXACT LABELS BELOW WITHOUT ANY NUMBERS, BOLDING, OR MARKDOWN PREFIXES ON THE LABEL LINES:\n\n\
        SIMILARITY_SCORE: [0-100]\n\
        SCORE_RATIONALE: [One sentence explaining why this specific score was given]\n\
        KEY_SIMILARITIES:\n\
        * [Similarity 1]\n\
        * [Similarity 2]\n\
        KEY_DIFFERENCES:\n\
        * [Difference 1]\n\
        * [Difference 2]\n\
        TECH_SPECS:\n\
        | Feature | {model_a} | {model_b} |\n\
        |---|---|---|\n\
        | Battery | ... | ... |\n\
        QUALITATIVE_EDGE:\n\
        * [UI/UX Comment]\n\
        * [Build/Ride Comment]\n\n\
        STRICT RULES:\n\
        - Do not use \"1.\", \"2.\" etc. before the labels.\n\
        - Labels must be on their own line or followed immediately by a colon.\n\
        - Keep the output crisp and professional.\n"
    )
    .expect("writing to string should never fail");

    log_debug!("Comparison prompt assembled: {} chars", prompt.len());
    prompt
}
