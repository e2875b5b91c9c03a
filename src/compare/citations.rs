use super::types::Citation;
use crate::llm_providers::GroundingChunk;

/// Title used when a grounding source carries none
pub const DEFAULT_CITATION_TITLE: &str = "Source";

/// Web citations from grounding metadata.
///
/// Chunks without a web source are skipped; order is kept and duplicates stay.
pub fn extract_citations(chunks: &[GroundingChunk]) -> Vec<Citation> {
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| Citation {
            title: web
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_CITATION_TITLE.to_string()),
            uri: web.uri.clone().unwrap_or_default(),
        })
        .collect()
}
