use super::citations::extract_citations;
use super::error::ComparisonError;
use super::parser::parse_response;
use super::prompt::create_comparison_prompt;
use super::types::{ComparisonRequest, ComparisonResult, RawResponse};
use crate::config::Config;
use crate::llm_providers::{GeminiProvider, GenerationRequest, LLMProvider};
use crate::log_debug;
use anyhow::Result;

/// Generation settings for a comparison call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub search_grounding: bool,
}

/// Runs comparisons against a remote provider
pub struct ComparisonService {
    provider: Box<dyn LLMProvider>,
    settings: GenerationSettings,
}

impl ComparisonService {
    /// Create a service around any provider (tests inject their own)
    pub fn new(provider: Box<dyn LLMProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Create a service backed by Gemini using the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = GeminiProvider::new(config.provider_settings()?)?;
        Ok(Self::new(
            Box::new(provider),
            GenerationSettings {
                temperature: config.generation.temperature,
                search_grounding: config.generation.search_grounding,
            },
        ))
    }

    /// Perform the single remote exchange and return the unparsed answer
    pub async fn fetch_raw(&self, request: &ComparisonRequest) -> Result<RawResponse, ComparisonError> {
        let generation = GenerationRequest {
            prompt: create_comparison_prompt(request),
            temperature: self.settings.temperature,
            search_grounding: self.settings.search_grounding,
        };

        let output = self.provider.generate(&generation).await.map_err(|e| {
            log_debug!("Remote call failed: {:#}", e);
            ComparisonError::remote_call(&e)
        })?;

        let citations = extract_citations(&output.grounding_chunks);
        Ok(RawResponse::new(output.text, citations))
    }

    /// Compare the two models of `request`
    #[tracing::instrument(
        name = "comparison",
        skip_all,
        fields(model_a = %request.model_a(), model_b = %request.model_b())
    )]
    pub async fn compare(
        &self,
        request: &ComparisonRequest,
    ) -> Result<ComparisonResult, ComparisonError> {
        log_debug!(
            "Comparing '{}' with '{}' (supplemental data: {})",
            request.model_a(),
            request.model_b(),
            request.supplemental_text().is_some()
        );

        let raw = self.fetch_raw(request).await?;
        build_result(request.model_a(), request.model_b(), raw)
    }
}

/// Parse a raw answer into a result for the two named models
pub fn build_result(
    model_a: &str,
    model_b: &str,
    raw: RawResponse,
) -> Result<ComparisonResult, ComparisonError> {
    let parsed = parse_response(&raw.text)?;

    Ok(ComparisonResult {
        model_a: model_a.to_string(),
        model_b: model_b.to_string(),
        similarity_score: parsed.similarity_score,
        sections: parsed.sections,
        citations: raw.citations,
    })
}
