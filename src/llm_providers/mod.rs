//! Remote text-generation providers.
//!
//! The comparison core only sees [`LLMProvider`]; the Gemini implementation
//! is the one shipped backend.

mod gemini;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub use gemini::GeminiProvider;

/// A single generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    /// Ask the service to ground its answer with web search
    pub search_grounding: bool,
}

/// A web page the service used while answering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// One entry of the grounding metadata; only web entries are used
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

/// What came back from the provider, before any interpretation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    pub text: Option<String>,
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// Trait for remote text-generation backends
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Run one request/response exchange
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput>;
}

/// Connection settings handed to a provider
#[derive(Debug, Clone)]
pub struct LLMProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub additional_params: HashMap<String, String>,
}

/// Static facts about a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub name: &'static str,
    pub default_model: &'static str,
    pub default_base_url: &'static str,
    pub api_key_env: &'static [&'static str],
}

/// Metadata of the Gemini backend
pub fn gemini_metadata() -> ProviderMetadata {
    gemini::get_metadata()
}
