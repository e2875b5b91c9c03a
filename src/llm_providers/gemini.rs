use super::{
    GenerationOutput, GenerationRequest, GroundingChunk, LLMProvider, LLMProviderConfig,
    ProviderMetadata,
};
use crate::log_debug;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Represents the Gemini LLM provider
pub struct GeminiProvider {
    config: LLMProviderConfig,
    client: Client,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GeminiProvider {
    /// Creates a new instance of `GeminiProvider` with the given configuration
    pub fn new(config: LLMProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { config, client })
    }

    fn model(&self) -> &str {
        if self.config.model.is_empty() {
            DEFAULT_MODEL
        } else {
            &self.config.model
        }
    }

    fn endpoint(&self) -> Result<Url> {
        let base = if self.config.base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            self.config.base_url.as_str()
        };

        // Url::join replaces the last path segment unless the base ends with '/'
        let base = Url::parse(&format!("{}/", base.trim_end_matches('/')))
            .with_context(|| format!("Invalid Gemini base URL: {base}"))?;

        base.join(&format!("v1beta/models/{}:generateContent", self.model()))
            .context("Failed to build Gemini endpoint URL")
    }

    fn request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        let mut body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": request.prompt }]
                }
            ],
            "generationConfig": {
                "temperature": request.temperature
            }
        });

        // Additional parameters from the configuration; numbers stay numbers
        for (key, value) in &self.config.additional_params {
            if let Ok(num_val) = value.parse::<f64>() {
                body["generationConfig"][key] = json!(num_val);
            } else {
                body["generationConfig"][key] = json!(value);
            }
        }

        if request.search_grounding {
            body["tools"] = json!([{ "google_search": {} }]);
        }

        body
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    /// Generates content using the Gemini API
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput> {
        let url = self.endpoint()?;
        log_debug!(
            "Gemini request: model {}, temperature {}, grounding {}",
            self.model(),
            request.temperature,
            request.search_grounding
        );

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        // Check for successful response
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => anyhow!(envelope.error.message),
                Err(_) => anyhow!("Gemini API request failed with status {}: {}", status, text),
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to decode Gemini API response")?;

        let Some(candidate) = body.candidates.into_iter().next() else {
            log_debug!("Gemini response carried no candidates");
            return Ok(GenerationOutput::default());
        };

        let text = candidate.content.map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        });

        let grounding_chunks = candidate
            .grounding_metadata
            .map(|meta| meta.grounding_chunks)
            .unwrap_or_default();

        log_debug!(
            "Gemini response: {} chars, {} grounding chunks",
            text.as_deref().map_or(0, str::len),
            grounding_chunks.len()
        );

        Ok(GenerationOutput {
            text,
            grounding_chunks,
        })
    }
}

pub(super) fn get_metadata() -> ProviderMetadata {
    ProviderMetadata {
        name: "Gemini",
        default_model: DEFAULT_MODEL,
        default_base_url: DEFAULT_BASE_URL,
        api_key_env: &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
    }
}
