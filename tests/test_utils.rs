#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;
use twin_track::compare::{ComparisonService, GenerationSettings};
use twin_track::llm_providers::{
    GenerationOutput, GenerationRequest, GroundingChunk, LLMProvider, WebSource,
};

pub const SCENARIO_RESPONSE: &str = "SIMILARITY_SCORE: 85
SCORE_RATIONALE: Both target premium urban commuters.
KEY_SIMILARITIES:
* Fast charging
KEY_DIFFERENCES:
* Range differs";

/// Provider double that answers from a script and records what it was asked
#[derive(Clone, Default)]
pub struct StubProvider {
    text: Option<String>,
    chunks: Vec<GroundingChunk>,
    failure: Option<String>,
    gate: Option<Arc<Notify>>,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<GenerationRequest>>>,
}

impl StubProvider {
    pub fn answering(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_sources(mut self, sources: &[(&str, &str)]) -> Self {
        self.chunks = sources
            .iter()
            .map(|(title, uri)| GroundingChunk {
                web: Some(WebSource {
                    title: Some((*title).to_string()),
                    uri: Some((*uri).to_string()),
                }),
            })
            .collect();
        self
    }

    /// Hold every call until the gate is notified
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().clone()
    }
}

#[async_trait]
impl LLMProvider for StubProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock() = Some(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if let Some(message) = &self.failure {
            return Err(anyhow!(message.clone()));
        }

        Ok(GenerationOutput {
            text: self.text.clone(),
            grounding_chunks: self.chunks.clone(),
        })
    }
}

pub fn default_settings() -> GenerationSettings {
    GenerationSettings {
        temperature: 0.1,
        search_grounding: true,
    }
}

/// A service over a clone of `provider`, so the test keeps its handle
pub fn service_with(provider: &StubProvider) -> ComparisonService {
    ComparisonService::new(Box::new(provider.clone()), default_settings())
}
