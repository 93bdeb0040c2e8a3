//! In-memory provider client for unit tests

use super::provider::{ChatModel, EmbeddingModel, ProviderClient};
use crate::{ChatResponse, EmbeddingOptions, EmbeddingVector, ProviderOptions, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// Echoes requests back and records the options and span it ran under
pub struct StubClient {
    provider: &'static str,
    pub received: Mutex<Vec<ProviderOptions>>,
    /// Name of the span current while each `generate` call ran
    pub spans: Mutex<Vec<Option<&'static str>>>,
}

impl StubClient {
    pub fn new(provider: &'static str) -> Self {
        Self {
            provider,
            received: Mutex::new(Vec::new()),
            spans: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatModel for StubClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &ProviderOptions,
    ) -> Result<ChatResponse> {
        self.received.lock().unwrap().push(options.clone());
        self.spans
            .lock()
            .unwrap()
            .push(tracing::Span::current().metadata().map(|m| m.name()));
        Ok(ChatResponse {
            content: format!("echo: {}", prompt),
            model: model.to_string(),
            finish_reason: Some("stop".to_string()),
            usage: None,
        })
    }
}

#[async_trait]
impl EmbeddingModel for StubClient {
    async fn embed(&self, options: &EmbeddingOptions, text: &str) -> Result<EmbeddingVector> {
        Ok(EmbeddingVector::new(vec![
            text.len() as f32,
            options.model.len() as f32,
        ]))
    }
}

impl ProviderClient for StubClient {
    fn provider(&self) -> &'static str {
        self.provider
    }
}
