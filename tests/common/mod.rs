//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use zdk_core::{
    ChatModel, ChatResponse, EmbeddingModel, EmbeddingOptions, EmbeddingVector, OptionsConverter,
    ProviderBackend, ProviderClient, ProviderOptions, ProviderProperties, ProviderSettings, Result,
    providers::OpenAIOptionsConverter,
};

/// Build an environment view from literal pairs
pub fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Complete settings with no api_key, so the environment credential fills it
pub fn model_settings(workhorse: &str, premium: &str, embedding: &str) -> ProviderSettings {
    ProviderSettings {
        api_key: None,
        base_url: None,
        workhorse_model: Some(workhorse.to_string()),
        premium_model: Some(premium.to_string()),
        embedding_model: Some(embedding.to_string()),
    }
}

/// Client that answers without any network access
pub struct FakeClient {
    provider: &'static str,
}

#[async_trait]
impl ChatModel for FakeClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        _options: &ProviderOptions,
    ) -> Result<ChatResponse> {
        Ok(ChatResponse {
            content: format!("{model} says: {prompt}"),
            model: model.to_string(),
            finish_reason: Some("stop".to_string()),
            usage: None,
        })
    }
}

#[async_trait]
impl EmbeddingModel for FakeClient {
    async fn embed(&self, _options: &EmbeddingOptions, text: &str) -> Result<EmbeddingVector> {
        Ok(EmbeddingVector::new(vec![text.len() as f32; 4]))
    }
}

impl ProviderClient for FakeClient {
    fn provider(&self) -> &'static str {
        self.provider
    }
}

/// Backend that counts how many clients it has built
pub struct CountingBackend {
    pub provider: &'static str,
    pub config_key: &'static str,
    pub credential_key: &'static str,
    pub connects: Arc<AtomicUsize>,
}

impl CountingBackend {
    pub fn new(
        provider: &'static str,
        config_key: &'static str,
        credential_key: &'static str,
    ) -> Self {
        Self {
            provider,
            config_key,
            credential_key,
            connects: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter, readable after the backend moves into a registrar
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.connects)
    }
}

impl ProviderBackend for CountingBackend {
    fn provider(&self) -> &'static str {
        self.provider
    }

    fn config_key(&self) -> &'static str {
        self.config_key
    }

    fn credential_key(&self) -> &'static str {
        self.credential_key
    }

    fn connect(&self, _properties: &ProviderProperties) -> Result<Arc<dyn ProviderClient>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeClient {
            provider: self.provider,
        }))
    }

    fn options_converter(&self) -> Arc<dyn OptionsConverter> {
        Arc::new(OpenAIOptionsConverter)
    }
}
