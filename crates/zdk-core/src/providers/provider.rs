//! Client capability traits
//!
//! Every provider client exposes text generation and embeddings through these
//! traits. Request/response wire formats stay inside each client.

use crate::{ChatResponse, EmbeddingOptions, EmbeddingVector, ProviderOptions, Result};
use async_trait::async_trait;

/// Text generation capability
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate one complete response for `prompt` using `model`
    ///
    /// # Arguments
    /// * `model` - Provider model identifier
    /// * `prompt` - User prompt text
    /// * `options` - Tuning payload produced by the provider's converter
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &ProviderOptions,
    ) -> Result<ChatResponse>;
}

/// Embedding capability
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Embed a single text
    async fn embed(&self, options: &EmbeddingOptions, text: &str) -> Result<EmbeddingVector>;
}

/// A constructed provider client, shared by every role of its provider
pub trait ProviderClient: ChatModel + EmbeddingModel {
    /// Provider tag (e.g. "OpenAI")
    fn provider(&self) -> &'static str;
}
