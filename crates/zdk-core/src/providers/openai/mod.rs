//! OpenAI provider
//!
//! Supports:
//! - Text generation: gpt-4o, gpt-4o-mini, and OpenAI-compatible endpoints
//! - Embeddings: text-embedding-3-small, text-embedding-3-large

pub mod client;
pub mod options;
pub mod types;

pub use client::OpenAIClient;
pub use options::{OpenAIOptions, OpenAIOptionsConverter};

use crate::{
    OptionsConverter, ProviderProperties, Result,
    providers::{ProviderBackend, ProviderClient},
};
use std::sync::Arc;

/// Provider tag carried by every OpenAI resource
pub const PROVIDER_NAME: &str = "OpenAI";

/// Environment key gating OpenAI activation
pub const CREDENTIAL_KEY: &str = "OPENAI_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Activation backend for OpenAI (`[providers.openai]`)
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAIBackend;

impl ProviderBackend for OpenAIBackend {
    fn provider(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn config_key(&self) -> &'static str {
        "openai"
    }

    fn credential_key(&self) -> &'static str {
        CREDENTIAL_KEY
    }

    fn connect(&self, properties: &ProviderProperties) -> Result<Arc<dyn ProviderClient>> {
        let client = OpenAIClient::new(properties.api_key(), properties.base_url())?;
        Ok(Arc::new(client))
    }

    fn options_converter(&self) -> Arc<dyn OptionsConverter> {
        Arc::new(OpenAIOptionsConverter)
    }
}
