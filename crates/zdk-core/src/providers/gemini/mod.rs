//! Google Gemini provider
//!
//! Supports:
//! - Text generation: gemini-2.0-flash, gemini-1.5-pro, etc.
//! - Embeddings: text-embedding-004

pub mod client;
pub mod options;
pub mod types;

pub use client::GeminiClient;
pub use options::{GeminiOptions, GeminiOptionsConverter};

use crate::{
    OptionsConverter, ProviderProperties, Result,
    providers::{ProviderBackend, ProviderClient},
};
use std::sync::Arc;

/// Provider tag carried by every Gemini resource
pub const PROVIDER_NAME: &str = "Gemini";

/// Environment key gating Gemini activation
pub const CREDENTIAL_KEY: &str = "GEMINI_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Activation backend for Gemini (`[providers.gemini]`)
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiBackend;

impl ProviderBackend for GeminiBackend {
    fn provider(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn config_key(&self) -> &'static str {
        "gemini"
    }

    fn credential_key(&self) -> &'static str {
        CREDENTIAL_KEY
    }

    fn connect(&self, properties: &ProviderProperties) -> Result<Arc<dyn ProviderClient>> {
        let client = GeminiClient::new(properties.api_key(), properties.base_url())?;
        Ok(Arc::new(client))
    }

    fn options_converter(&self) -> Arc<dyn OptionsConverter> {
        Arc::new(GeminiOptionsConverter)
    }
}
