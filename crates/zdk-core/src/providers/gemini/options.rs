//! Gemini generation config and conversion from [`LlmOptions`]

use crate::{LlmOptions, OptionsConverter, ProviderOptions};
use serde::{Deserialize, Serialize};

/// `generationConfig` fields sent to Gemini
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GeminiOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Converter for Gemini; presence and frequency penalties are dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiOptionsConverter;

impl OptionsConverter for GeminiOptionsConverter {
    fn convert(&self, options: &LlmOptions) -> ProviderOptions {
        ProviderOptions::Gemini(GeminiOptions {
            temperature: options.temperature,
            top_p: options.top_p,
            top_k: options.top_k,
            max_output_tokens: options.max_tokens,
        })
    }

    fn supported_fields(&self) -> &'static [&'static str] {
        &["temperature", "top_p", "top_k", "max_tokens"]
    }
}
