//! OpenAI chat options and conversion from [`LlmOptions`]

use crate::{LlmOptions, OptionsConverter, ProviderOptions};
use serde::{Deserialize, Serialize};

/// Tuning fields accepted by the chat completions endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAIOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
}

/// Converter for OpenAI; `top_k` has no OpenAI equivalent and is dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAIOptionsConverter;

impl OptionsConverter for OpenAIOptionsConverter {
    fn convert(&self, options: &LlmOptions) -> ProviderOptions {
        ProviderOptions::OpenAI(OpenAIOptions {
            temperature: options.temperature,
            top_p: options.top_p,
            max_tokens: options.max_tokens,
            presence_penalty: options.presence_penalty,
            frequency_penalty: options.frequency_penalty,
        })
    }

    fn supported_fields(&self) -> &'static [&'static str] {
        &[
            "temperature",
            "top_p",
            "max_tokens",
            "presence_penalty",
            "frequency_penalty",
        ]
    }
}
