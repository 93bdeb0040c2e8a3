//! Gemini HTTP client

use super::types::*;
use super::{DEFAULT_BASE_URL, PROVIDER_NAME};
use crate::{
    ChatResponse, EmbeddingOptions, EmbeddingVector, Error, ProviderOptions, Result, TokenUsage,
    providers::provider::{ChatModel, EmbeddingModel, ProviderClient},
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generativelanguage` API
#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for `api_key`, optionally against a custom base URL
    ///
    /// # Errors
    /// `ClientConstruction` if the key is not a valid header value or the base
    /// URL does not parse.
    pub fn new(api_key: &str, base_url: Option<&str>) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.chars().any(char::is_whitespace) {
            return Err(Error::client_construction(
                PROVIDER_NAME,
                "API key must not contain whitespace",
            ));
        }

        let mut key = HeaderValue::from_str(api_key).map_err(|e| {
            Error::client_construction(PROVIDER_NAME, format!("Invalid API key: {}", e))
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let base_url = base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        Url::parse(base_url).map_err(|e| {
            Error::client_construction(
                PROVIDER_NAME,
                format!("Invalid base URL '{}': {}", base_url, e),
            )
        })?;

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::client_construction(PROVIDER_NAME, e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/{}:{}", self.base_url, model, method)
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        what: &str,
    ) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::LLMError(format!("{} request failed: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::LLMError(format!(
                "Gemini {} API error {}: {}",
                what, status, error_text
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &ProviderOptions,
    ) -> Result<ChatResponse> {
        let generation_config = match options {
            ProviderOptions::Gemini(options) if options.is_empty() => None,
            ProviderOptions::Gemini(options) => Some(*options),
            other => {
                tracing::warn!(?other, "Ignoring options built for another provider");
                None
            }
        };

        let request = GeminiRequest {
            contents: vec![GeminiContent::user_text(prompt)],
            generation_config,
        };

        let url = self.build_url(model, "generateContent");
        let response: GeminiResponse = self
            .post(&url, &request, "Chat")
            .await?
            .json()
            .await
            .map_err(|e| Error::LLMError(format!("Failed to parse response: {}", e)))?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::LLMError("Response contained no candidates".into()))?;

        let content = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        Ok(ChatResponse {
            content,
            model: response.model_version.unwrap_or_else(|| model.to_string()),
            finish_reason: candidate.finish_reason,
            usage: response.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count.unwrap_or(0),
                completion_tokens: u.candidates_token_count.unwrap_or(0),
                total_tokens: u.total_token_count.unwrap_or(0),
            }),
        })
    }
}

#[async_trait]
impl EmbeddingModel for GeminiClient {
    async fn embed(&self, options: &EmbeddingOptions, text: &str) -> Result<EmbeddingVector> {
        let request = GeminiEmbeddingRequest {
            model: format!("models/{}", options.model),
            content: GeminiContent {
                role: None,
                ..GeminiContent::user_text(text)
            },
        };

        let url = self.build_url(&options.model, "embedContent");
        let response: GeminiEmbeddingResponse = self
            .post(&url, &request, "Embedding")
            .await?
            .json()
            .await
            .map_err(|e| Error::LLMError(format!("Failed to parse embedding response: {}", e)))?;

        Ok(EmbeddingVector::new(response.embedding.values))
    }
}

impl ProviderClient for GeminiClient {
    fn provider(&self) -> &'static str {
        PROVIDER_NAME
    }
}
