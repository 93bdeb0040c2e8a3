//! OpenAI HTTP client

use super::types::*;
use super::{DEFAULT_BASE_URL, OpenAIOptions, PROVIDER_NAME};
use crate::{
    ChatResponse, EmbeddingOptions, EmbeddingVector, Error, ProviderOptions, Result, TokenUsage,
    providers::provider::{ChatModel, EmbeddingModel, ProviderClient},
};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Url};

/// Client for the OpenAI REST API (and compatible endpoints)
///
/// Construction validates the credential and base URL once; the client is then
/// shared by every role of the provider.
#[derive(Clone, Debug)]
pub struct OpenAIClient {
    client: Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create a client for `api_key`, optionally against a custom base URL
    ///
    /// # Errors
    /// `ClientConstruction` if the key is not usable as a bearer token or the
    /// base URL does not parse.
    pub fn new(api_key: &str, base_url: Option<&str>) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.chars().any(char::is_whitespace) {
            return Err(Error::client_construction(
                PROVIDER_NAME,
                "API key must not contain whitespace",
            ));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
            Error::client_construction(PROVIDER_NAME, format!("Invalid API key: {}", e))
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

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

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        what: &str,
    ) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
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
                "OpenAI {} API error {}: {}",
                what, status, error_text
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatModel for OpenAIClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &ProviderOptions,
    ) -> Result<ChatResponse> {
        let options = match options {
            ProviderOptions::OpenAI(options) => *options,
            other => {
                tracing::warn!(?other, "Ignoring options built for another provider");
                OpenAIOptions::default()
            }
        };

        let request = OpenAIRequest {
            model,
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            options,
        };

        let response: OpenAIResponse = self
            .post("chat/completions", &request, "Chat")
            .await?
            .json()
            .await
            .map_err(|e| Error::LLMError(format!("Failed to parse response: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::LLMError("Response contained no choices".into()))?;

        Ok(ChatResponse {
            content: choice.message.content,
            model: response.model,
            finish_reason: choice.finish_reason,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

#[async_trait]
impl EmbeddingModel for OpenAIClient {
    async fn embed(&self, options: &EmbeddingOptions, text: &str) -> Result<EmbeddingVector> {
        let request = OpenAIEmbeddingRequest {
            model: &options.model,
            input: text,
        };

        let response: OpenAIEmbeddingResponse = self
            .post("embeddings", &request, "Embedding")
            .await?
            .json()
            .await
            .map_err(|e| Error::LLMError(format!("Failed to parse embedding response: {}", e)))?;

        response
            .data
            .into_iter()
            .next()
            .map(|item| EmbeddingVector::new(item.embedding))
            .ok_or_else(|| Error::LLMError("Missing data array".into()))
    }
}

impl ProviderClient for OpenAIClient {
    fn provider(&self) -> &'static str {
        PROVIDER_NAME
    }
}
