//! Role-keyed registry of model resources
//!
//! Filled once at startup by the [`ProviderRegistrar`](super::ProviderRegistrar)
//! and read-only afterwards.

use super::provider::ProviderClient;
use crate::{
    ChatResponse, Document, EmbeddingOptions, EmbeddingVector, Error, LlmOptions, MetadataMode,
    OptionsConverter, ProviderOptions, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Instrument;
use zdk_telemetry::{LLMSpanAttributes, trace_llm_call};

/// Named purpose of a model within the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelRole {
    /// General-purpose chat model
    Workhorse,
    /// Higher-capability chat model
    Premium,
    /// Vector embedding model
    Embedding,
}

impl ModelRole {
    pub const ALL: [ModelRole; 3] = [
        ModelRole::Workhorse,
        ModelRole::Premium,
        ModelRole::Embedding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelRole::Workhorse => "workhorse",
            ModelRole::Premium => "premium",
            ModelRole::Embedding => "embedding",
        }
    }

    pub fn is_chat(&self) -> bool {
        !matches!(self, ModelRole::Embedding)
    }
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "workhorse" => Ok(ModelRole::Workhorse),
            "premium" => Ok(ModelRole::Premium),
            "embedding" => Ok(ModelRole::Embedding),
            other => Err(Error::config_error(format!("Unknown model role: {}", other))),
        }
    }
}

#[derive(Clone)]
enum ResourceKind {
    Chat {
        converter: Arc<dyn OptionsConverter>,
    },
    Embedding {
        options: EmbeddingOptions,
        metadata_mode: MetadataMode,
    },
}

/// Handle to one registered model: `{name, role, provider tag, client, converter}`
///
/// Immutable once built; shared as `Arc<NamedModelResource>`.
#[derive(Clone)]
pub struct NamedModelResource {
    name: String,
    role: ModelRole,
    provider: &'static str,
    client: Arc<dyn ProviderClient>,
    kind: ResourceKind,
}

impl NamedModelResource {
    /// Chat resource (workhorse or premium) bound to `converter`
    pub fn chat(
        role: ModelRole,
        model: impl Into<String>,
        provider: &'static str,
        client: Arc<dyn ProviderClient>,
        converter: Arc<dyn OptionsConverter>,
    ) -> Self {
        Self {
            name: model.into(),
            role,
            provider,
            client,
            kind: ResourceKind::Chat { converter },
        }
    }

    /// Embedding resource; requests carry the model identifier only
    pub fn embedding(
        model: impl Into<String>,
        provider: &'static str,
        client: Arc<dyn ProviderClient>,
        metadata_mode: MetadataMode,
    ) -> Self {
        let name = model.into();
        Self {
            kind: ResourceKind::Embedding {
                options: EmbeddingOptions::new(name.clone()),
                metadata_mode,
            },
            name,
            role: ModelRole::Embedding,
            provider,
            client,
        }
    }

    /// Model identifier
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> ModelRole {
        self.role
    }

    /// Provider tag (e.g. "OpenAI")
    pub fn provider(&self) -> &'static str {
        self.provider
    }

    /// The underlying client, shared with the provider's other roles
    pub fn client(&self) -> &Arc<dyn ProviderClient> {
        &self.client
    }

    /// Options converter, for chat roles
    pub fn converter(&self) -> Option<&Arc<dyn OptionsConverter>> {
        match &self.kind {
            ResourceKind::Chat { converter } => Some(converter),
            ResourceKind::Embedding { .. } => None,
        }
    }

    /// Metadata mode, for the embedding role
    pub fn metadata_mode(&self) -> Option<MetadataMode> {
        match &self.kind {
            ResourceKind::Embedding { metadata_mode, .. } => Some(*metadata_mode),
            ResourceKind::Chat { .. } => None,
        }
    }

    /// Convert caller options into this provider's payload (chat roles only)
    pub fn options(&self, options: &LlmOptions) -> Option<ProviderOptions> {
        self.converter().map(|converter| converter.convert(options))
    }

    /// Generate a response for `prompt`
    ///
    /// Options the provider does not support are dropped, never rejected.
    pub async fn generate(&self, prompt: &str, options: &LlmOptions) -> Result<ChatResponse> {
        let ResourceKind::Chat { converter } = &self.kind else {
            return Err(self.unsupported("generate"));
        };

        let dropped = converter.unsupported_fields(options);
        if !dropped.is_empty() {
            tracing::debug!(
                provider = self.provider,
                model = %self.name,
                ?dropped,
                "Ignoring options unsupported by provider"
            );
        }

        let provider_options = converter.convert(options);

        let span = trace_llm_call(LLMSpanAttributes {
            provider: self.provider.to_string(),
            model: self.name.clone(),
            role: self.role.to_string(),
            temperature: options.temperature.map(f64::from),
            top_p: options.top_p.map(f64::from),
            max_tokens: options.max_tokens.map(i64::from),
        });

        self.client
            .generate(&self.name, prompt, &provider_options)
            .instrument(span)
            .await
    }

    /// Embed `text` with this resource's model
    pub async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        let ResourceKind::Embedding { options, .. } = &self.kind else {
            return Err(self.unsupported("embed"));
        };

        self.client.embed(options, text).await
    }

    /// Embed a document, folding metadata in according to the metadata mode
    pub async fn embed_document(&self, document: &Document) -> Result<EmbeddingVector> {
        let ResourceKind::Embedding {
            options,
            metadata_mode,
        } = &self.kind
        else {
            return Err(self.unsupported("embed_document"));
        };

        let text = document.formatted_content(*metadata_mode);
        self.client.embed(options, &text).await
    }

    fn unsupported(&self, operation: &str) -> Error {
        Error::UnsupportedOperation(format!(
            "{} is not available on the {} role of {} ({})",
            operation, self.role, self.provider, self.name
        ))
    }
}

impl fmt::Debug for NamedModelResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedModelResource")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("provider", &self.provider)
            .field("metadata_mode", &self.metadata_mode())
            .finish_non_exhaustive()
    }
}

/// Registry of model resources keyed by `(provider, role)`
#[derive(Debug, Default, Clone)]
pub struct ModelRegistry {
    resources: HashMap<(&'static str, ModelRole), Arc<NamedModelResource>>,
    providers: Vec<&'static str>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register all of one provider's resources, or none of them
    ///
    /// # Errors
    /// Returns a configuration error if the batch mixes providers, repeats a
    /// role, or the provider is already registered.
    pub fn register_provider(&mut self, resources: Vec<NamedModelResource>) -> Result<()> {
        let Some(provider) = resources.first().map(NamedModelResource::provider) else {
            return Ok(());
        };

        if self.providers.contains(&provider) {
            return Err(Error::config_error(format!(
                "Provider '{}' is already registered",
                provider
            )));
        }

        let mut batch: HashMap<(&'static str, ModelRole), Arc<NamedModelResource>> =
            HashMap::new();
        for resource in resources {
            if resource.provider() != provider {
                return Err(Error::config_error(format!(
                    "Resource '{}' belongs to provider '{}', expected '{}'",
                    resource.name(),
                    resource.provider(),
                    provider
                )));
            }
            let key = (provider, resource.role());
            if batch.contains_key(&key) {
                return Err(Error::config_error(format!(
                    "Role '{}' registered twice for provider '{}'",
                    resource.role(),
                    provider
                )));
            }
            batch.insert(key, Arc::new(resource));
        }

        self.resources.extend(batch);
        self.providers.push(provider);
        Ok(())
    }

    /// Resource for `role` of a specific provider
    pub fn get(&self, provider: &str, role: ModelRole) -> Result<Arc<NamedModelResource>> {
        self.providers
            .iter()
            .find(|p| p.eq_ignore_ascii_case(provider))
            .and_then(|p| self.resources.get(&(*p, role)))
            .cloned()
            .ok_or_else(|| Error::RoleNotRegistered {
                role: role.to_string(),
                provider: Some(provider.to_string()),
            })
    }

    /// Resource for `role` from the first registered provider that has it
    pub fn resolve(&self, role: ModelRole) -> Result<Arc<NamedModelResource>> {
        self.providers
            .iter()
            .find_map(|p| self.resources.get(&(*p, role)))
            .cloned()
            .ok_or_else(|| Error::RoleNotRegistered {
                role: role.to_string(),
                provider: None,
            })
    }

    /// Chat resource for `role`
    ///
    /// # Errors
    /// `UnsupportedOperation` when asked for the embedding role.
    pub fn chat(&self, role: ModelRole) -> Result<Arc<NamedModelResource>> {
        if !role.is_chat() {
            return Err(Error::UnsupportedOperation(format!(
                "'{}' is not a chat role",
                role
            )));
        }
        self.resolve(role)
    }

    /// The embedding resource
    pub fn embedding(&self) -> Result<Arc<NamedModelResource>> {
        self.resolve(ModelRole::Embedding)
    }

    /// Provider tags in registration order
    pub fn providers(&self) -> &[&'static str] {
        &self.providers
    }

    /// All resources, grouped by provider in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<NamedModelResource>> + '_ {
        self.providers.iter().flat_map(move |p| {
            ModelRole::ALL
                .into_iter()
                .filter_map(move |role| self.resources.get(&(*p, role)))
        })
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::gemini::GeminiOptionsConverter;
    use crate::providers::openai::OpenAIOptionsConverter;
    use crate::providers::testing::StubClient;

    fn provider_resources(provider: &'static str) -> (Arc<StubClient>, Vec<NamedModelResource>) {
        let stub = Arc::new(StubClient::new(provider));
        let client: Arc<dyn ProviderClient> = stub.clone();
        let converter: Arc<dyn OptionsConverter> = Arc::new(OpenAIOptionsConverter);
        let resources = vec![
            NamedModelResource::chat(
                ModelRole::Workhorse,
                format!("{provider}-small"),
                provider,
                Arc::clone(&client),
                Arc::clone(&converter),
            ),
            NamedModelResource::chat(
                ModelRole::Premium,
                format!("{provider}-large"),
                provider,
                Arc::clone(&client),
                converter,
            ),
            NamedModelResource::embedding(
                format!("{provider}-embed"),
                provider,
                client,
                MetadataMode::Embed,
            ),
        ];
        (stub, resources)
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("workhorse".parse::<ModelRole>().unwrap(), ModelRole::Workhorse);
        assert_eq!(" Premium ".parse::<ModelRole>().unwrap(), ModelRole::Premium);
        assert_eq!(ModelRole::Embedding.to_string(), "embedding");
        assert!("cheap".parse::<ModelRole>().is_err());
        assert!(!ModelRole::Embedding.is_chat());
    }

    #[test]
    fn test_empty_registry_reports_unregistered() {
        let registry = ModelRegistry::new();

        let err = registry.resolve(ModelRole::Workhorse).unwrap_err();
        assert_eq!(err.to_string(), "Model role 'workhorse' is not registered");

        let err = registry.get("OpenAI", ModelRole::Embedding).unwrap_err();
        assert!(err.is_role_not_registered());
    }

    #[test]
    fn test_resolve_prefers_first_registered_provider() {
        let mut registry = ModelRegistry::new();
        registry.register_provider(provider_resources("OpenAI").1).unwrap();
        registry.register_provider(provider_resources("Gemini").1).unwrap();

        assert_eq!(registry.resolve(ModelRole::Premium).unwrap().name(), "OpenAI-large");
        assert_eq!(
            registry.get("gemini", ModelRole::Premium).unwrap().name(),
            "Gemini-large"
        );
        assert_eq!(registry.providers(), &["OpenAI", "Gemini"]);

        let names: Vec<&str> = registry.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "OpenAI-small",
                "OpenAI-large",
                "OpenAI-embed",
                "Gemini-small",
                "Gemini-large",
                "Gemini-embed",
            ]
        );
    }

    #[test]
    fn test_duplicate_provider_rejected() {
        let mut registry = ModelRegistry::new();
        registry.register_provider(provider_resources("OpenAI").1).unwrap();

        let err = registry
            .register_provider(provider_resources("OpenAI").1)
            .unwrap_err();
        assert!(err.to_string().contains("already registered"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_mixed_batch_is_rejected_atomically() {
        let mut resources = provider_resources("OpenAI").1;
        resources.push(provider_resources("Gemini").1.remove(0));

        let mut registry = ModelRegistry::new();
        assert!(registry.register_provider(resources).is_err());
        assert!(registry.is_empty());
        assert!(registry.providers().is_empty());
    }

    #[test]
    fn test_chat_rejects_embedding_role() {
        let mut registry = ModelRegistry::new();
        registry.register_provider(provider_resources("OpenAI").1).unwrap();

        assert!(matches!(
            registry.chat(ModelRole::Embedding),
            Err(Error::UnsupportedOperation(_))
        ));
        assert!(registry.chat(ModelRole::Workhorse).is_ok());
    }

    #[tokio::test]
    async fn test_generate_converts_options() {
        let (stub, resources) = provider_resources("OpenAI");
        let mut registry = ModelRegistry::new();
        registry.register_provider(resources).unwrap();

        let workhorse = registry.chat(ModelRole::Workhorse).unwrap();
        let options = LlmOptions::new().with_temperature(0.5).with_top_k(20);

        let response = workhorse.generate("ping", &options).await.unwrap();

        assert_eq!(response.content, "echo: ping");
        assert_eq!(response.model, "OpenAI-small");

        let received = stub.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let sent = received[0].as_openai().unwrap();
        assert_eq!(sent.temperature, Some(0.5));
        assert_eq!(sent.max_tokens, None);
    }

    #[tokio::test]
    async fn test_generate_runs_inside_llm_span() {
        let _subscriber = tracing::subscriber::set_default(tracing_subscriber::registry());
        let (stub, resources) = provider_resources("OpenAI");
        let mut registry = ModelRegistry::new();
        registry.register_provider(resources).unwrap();

        registry
            .chat(ModelRole::Premium)
            .unwrap()
            .generate("ping", &LlmOptions::new())
            .await
            .unwrap();

        assert_eq!(*stub.spans.lock().unwrap(), vec![Some("call_llm")]);
    }

    #[test]
    fn test_options_use_resource_converter() {
        let client: Arc<dyn ProviderClient> = Arc::new(StubClient::new("Gemini"));
        let resource = NamedModelResource::chat(
            ModelRole::Workhorse,
            "gemini-flash",
            "Gemini",
            client,
            Arc::new(GeminiOptionsConverter),
        );

        let converted = resource
            .options(&LlmOptions::new().with_max_tokens(100))
            .unwrap();
        assert_eq!(converted.as_gemini().unwrap().max_output_tokens, Some(100));
    }

    #[tokio::test]
    async fn test_role_mismatch_is_unsupported() {
        let (_, resources) = provider_resources("OpenAI");
        let mut registry = ModelRegistry::new();
        registry.register_provider(resources).unwrap();

        let embedding = registry.embedding().unwrap();
        let err = embedding.generate("hi", &LlmOptions::default()).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation(_)));
        assert!(embedding.options(&LlmOptions::default()).is_none());

        let premium = registry.resolve(ModelRole::Premium).unwrap();
        assert!(matches!(
            premium.embed("hi").await,
            Err(Error::UnsupportedOperation(_))
        ));
    }

    #[tokio::test]
    async fn test_embed_document_applies_metadata_mode() {
        let (_, resources) = provider_resources("OpenAI");
        let mut registry = ModelRegistry::new();
        registry.register_provider(resources).unwrap();
        let embedding = registry.embedding().unwrap();

        let plain = embedding.embed("abc").await.unwrap();
        assert_eq!(plain.vector, vec![3.0, "OpenAI-embed".len() as f32]);

        let doc = Document::new("abc").with_metadata("k", "v");
        let with_metadata = embedding.embed_document(&doc).await.unwrap();
        assert_eq!(with_metadata.vector[0], "k: v\n\nabc".len() as f32);
    }
}
