//! Provider activation
//!
//! Evaluates each backend's credential gate once at startup and, for the
//! providers that are available, validates their properties, builds one client
//! and registers the workhorse, premium and embedding resources.

use super::gemini::GeminiBackend;
use super::openai::OpenAIBackend;
use super::provider::ProviderClient;
use super::registry::{ModelRegistry, ModelRole, NamedModelResource};
use crate::{
    Environment, Error, MetadataMode, OptionsConverter, ProviderAvailability, ProviderProperties,
    ProviderSettings, Result, ZConfig,
};
use std::sync::Arc;
use zdk_telemetry::{ProviderSpanAttributes, trace_provider_activation};

/// Metadata mode fixed on every embedding resource
pub const EMBEDDING_METADATA_MODE: MetadataMode = MetadataMode::Embed;

/// Factory trait for one provider's client and converter
///
/// Each provider implements this trait to take part in activation.
#[cfg_attr(test, mockall::automock)]
pub trait ProviderBackend: Send + Sync {
    /// Provider tag stamped on every resource (e.g. "OpenAI")
    fn provider(&self) -> &'static str;

    /// Section name under `[providers]` in config.toml (e.g. "openai")
    fn config_key(&self) -> &'static str;

    /// Environment key whose presence gates activation
    fn credential_key(&self) -> &'static str;

    /// Construct the provider client from validated properties
    ///
    /// Called at most once per activation; the client is shared by all roles.
    fn connect(&self, properties: &ProviderProperties) -> Result<Arc<dyn ProviderClient>>;

    /// Converter attached to the provider's chat roles
    fn options_converter(&self) -> Arc<dyn OptionsConverter>;
}

/// Outcome of activating one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Credential present; this many roles were registered
    Registered { roles: usize },
    /// Credential absent or blank; nothing registered
    Unavailable,
}

/// Ordered startup routine that fills a [`ModelRegistry`]
///
/// # Example
/// ```no_run
/// use zdk_core::{ModelRole, ProcessEnvironment, ProviderRegistrar, ZConfig};
///
/// # fn example() -> zdk_core::Result<()> {
/// let config = ZConfig::load()?;
/// let registry = ProviderRegistrar::with_default_backends().activate(&config, &ProcessEnvironment)?;
/// let workhorse = registry.resolve(ModelRole::Workhorse)?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ProviderRegistrar {
    backends: Vec<Box<dyn ProviderBackend>>,
}

impl ProviderRegistrar {
    /// Create a registrar with no backends
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar for the built-in providers, in priority order: OpenAI, Gemini
    pub fn with_default_backends() -> Self {
        Self::new()
            .with_backend(OpenAIBackend)
            .with_backend(GeminiBackend)
    }

    /// Append a backend; earlier backends win [`ModelRegistry::resolve`]
    pub fn with_backend(mut self, backend: impl ProviderBackend + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }

    /// Provider tags of the configured backends, in activation order
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.provider()).collect()
    }

    /// Provider tags of the backends whose credential gate holds in `environment`
    pub fn available_providers(&self, environment: &dyn Environment) -> Vec<&'static str> {
        self.backends
            .iter()
            .filter(|b| ProviderAvailability::new(b.credential_key()).is_available(environment))
            .map(|b| b.provider())
            .collect()
    }

    /// Activate every backend against `config` and `environment`
    ///
    /// # Errors
    /// Validation and client construction failures abort activation; an
    /// unavailable provider does not.
    pub fn activate(
        &self,
        config: &ZConfig,
        environment: &dyn Environment,
    ) -> Result<ModelRegistry> {
        let mut registry = ModelRegistry::new();
        let empty = ProviderSettings::default();

        for backend in &self.backends {
            let settings = config.provider(backend.config_key()).unwrap_or(&empty);
            Self::activate_provider(backend.as_ref(), settings, environment, &mut registry)?;
        }

        tracing::debug!(
            providers = ?registry.providers(),
            resources = registry.len(),
            "Provider activation complete"
        );

        Ok(registry)
    }

    /// Activate a single provider into `registry`
    ///
    /// All of the provider's roles are registered, or none are.
    pub fn activate_provider(
        backend: &dyn ProviderBackend,
        settings: &ProviderSettings,
        environment: &dyn Environment,
        registry: &mut ModelRegistry,
    ) -> Result<Activation> {
        let provider = backend.provider();
        let availability = ProviderAvailability::new(backend.credential_key());

        if !availability.is_available(environment) {
            tracing::debug!(
                provider,
                credential_key = availability.credential_key(),
                "Provider inactive: credential not set"
            );
            return Ok(Activation::Unavailable);
        }

        let mut settings = settings.clone();
        if settings
            .api_key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
        {
            settings.api_key = environment.var(availability.credential_key());
        }

        let prefix = format!("providers.{}", backend.config_key());
        let properties = ProviderProperties::validate(&prefix, &settings)?;

        let client = backend.connect(&properties).map_err(|e| match e {
            Error::ClientConstruction { .. } => e,
            other => Error::client_construction(provider, other.to_string()),
        })?;
        let converter = backend.options_converter();

        let resources = vec![
            NamedModelResource::chat(
                ModelRole::Workhorse,
                properties.workhorse_model(),
                provider,
                Arc::clone(&client),
                Arc::clone(&converter),
            ),
            NamedModelResource::chat(
                ModelRole::Premium,
                properties.premium_model(),
                provider,
                Arc::clone(&client),
                converter,
            ),
            NamedModelResource::embedding(
                properties.embedding_model(),
                provider,
                client,
                EMBEDDING_METADATA_MODE,
            ),
        ];
        let roles = resources.len();

        registry.register_provider(resources)?;

        trace_provider_activation(ProviderSpanAttributes {
            provider: provider.to_string(),
            workhorse_model: properties.workhorse_model().to_string(),
            premium_model: properties.premium_model().to_string(),
            embedding_model: properties.embedding_model().to_string(),
        });

        tracing::info!(
            provider,
            workhorse = properties.workhorse_model(),
            premium = properties.premium_model(),
            embedding = properties.embedding_model(),
            "{} provider active",
            provider
        );

        Ok(Activation::Registered { roles })
    }
}
