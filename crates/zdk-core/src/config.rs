//! Configuration management for ZDK model providers
//!
//! Loads configuration with priority:
//! 1. config.toml (or specified config file)
//! 2. Environment variables (`${VAR}` references and credential fallback)
//! 3. Defaults

use crate::environment::{Environment, ProcessEnvironment};
use crate::error::{Error, Result, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use zdk_telemetry::TelemetryConfig;

/// ZDK configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZConfig {
    /// Raw per-provider settings keyed by config name (`openai`, `gemini`, ...)
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderSettings>,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Unvalidated settings for one provider, as written in `[providers.<name>]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// API key (can reference env var with ${VAR_NAME})
    pub api_key: Option<String>,

    /// Base URL override for compatible endpoints
    pub base_url: Option<String>,

    pub workhorse_model: Option<String>,

    pub premium_model: Option<String>,

    pub embedding_model: Option<String>,
}

impl ZConfig {
    /// Load configuration from config.toml in the current or a parent directory
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::find_config_file()?,
        };

        tracing::debug!("Loading configuration from: {:?}", config_path);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            Error::config_error(format!(
                "Failed to read config file {:?}: {}",
                config_path, e
            ))
        })?;

        Self::from_toml_str(&contents, &ProcessEnvironment)
    }

    /// Parse configuration from a TOML string, resolving `${VAR}` references
    /// against `environment`
    pub fn from_toml_str(contents: &str, environment: &dyn Environment) -> Result<Self> {
        let mut config: ZConfig = toml::from_str(contents)
            .map_err(|e| Error::config_error(format!("Failed to parse config: {}", e)))?;

        config.resolve_env_vars(environment);

        Ok(config)
    }

    /// Settings for a provider, if the config has a section for it
    pub fn provider(&self, name: &str) -> Option<&ProviderSettings> {
        self.providers.get(name)
    }

    /// Find config.toml by searching current directory and parents
    fn find_config_file() -> Result<PathBuf> {
        let mut current = env::current_dir()?;

        loop {
            let config_path = current.join("config.toml");
            if config_path.exists() {
                return Ok(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        Err(Error::config_error(
            "config.toml not found. Create one with: cp config.toml.example config.toml",
        ))
    }

    fn resolve_env_vars(&mut self, environment: &dyn Environment) {
        for settings in self.providers.values_mut() {
            for value in [
                &mut settings.api_key,
                &mut settings.base_url,
                &mut settings.workhorse_model,
                &mut settings.premium_model,
                &mut settings.embedding_model,
            ] {
                if let Some(raw) = value.take() {
                    *value = resolve_env_var(&raw, environment);
                }
            }
        }
    }

    /// Create test-friendly defaults with an OpenAI section and no secrets
    pub fn test_defaults() -> Self {
        let openai = ProviderSettings {
            api_key: None,
            base_url: None,
            workhorse_model: Some("gpt-4o-mini".to_string()),
            premium_model: Some("gpt-4o".to_string()),
            embedding_model: Some("text-embedding-3-small".to_string()),
        };

        Self {
            providers: BTreeMap::from([("openai".to_string(), openai)]),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Resolve a single ${VAR_NAME} reference; plain values pass through
fn resolve_env_var(value: &str, environment: &dyn Environment) -> Option<String> {
    match value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(var_name) => environment.var(var_name),
        None => Some(value.to_string()),
    }
}

/// Validated, immutable configuration for one provider
///
/// Every required field is non-blank. The only way to obtain a value is
/// [`ProviderProperties::validate`], so holding one proves validation ran.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderProperties {
    api_key: String,
    base_url: Option<String>,
    workhorse_model: String,
    premium_model: String,
    embedding_model: String,
}

impl ProviderProperties {
    /// Validate raw settings, reporting every blank field under `prefix`
    ///
    /// # Example
    /// ```
    /// use zdk_core::{ProviderProperties, ProviderSettings};
    ///
    /// let settings = ProviderSettings {
    ///     api_key: Some("sk-test".into()),
    ///     workhorse_model: Some("gpt-x".into()),
    ///     premium_model: Some("gpt-y".into()),
    ///     embedding_model: Some("embed-z".into()),
    ///     ..Default::default()
    /// };
    /// let props = ProviderProperties::validate("providers.openai", &settings).unwrap();
    /// assert_eq!(props.premium_model(), "gpt-y");
    /// ```
    pub fn validate(prefix: &str, settings: &ProviderSettings) -> Result<Self> {
        let mut errors = ValidationErrors::new();

        let api_key = required(&mut errors, prefix, "api_key", &settings.api_key);
        let workhorse_model =
            required(&mut errors, prefix, "workhorse_model", &settings.workhorse_model);
        let premium_model = required(&mut errors, prefix, "premium_model", &settings.premium_model);
        let embedding_model =
            required(&mut errors, prefix, "embedding_model", &settings.embedding_model);

        if let Some(base_url) = &settings.base_url
            && base_url.trim().is_empty()
        {
            errors.push(field_path(prefix, "base_url"), "must not be blank when set");
        }

        errors.into_result()?;

        Ok(Self {
            api_key,
            base_url: settings.base_url.clone(),
            workhorse_model,
            premium_model,
            embedding_model,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn workhorse_model(&self) -> &str {
        &self.workhorse_model
    }

    pub fn premium_model(&self) -> &str {
        &self.premium_model
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }
}

impl std::fmt::Debug for ProviderProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderProperties")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("workhorse_model", &self.workhorse_model)
            .field("premium_model", &self.premium_model)
            .field("embedding_model", &self.embedding_model)
            .finish()
    }
}

fn field_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn required(
    errors: &mut ValidationErrors,
    prefix: &str,
    field: &str,
    value: &Option<String>,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => {
            errors.push(field_path(prefix, field), "must not be blank");
            String::new()
        }
    }
}
