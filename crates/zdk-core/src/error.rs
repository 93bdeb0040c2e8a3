use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid provider configuration: {0}")]
    Validation(ValidationErrors),

    #[error("Failed to construct {provider} client: {message}")]
    ClientConstruction { provider: String, message: String },

    #[error("{}", role_not_registered_message(.role, .provider.as_deref()))]
    RoleNotRegistered {
        role: String,
        provider: Option<String>,
    },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("LLM request failed: {0}")]
    LLMError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn role_not_registered_message(role: &str, provider: Option<&str>) -> String {
    match provider {
        Some(provider) => {
            format!("Model role '{role}' is not registered for provider '{provider}'")
        }
        None => format!("Model role '{role}' is not registered"),
    }
}

impl Error {
    /// Helper for creating configuration errors
    ///
    /// # Example
    /// ```
    /// use zdk_core::Error;
    /// let err = Error::config_error("config.toml could not be parsed");
    /// ```
    pub fn config_error(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Helper for creating client construction errors
    pub fn client_construction(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::ClientConstruction {
            provider: provider.into(),
            message: msg.into(),
        }
    }

    /// Helper for creating general errors with a message
    pub fn message(msg: impl Into<String>) -> Self {
        Error::Other(anyhow::anyhow!("{}", msg.into()))
    }

    /// Whether this error reports a lookup of a role nobody registered
    pub fn is_role_not_registered(&self) -> bool {
        matches!(self, Error::RoleNotRegistered { .. })
    }
}

/// A single violated configuration constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted config path of the offending field (e.g. `providers.openai.api_key`)
    pub field: String,
    pub message: String,
}

/// Every constraint violated by one configuration value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Dotted paths of all offending fields, in the order they were checked
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Turn the collected violations into a `Result`
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{} {}", v.field, v.message))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}
