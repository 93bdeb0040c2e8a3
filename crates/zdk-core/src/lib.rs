//! Core types for ZDK model providers
//!
//! This crate decides which LLM providers are active, registers their
//! workhorse, premium and embedding models by role, and converts
//! provider-agnostic [`LlmOptions`] into each provider's request options.

pub mod capabilities;
pub mod config;
pub mod environment;
pub mod error;
pub mod extensions;
pub mod options;
pub mod providers;

// Re-exports
pub use capabilities::{ChatResponse, EmbeddingVector, TokenUsage};
pub use config::{ProviderProperties, ProviderSettings, ZConfig};
pub use environment::{Environment, ProcessEnvironment, ProviderAvailability};
pub use error::{Error, FieldViolation, Result, ValidationErrors};
pub use extensions::ZConfigExt;
pub use options::{
    Document, EmbeddingOptions, LlmOptions, MetadataMode, OptionsConverter, ProviderOptions,
};
pub use providers::{
    Activation, ChatModel, EmbeddingModel, ModelRegistry, ModelRole, NamedModelResource,
    ProviderBackend, ProviderClient, ProviderRegistrar,
};
