//! Model provider activation and role-keyed model resources
//!
//! # Architecture
//!
//! Each provider supplies a [`ProviderBackend`]: its tag, the environment key
//! that gates it, how to build its client, and its [`OptionsConverter`](crate::OptionsConverter).
//! The [`ProviderRegistrar`] activates backends in order at startup and fills a
//! [`ModelRegistry`] with one [`NamedModelResource`] per role.
//!
//! # Available Providers
//!
//! - **OpenAI**: gated on `OPENAI_API_KEY`
//! - **Gemini**: gated on `GEMINI_API_KEY`
//!
//! # Example
//!
//! ```ignore
//! use zdk_core::{LlmOptions, ModelRole, ProcessEnvironment, ProviderRegistrar, ZConfig};
//!
//! let config = ZConfig::load()?;
//! let registry = ProviderRegistrar::with_default_backends().activate(&config, &ProcessEnvironment)?;
//!
//! let workhorse = registry.chat(ModelRole::Workhorse)?;
//! let reply = workhorse
//!     .generate("Summarize this", &LlmOptions::new().with_temperature(0.2))
//!     .await?;
//!
//! let vector = registry.embedding()?.embed("Hello").await?;
//! ```

pub mod provider;
pub mod registrar;
pub mod registry;

// Provider implementations
pub mod gemini;
pub mod openai;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use provider::{ChatModel, EmbeddingModel, ProviderClient};
pub use registrar::{Activation, EMBEDDING_METADATA_MODE, ProviderBackend, ProviderRegistrar};
pub use registry::{ModelRegistry, ModelRole, NamedModelResource};

// Provider re-exports
pub use gemini::{GeminiBackend, GeminiClient, GeminiOptions, GeminiOptionsConverter};
pub use openai::{OpenAIBackend, OpenAIClient, OpenAIOptions, OpenAIOptionsConverter};
