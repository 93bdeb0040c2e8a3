//! # ZDK Telemetry
//!
//! Structured logging and OpenTelemetry tracing for model provider activation
//! and model calls. Span attributes follow the OpenTelemetry semantic
//! conventions for generative AI.

mod spans;
mod tracer;

pub use spans::{
    LLMSpanAttributes, ProviderSpanAttributes, trace_llm_call, trace_provider_activation,
};
pub use tracer::{
    init_telemetry, pending_span_processors, register_span_processor, tracer_provider,
};

use serde::{Deserialize, Serialize};

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// `[telemetry]` section of config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter used when `RUST_LOG` is unset (e.g. "info,zdk_core=debug")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    pub service_name: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_filter: default_log_filter(),
            service_name: None,
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// OpenTelemetry span attribute constants for model provider observability.
pub mod attributes {
    pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";
    pub const GEN_AI_SYSTEM: &str = "gen_ai.system";
    pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";
    pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";
    pub const GEN_AI_REQUEST_TOP_P: &str = "gen_ai.request.top_p";
    pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

    // ZDK provider attributes
    pub const ZDK_MODEL_ROLE: &str = "zdk.model.role";
    pub const ZDK_WORKHORSE_MODEL: &str = "zdk.provider.workhorse_model";
    pub const ZDK_PREMIUM_MODEL: &str = "zdk.provider.premium_model";
    pub const ZDK_EMBEDDING_MODEL: &str = "zdk.provider.embedding_model";

    // System name constant
    pub const SYSTEM_NAME: &str = "zdk.providers";
}
