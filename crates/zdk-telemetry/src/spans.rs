//! Span creation helpers for provider activation and model calls

use crate::attributes::*;
use tracing::Span;
use tracing::field::Empty;

/// Attributes for tracing a chat model call
#[derive(Debug, Clone)]
pub struct LLMSpanAttributes {
    pub provider: String,
    pub model: String,
    pub role: String,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<i64>,
}

/// Attributes for tracing a provider activation
#[derive(Debug, Clone)]
pub struct ProviderSpanAttributes {
    pub provider: String,
    pub workhorse_model: String,
    pub premium_model: String,
    pub embedding_model: String,
}

/// Create the span for a chat generation call.
///
/// Tuning parameters are recorded only when the caller set them. Attach the
/// returned span to the request future with `tracing::Instrument`.
pub fn trace_llm_call(attrs: LLMSpanAttributes) -> Span {
    let span = tracing::info_span!(
        "call_llm",
        { GEN_AI_OPERATION_NAME } = "chat",
        { GEN_AI_SYSTEM } = %attrs.provider,
        { GEN_AI_REQUEST_MODEL } = %attrs.model,
        { ZDK_MODEL_ROLE } = %attrs.role,
        { GEN_AI_REQUEST_TEMPERATURE } = Empty,
        { GEN_AI_REQUEST_TOP_P } = Empty,
        { GEN_AI_REQUEST_MAX_TOKENS } = Empty,
    );

    if let Some(temperature) = attrs.temperature {
        span.record(GEN_AI_REQUEST_TEMPERATURE, temperature);
    }
    if let Some(top_p) = attrs.top_p {
        span.record(GEN_AI_REQUEST_TOP_P, top_p);
    }
    if let Some(max_tokens) = attrs.max_tokens {
        span.record(GEN_AI_REQUEST_MAX_TOKENS, max_tokens);
    }

    span
}

/// Record a span for a provider whose resources were just registered.
pub fn trace_provider_activation(attrs: ProviderSpanAttributes) {
    let span = tracing::info_span!(
        "activate_provider",
        { GEN_AI_OPERATION_NAME } = "activate_provider",
        { GEN_AI_SYSTEM } = %attrs.provider,
        { ZDK_WORKHORSE_MODEL } = %attrs.workhorse_model,
        { ZDK_PREMIUM_MODEL } = %attrs.premium_model,
        { ZDK_EMBEDDING_MODEL } = %attrs.embedding_model,
    );

    let _guard = span.enter();
}
