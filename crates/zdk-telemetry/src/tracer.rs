//! Tracer setup and management

use crate::{LogFormat, TelemetryConfig};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::{SimpleSpanProcessor, TracerProvider};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Global tracer provider holder
static TRACER_PROVIDER: OnceLock<Arc<TracerProvider>> = OnceLock::new();

/// Global span processor builders (registered before initialization)
type ProcessorBuilder = Box<dyn FnOnce() -> SimpleSpanProcessor + Send>;
static SPAN_PROCESSOR_BUILDERS: Mutex<Option<Vec<ProcessorBuilder>>> = Mutex::new(Some(Vec::new()));

fn processor_builders() -> MutexGuard<'static, Option<Vec<ProcessorBuilder>>> {
    SPAN_PROCESSOR_BUILDERS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register a span processor builder used when telemetry is initialized.
///
/// Must be called BEFORE a successful `init_telemetry()`; later registrations
/// are dropped with a warning.
pub fn register_span_processor(builder: ProcessorBuilder) {
    let mut builders = processor_builders();

    if let Some(ref mut vec) = *builders {
        vec.push(builder);
    } else {
        tracing::warn!("Attempted to register span processor after telemetry initialization");
    }
}

/// Number of span processors waiting for `init_telemetry()`
///
/// Zero after a successful initialization.
pub fn pending_span_processors() -> usize {
    processor_builders().as_ref().map_or(0, Vec::len)
}

/// Initialize logging and OpenTelemetry tracing.
///
/// Installs a global subscriber with:
/// - an OpenTelemetry layer fed by the registered span processors
/// - pretty or JSON formatted log output
/// - an `EnvFilter` from `RUST_LOG`, falling back to `config.log_filter`
///
/// Returns `false` if a global subscriber was already installed. In that case
/// registered processors stay pending and no tracer provider is published.
///
/// # Example
///
/// ```rust,no_run
/// use zdk_telemetry::{TelemetryConfig, init_telemetry};
///
/// init_telemetry(&TelemetryConfig::default());
/// ```
pub fn init_telemetry(config: &TelemetryConfig) -> bool {
    if tracing::dispatcher::has_been_set() {
        return false;
    }

    let mut builders = processor_builders();
    let mut provider_builder = TracerProvider::builder();
    for builder in builders.take().unwrap_or_default() {
        provider_builder = provider_builder.with_span_processor(builder());
    }
    let tracer_provider = provider_builder.build();

    let service_name = config
        .service_name
        .clone()
        .unwrap_or_else(|| crate::attributes::SYSTEM_NAME.to_string());
    let telemetry_layer =
        tracing_opentelemetry::layer().with_tracer(tracer_provider.tracer(service_name));

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(filter);

    let installed = match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_line_number(true),
            )
            .try_init(),
    };

    if installed.is_err() {
        // Lost a race with another global subscriber; keep accepting processors
        *builders = Some(Vec::new());
        return false;
    }

    let _ = TRACER_PROVIDER.set(Arc::new(tracer_provider));
    true
}

/// Get the global tracer provider if initialized
pub fn tracer_provider() -> Option<Arc<TracerProvider>> {
    TRACER_PROVIDER.get().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProviderSpanAttributes, trace_provider_activation};
    use opentelemetry_sdk::testing::trace::InMemorySpanExporter;

    #[test]
    fn test_registered_processor_receives_spans() {
        let exporter = InMemorySpanExporter::default();
        let sink = exporter.clone();
        register_span_processor(Box::new(move || SimpleSpanProcessor::new(Box::new(sink))));
        assert_eq!(pending_span_processors(), 1);

        let config = TelemetryConfig {
            log_format: LogFormat::Json,
            ..TelemetryConfig::default()
        };
        assert!(init_telemetry(&config));
        assert!(tracer_provider().is_some());
        assert_eq!(pending_span_processors(), 0);

        trace_provider_activation(ProviderSpanAttributes {
            provider: "OpenAI".to_string(),
            workhorse_model: "gpt-4o-mini".to_string(),
            premium_model: "gpt-4o".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
        });

        let spans = exporter.get_finished_spans().unwrap();
        assert!(spans.iter().any(|span| span.name == "activate_provider"));

        // Registration after initialization is dropped
        let late = InMemorySpanExporter::default();
        register_span_processor(Box::new(move || SimpleSpanProcessor::new(Box::new(late))));
        assert_eq!(pending_span_processors(), 0);

        // A second initialization leaves the published provider in place
        let provider = tracer_provider().unwrap();
        assert!(!init_telemetry(&config));
        assert!(Arc::ptr_eq(&provider, &tracer_provider().unwrap()));
    }
}
