//! Logging setup, with optional OpenTelemetry export
//!
//! # Environment Variables
//!
//! - `APP_LOG_FORMAT`: `pretty` (default) or `json`
//! - `RUST_LOG`: filter directives (default: `pgstarter=info`)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint, only read with the `telemetry` feature
//! - `OTEL_SERVICE_NAME`: service name (default: pgstarter)

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "pgstarter=info";

pub fn init_logging() -> Result<()> {
    let log_format = std::env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(otel_layer()?);

    match log_format.as_str() {
        // Production: JSON structured logging
        "json" => registry.with(fmt::layer().json()).try_init()?,
        // Development: Pretty formatting with colors
        _ => registry.with(fmt::layer().pretty()).try_init()?,
    }

    Ok(())
}

#[cfg(feature = "telemetry")]
fn otel_layer<S>(
) -> Result<Option<tracing_opentelemetry::OpenTelemetryLayer<S, opentelemetry_sdk::trace::Tracer>>>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_otlp::WithExportConfig;

    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        return Ok(None);
    };
    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "pgstarter".to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;
    let provider = opentelemetry_sdk::trace::TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .build();
    let tracer = provider.tracer(service_name);
    opentelemetry::global::set_tracer_provider(provider);

    Ok(Some(tracing_opentelemetry::layer().with_tracer(tracer)))
}

#[cfg(not(feature = "telemetry"))]
fn otel_layer() -> Result<Option<tracing_subscriber::layer::Identity>> {
    if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        // Subscriber not installed yet
        eprintln!("OTEL_EXPORTER_OTLP_ENDPOINT set but feature 'telemetry' not enabled");
    }
    Ok(None)
}
