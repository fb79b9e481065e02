//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing::Subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File name of the span log inside the data directory.
pub const SPAN_FILE_NAME: &str = "treefocus-spans.json";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`, otherwise `"info"`. Spans are exported to
/// `<data dir>/treefocus-spans.json`; warnings and errors are also printed
/// to stderr.
///
/// Best-effort and idempotent: if the data directory cannot be created only
/// the stderr output is installed, and if a subscriber is already installed
/// this does nothing.
///
/// # Example
///
/// ```no_run
/// use treefocus::observability::init_tracing;
/// use treefocus::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let data_dir = crate::infrastructure::get_data_dir();
    let otel_layer = std::fs::create_dir_all(&data_dir).is_ok().then(|| {
        let resource = Resource::new(vec![opentelemetry::KeyValue::new(
            "service.name",
            "treefocus",
        )]);
        let provider = tracer::create_tracer_provider(data_dir.join(SPAN_FILE_NAME), resource);
        let layer = OpenTelemetryLayer::new(provider.tracer("treefocus"));
        let _ = opentelemetry::global::set_tracer_provider(provider);
        layer
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(warning_layer(std::io::stderr))
        .try_init();
}

/// Plain-text layer printing warnings and errors to `writer`.
fn warning_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_ansi(false)
        .with_filter(LevelFilter::WARN)
}
