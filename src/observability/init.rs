//! Subscriber setup: `EnvFilter` plus an OpenTelemetry layer exporting to the
//! trace file.

use super::tracer;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "Flowboard";

/// Name of the live trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "flowboard-otlp.json";

/// Location of the live trace file.
#[must_use]
pub fn trace_file_path() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Installs the global subscriber for this thread's process.
///
/// Filtering follows `config.trace_level` (an `EnvFilter` directive such as
/// `info` or `flowboard=debug`); an invalid directive falls back to `info`.
/// Returns `false` when tracing stays off: the data directory could not be
/// created, or a subscriber was already installed.
pub fn init_tracing(config: &Config) -> bool {
    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return false;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(trace_file_path(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(level = %config.trace_level, file = %trace_file_path().display(), "tracing initialized");
    }
    installed
}
