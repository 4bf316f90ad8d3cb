//! Telemetry setup for hosts embedding the response brain.
//!
//! Builds an env-filtered subscriber with bunyan-style JSON formatting so the
//! pipeline's structured spans (`response_id`, channel transitions) land in a
//! machine-readable log stream.

use anyhow::Context;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Installs the global tracing subscriber.
///
/// The filter is taken from `RUST_LOG` when set, falling back to
/// `default_filter` (e.g. `"info"` or `"nutriroom_core=debug"`).
/// Call once at host startup; a second call returns an error.
pub fn init_telemetry(name: &str, default_filter: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let formatting_layer = BunyanFormattingLayer::new(name.to_string(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global tracing subscriber")
}
