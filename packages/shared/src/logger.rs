//! Tracing subscriber setup shared by every binary in the workspace.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, the binary's own crate and the
/// workspace libraries log at `default_level`, and tower-http request traces
/// are enabled at `debug`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_name = bin_name.replace('-', "_");
    let default_directive = format!(
        "{crate_name}={default_level},kibun_server={default_level},kibun_activity={default_level},tower_http=debug"
    );

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second call (e.g. from several integration tests) must not panic.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
