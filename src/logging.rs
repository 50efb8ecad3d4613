//! Tracing setup.

use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over `settings.filter`.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
