use std::sync::OnceLock;

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "warn";

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs a process-wide subscriber writing to stderr, so rendered markup
/// on stdout stays clean. `RUST_LOG` takes precedence over the default filter.
///
/// Safe to call more than once.
pub fn init_logging() {
    LOGGING_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(ErrorLayer::default())
            .try_init();
    });
}
