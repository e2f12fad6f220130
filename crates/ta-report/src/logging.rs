//! Logging setup.

use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};

/// Setup logging with the given level.
///
/// `RUST_LOG` overrides `level` when set. Logs go to stderr so command
/// output on stdout stays machine-readable.
pub fn setup_logging(level: &str, json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
    }
}
