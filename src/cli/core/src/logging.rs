/* src/cli/core/src/logging.rs */

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// `RUST_LOG` wins over the configured filter. Logs go to stderr so command output stays clean.
pub fn init_tracing(default_filter: &str) {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(filter)
    .init();
}
