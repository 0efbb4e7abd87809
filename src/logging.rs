//! Logging configuration using tracing

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ROADMAP_LOG";

/// Initialize logging to stderr.
///
/// Stdout stays clean for generated HTML. Level is controlled by
/// `ROADMAP_LOG`, e.g. `ROADMAP_LOG=debug roadmap render out.md -t topic`.
pub fn init(verbose: bool) {
    let default = if verbose { "roadmap=debug,warn" } else { "roadmap=info,warn" };
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
