//! Tracing subscriber setup.
//!
//! Events go to stderr through `tracing-subscriber`'s formatter. The filter is
//! read from `MAPMAN_LOG` (same syntax as `RUST_LOG`) and defaults to `warn`,
//! so a normal run prints nothing beyond its completion line.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "MAPMAN_LOG";

/// Installs the global subscriber. Calling it again is a no-op.
pub fn init() {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed (tests); keep the existing one
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
