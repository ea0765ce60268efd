//! Initialization that needs to be done on startup

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Sets up logging to stderr, filtered by `RUST_LOG` and defaulting to `info`.
/// Stdout is left to the results.
pub fn init() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    // a subscriber may already be installed when embedded, which is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
