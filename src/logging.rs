//! `tracing` subscriber setup for the command-line front end.
//!
//! The library never installs a subscriber itself; embedding applications
//! keep full control over where events go.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber.
///
/// `RUST_LOG` wins over `default_level`; `verbose` forces `debug`. Calling
/// this twice is harmless, the second call is ignored.
pub fn init_logging(default_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
