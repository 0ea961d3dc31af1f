// ABOUTME: Shared logging setup for the yb command-line client
// ABOUTME: Logs go to stderr so they never interleave with streamed log lines on stdout

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map a `-v` count onto a default level: WARN, then INFO, then DEBUG.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Standard logging to stderr. RUST_LOG, when set, replaces the verbosity default.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity).to_string()));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(verbosity > 1)
        .init();
}
