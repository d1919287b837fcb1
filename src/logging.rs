// src/logging.rs
// Log setup. Logs go to stderr so stdout only carries the tree (or JSON).

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber
///
/// RUST_LOG wins when set; otherwise -v flags pick the level
/// (none: warn, -v: info, -vv: debug, -vvv: trace). `color` off
/// (--no-color) keeps ANSI escapes out of the log lines too.
pub fn init_logging(verbosity: u8, color: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(color)
        .try_init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
