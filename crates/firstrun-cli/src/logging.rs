//! Log output for the CLI.
//!
//! Library events go to stderr so stdout stays clean for command output.
//! `RUST_LOG` overrides the level picked from `-v`/`-q`.

use crate::config::{ColorChoice, Verbosity};
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, or from the verbosity level when unset or invalid
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_tracing(verbosity: Verbosity, color: ColorChoice) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_ansi(color.should_color())
        .with_target(false)
        .compact()
        .try_init();
}
