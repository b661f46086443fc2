//! firstrun CLI library
//!
//! Launches the app headlessly against a settings file, reports the
//! persisted onboarding flag, and builds launch argument lists for UI tests.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{BuildArgs, Cli, ColorArg, Commands, IdsArgs, LaunchArgs, StatusArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{format_field, Reporter};
