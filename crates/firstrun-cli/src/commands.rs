//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// firstrun: launch the app headlessly and inspect its onboarding flag
#[derive(Parser, Debug)]
#[command(name = "firstrun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Settings file holding the onboarding flag
    #[arg(long, env = "FIRSTRUN_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the app with the given launch arguments and show the chosen screen
    ///
    /// Pass launch arguments after `--`, e.g. `firstrun launch -- -skipOnboarding`.
    Launch(LaunchArgs),

    /// Show the persisted onboarding flag
    Status(StatusArgs),

    /// Build a deduplicated launch argument list
    Args(BuildArgs),

    /// List every automation identifier the app exposes
    Ids(IdsArgs),
}

/// Arguments for the launch command
#[derive(Parser, Debug)]
pub struct LaunchArgs {
    /// Tap through onboarding if it is shown
    #[arg(long)]
    pub complete: bool,

    /// Print the launch report as JSON
    #[arg(long)]
    pub json: bool,

    /// Launch arguments handed to the app
    #[arg(
        value_name = "LAUNCH_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub launch_arguments: Vec<String>,
}

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the args command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Add the -skipOnboarding token
    #[arg(long)]
    pub skip_onboarding: bool,

    /// Print the list as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Initial arguments, duplicates allowed
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub arguments: Vec<String>,
}

/// Arguments for the ids command
#[derive(Parser, Debug)]
pub struct IdsArgs {
    /// Print the identifiers as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
