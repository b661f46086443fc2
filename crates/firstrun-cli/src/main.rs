//! firstrun: headless launcher for the onboarding flag
//!
//! ## Usage
//!
//! ```bash
//! firstrun launch                           # Start with the persisted flag
//! firstrun launch -- -skipOnboarding        # Force the main flow
//! firstrun launch --complete                # Tap through onboarding
//! firstrun status --json                    # Inspect the settings file
//! firstrun args --skip-onboarding -- -foo   # Build a launch argument list
//! firstrun ids                              # List automation identifiers
//! ```

use clap::Parser;
use firstrun_cli::{
    handlers::{execute_args, execute_ids, execute_launch, execute_status},
    logging::init_tracing,
    Cli, CliConfig, CliResult, ColorChoice, Commands, Reporter, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity, config.color);

    let out = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    match cli.command {
        Commands::Launch(args) => execute_launch(&config, &args, &out),
        Commands::Status(args) => execute_status(&config, &args, &out),
        Commands::Args(args) => execute_args(&args, &out),
        Commands::Ids(args) => execute_ids(&args, &out),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_color(ColorChoice::from(cli.color))
        .with_store(cli.store.clone())
}
