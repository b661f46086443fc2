//! Args command handler

use crate::error::CliResult;
use crate::output::Reporter;
use crate::BuildArgs;
use firstrun::LaunchArgumentBuilder;

/// Deduplicated, sorted launch arguments
#[must_use]
pub fn build_arguments(initial: &[String], skip_onboarding: bool) -> Vec<String> {
    let builder: LaunchArgumentBuilder = initial.iter().cloned().collect();
    if skip_onboarding {
        builder.skip_onboarding();
    }
    builder.build()
}

/// Execute the args command: one argument per line, or a JSON array
pub fn execute_args(args: &BuildArgs, out: &Reporter) -> CliResult<()> {
    let built = build_arguments(&args.arguments, args.skip_onboarding);
    if args.json {
        return out.json(&built);
    }
    for argument in &built {
        out.line(argument)?;
    }
    Ok(())
}
