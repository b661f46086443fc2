//! Launch command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::LaunchArgs;
use firstrun::{
    configure, AppViewModel, AutomationContext, AutomationIdentifying, Element, FileSettingStore,
    OnboardingScreen, Screen,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of one headless launch
#[derive(Debug, Clone, Serialize)]
pub struct LaunchReport {
    /// Settings file used
    pub store: PathBuf,
    /// Launch arguments handed to the app
    pub launch_arguments: Vec<String>,
    /// Whether `-skipOnboarding` forced the flag off
    pub skipped_onboarding: bool,
    /// Whether onboarding was tapped through
    pub completed_onboarding: bool,
    /// Screen showing when the launch finished
    pub screen: Screen,
    /// Flag value after the launch
    pub show_onboarding: bool,
    /// Elements of the final screen
    pub elements: Vec<Element>,
}

/// Start the app against `store`, apply `launch_arguments`, and optionally
/// finish onboarding with the same tap a user would make.
pub fn launch_app(
    store: &Path,
    launch_arguments: &[String],
    complete: bool,
) -> CliResult<LaunchReport> {
    let context = Arc::new(AutomationContext::new(FileSettingStore::new(store))?);
    let skipped_onboarding = configure(&context, launch_arguments)?;
    let mut view = AppViewModel::new(Arc::clone(&context));

    let completed_onboarding = complete && view.screen() == Screen::Onboarding;
    if completed_onboarding {
        view.tap(OnboardingScreen::Complete.automation_id())?;
    }
    tracing::info!(screen = %view.screen(), skipped_onboarding, "launched");

    Ok(LaunchReport {
        store: store.to_path_buf(),
        launch_arguments: launch_arguments.to_vec(),
        skipped_onboarding,
        completed_onboarding,
        screen: view.screen(),
        show_onboarding: context.show_onboarding(),
        elements: view.elements(),
    })
}

/// Execute the launch command
pub fn execute_launch(config: &CliConfig, args: &LaunchArgs, out: &Reporter) -> CliResult<()> {
    let report = launch_app(&config.store_path()?, &args.launch_arguments, args.complete)?;
    if args.json {
        return out.json(&report);
    }

    if report.skipped_onboarding {
        out.note("onboarding skipped by launch argument")?;
    }
    if report.completed_onboarding {
        out.note("onboarding completed")?;
    }
    out.field("screen", report.screen)?;
    out.field("show_onboarding", report.show_onboarding)?;
    out.field("store", report.store.display())?;
    for element in &report.elements {
        out.line(&describe_element(element))?;
    }
    Ok(())
}

/// One-line description of an element, e.g. `  button "Okay" [automation.onboarding.complete]`
#[must_use]
pub fn describe_element(element: &Element) -> String {
    let kind = match element.kind {
        firstrun::ElementKind::StaticText => "text",
        firstrun::ElementKind::Button => "button",
    };
    match element.automation_id {
        Some(id) => format!("  {kind} {:?} [{id}]", element.label),
        None => format!("  {kind} {:?}", element.label),
    }
}
