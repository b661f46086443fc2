//! Ids command handler

use crate::error::CliResult;
use crate::output::Reporter;
use crate::IdsArgs;
use firstrun::{AutomationCatalog, ContentScreen, OnboardingScreen, Screen};
use serde::Serialize;

/// Identifiers exposed by one screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdGroup {
    /// Screen the identifiers belong to
    pub screen: Screen,
    /// Identifier strings, in declaration order
    pub ids: Vec<&'static str>,
}

/// Identifiers grouped by screen
#[must_use]
pub fn id_groups() -> Vec<IdGroup> {
    vec![
        IdGroup {
            screen: Screen::Onboarding,
            ids: OnboardingScreen::automation_ids(),
        },
        IdGroup {
            screen: Screen::Content,
            ids: ContentScreen::automation_ids(),
        },
    ]
}

/// Execute the ids command
pub fn execute_ids(args: &IdsArgs, out: &Reporter) -> CliResult<()> {
    let groups = id_groups();
    if args.json {
        return out.json(&groups);
    }
    for group in &groups {
        for id in &group.ids {
            out.line(&format!("{}\t{id}", group.screen))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_cover_every_identifier() {
        let flattened: Vec<&str> = id_groups().into_iter().flat_map(|g| g.ids).collect();
        assert_eq!(flattened, firstrun::all_automation_ids());
    }

    #[test]
    fn test_onboarding_group_first() {
        let groups = id_groups();
        assert_eq!(groups[0].screen, Screen::Onboarding);
        assert_eq!(groups[0].ids, vec!["automation.onboarding.complete"]);
    }
}
