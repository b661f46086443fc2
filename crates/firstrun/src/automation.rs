//! Typed automation identifiers.
//!
//! Each screen's testable elements are listed in an enum whose variants map to
//! stable, opaque identifier strings. The view tags elements with them and UI
//! tests look elements up by them; nothing else interprets the strings.

use firstrun_derive::AutomationId;

/// A value that names one automation identifier.
pub trait AutomationIdentifying {
    /// The identifier string attached to the element
    fn automation_id(&self) -> &'static str;
}

/// An identifier enum whose members can be enumerated.
pub trait AutomationCatalog: AutomationIdentifying + Sized + 'static {
    /// Every member, in declaration order
    fn variants() -> &'static [Self];

    /// Every identifier string, in declaration order
    fn automation_ids() -> Vec<&'static str> {
        Self::variants()
            .iter()
            .map(AutomationIdentifying::automation_id)
            .collect()
    }
}

impl AutomationIdentifying for &'static str {
    fn automation_id(&self) -> &'static str {
        *self
    }
}

/// Elements on the onboarding screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AutomationId)]
#[automation(prefix = "automation.onboarding")]
pub enum OnboardingScreen {
    /// The button that finishes onboarding
    Complete,
}

/// Elements on the main-flow screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AutomationId)]
#[automation(prefix = "automation.content")]
pub enum ContentScreen {
    /// The screen title
    Title,
}

/// Every identifier the app exposes, grouped by screen.
#[must_use]
pub fn all_automation_ids() -> Vec<&'static str> {
    let mut ids = OnboardingScreen::automation_ids();
    ids.extend(ContentScreen::automation_ids());
    ids
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_onboarding_identifiers() {
        assert_eq!(
            OnboardingScreen::Complete.automation_id(),
            "automation.onboarding.complete"
        );
        assert_eq!(OnboardingScreen::variants(), &[OnboardingScreen::Complete]);
    }

    #[test]
    fn test_content_identifiers() {
        assert_eq!(ContentScreen::Title.automation_id(), "automation.content.title");
        assert_eq!(ContentScreen::automation_ids(), vec!["automation.content.title"]);
    }

    #[test]
    fn test_all_identifiers_are_unique() {
        let ids = all_automation_ids();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
    }

    #[test]
    fn test_raw_strings_are_identifiers() {
        assert_eq!("custom.id".automation_id(), "custom.id");
    }
}
