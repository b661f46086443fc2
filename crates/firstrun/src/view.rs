//! Headless view layer.
//!
//! Decides between the onboarding screen and the main flow from the shared
//! context, and describes each screen as a flat list of tagged elements. There
//! is no drawing here; the element list is what automation inspects.

use crate::automation::{AutomationIdentifying, ContentScreen, OnboardingScreen};
use crate::context::AutomationContext;
use crate::result::{FirstRunError, FirstRunResult};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Text shown on the onboarding screen
pub const ONBOARDING_MESSAGE: &str = "Imagine a lengthy onboarding flow here";

/// Label of the button that finishes onboarding
pub const ONBOARDING_COMPLETE_LABEL: &str = "Okay";

/// Title of the main flow
pub const CONTENT_TITLE: &str = "Our main app flow";

/// The two mutually exclusive top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// First-run onboarding
    Onboarding,
    /// Main app flow
    Content,
}

impl Screen {
    /// Screen to show for a given "show onboarding" flag
    #[must_use]
    pub const fn for_flag(show_onboarding: bool) -> Self {
        if show_onboarding {
            Self::Onboarding
        } else {
            Self::Content
        }
    }

    /// Short lowercase name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of a rendered element, as automation queries see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Non-interactive text
    StaticText,
    /// Tappable button
    Button,
}

/// One element of a rendered screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Element kind
    pub kind: ElementKind,
    /// Visible label
    pub label: String,
    /// Automation identifier, if the element is tagged
    pub automation_id: Option<&'static str>,
}

impl Element {
    fn new(kind: ElementKind, label: &str) -> Self {
        Self {
            kind,
            label: label.to_string(),
            automation_id: None,
        }
    }

    fn tagged(mut self, id: impl AutomationIdentifying) -> Self {
        self.automation_id = Some(id.automation_id());
        self
    }
}

/// Element tree of a screen.
#[must_use]
pub fn render(screen: Screen) -> Vec<Element> {
    match screen {
        Screen::Onboarding => vec![
            Element::new(ElementKind::StaticText, ONBOARDING_MESSAGE),
            Element::new(ElementKind::Button, ONBOARDING_COMPLETE_LABEL)
                .tagged(OnboardingScreen::Complete),
        ],
        Screen::Content => {
            vec![Element::new(ElementKind::StaticText, CONTENT_TITLE).tagged(ContentScreen::Title)]
        }
    }
}

/// Top-level view model: which screen is up, and the onboarding action.
#[derive(Debug)]
pub struct AppViewModel {
    context: Arc<AutomationContext>,
    updates: watch::Receiver<bool>,
    screen: Screen,
}

impl AppViewModel {
    /// Read the flag once and pick the initial screen.
    #[must_use]
    pub fn new(context: Arc<AutomationContext>) -> Self {
        let mut updates = context.subscribe();
        let screen = Screen::for_flag(*updates.borrow_and_update());
        Self {
            context,
            updates,
            screen,
        }
    }

    /// Screen currently shown
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Elements of the current screen
    #[must_use]
    pub fn elements(&self) -> Vec<Element> {
        render(self.screen)
    }

    /// The shared context
    #[must_use]
    pub fn context(&self) -> &Arc<AutomationContext> {
        &self.context
    }

    /// Pick up a flag change published since the last look. Returns whether
    /// the screen changed.
    pub fn refresh(&mut self) -> bool {
        if !self.updates.has_changed().unwrap_or(false) {
            return false;
        }
        let next = Screen::for_flag(*self.updates.borrow_and_update());
        let changed = next != self.screen;
        self.screen = next;
        changed
    }

    /// Record that onboarding was seen and move to the main flow.
    pub fn mark_onboarding_seen(&mut self) -> FirstRunResult<()> {
        self.context.set_show_onboarding(false)?;
        let _ = self.refresh();
        Ok(())
    }

    /// Activate the button tagged `automation_id` on the current screen.
    pub fn tap(&mut self, automation_id: &str) -> FirstRunResult<()> {
        let _ = self.refresh();
        let tappable = self.elements().into_iter().any(|element| {
            element.kind == ElementKind::Button && element.automation_id == Some(automation_id)
        });
        if !tappable {
            return Err(FirstRunError::assertion(format!(
                "no button tagged {automation_id} on the {} screen",
                self.screen
            )));
        }
        if automation_id == OnboardingScreen::Complete.automation_id() {
            self.mark_onboarding_seen()?;
        }
        Ok(())
    }
}
