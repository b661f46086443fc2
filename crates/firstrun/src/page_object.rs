//! Page objects for UI tests.
//!
//! A page object wraps one screen of the app under test and exposes named
//! checks and actions, so tests read as steps ("the content screen is up")
//! rather than element lookups. Checks return [`FirstRunResult`]: a missing
//! element is an [`FirstRunError::AssertionFailed`], and successful checks hand
//! back the page for chaining.
//!
//! # Example
//!
//! ```
//! use firstrun::{ContentScreenPage, HeadlessApp, MemorySettingStore, OnboardingScreenPage};
//!
//! let mut app = HeadlessApp::new(MemorySettingStore::with_show_onboarding(true));
//! app.launch()?;
//!
//! let content: ContentScreenPage<'_, HeadlessApp> = OnboardingScreenPage::new(&mut app)
//!     .is_on_screen()?
//!     .complete()?;
//! content.is_on_screen()?;
//! # Ok::<(), firstrun::FirstRunError>(())
//! ```

use crate::automation::{AutomationIdentifying, ContentScreen, OnboardingScreen};
use crate::result::{FirstRunError, FirstRunResult};
use crate::view::{Element, ElementKind};

/// Elements of one kind currently on screen, looked up by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementQuery {
    elements: Vec<Element>,
}

impl ElementQuery {
    /// Wrap a list of elements
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Element tagged `id`, if present
    #[must_use]
    pub fn element(&self, id: impl AutomationIdentifying) -> Option<&Element> {
        let id = id.automation_id();
        self.elements
            .iter()
            .find(|element| element.automation_id == Some(id))
    }

    /// Whether an element tagged `id` is present
    #[must_use]
    pub fn exists(&self, id: impl AutomationIdentifying) -> bool {
        self.element(id).is_some()
    }

    /// Number of elements
    #[must_use]
    pub fn count(&self) -> usize {
        self.elements.len()
    }
}

/// The app as automation sees it.
pub trait AppUnderTest {
    /// Elements of `kind` on the current screen
    fn query(&self, kind: ElementKind) -> FirstRunResult<ElementQuery>;

    /// Tap the element tagged `automation_id`
    fn tap(&mut self, automation_id: &str) -> FirstRunResult<()>;

    /// Static texts on the current screen
    fn static_texts(&self) -> FirstRunResult<ElementQuery> {
        self.query(ElementKind::StaticText)
    }

    /// Buttons on the current screen
    fn buttons(&self) -> FirstRunResult<ElementQuery> {
        self.query(ElementKind::Button)
    }
}

/// Common surface of page objects.
pub trait PageObject {
    /// Whether the page's key element is on screen
    fn is_loaded(&self) -> bool;

    /// Page name for logging and failure messages
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

fn require(page: &str, present: bool, id: impl AutomationIdentifying) -> FirstRunResult<()> {
    if present {
        Ok(())
    } else {
        Err(FirstRunError::assertion(format!(
            "{page}: expected element {} to exist",
            id.automation_id()
        )))
    }
}

/// Page object for the main-flow screen.
#[derive(Debug)]
pub struct ContentScreenPage<'a, A: AppUnderTest> {
    app: &'a A,
}

impl<'a, A: AppUnderTest> ContentScreenPage<'a, A> {
    /// Wrap the app
    #[must_use]
    pub fn new(app: &'a A) -> Self {
        Self { app }
    }

    /// The title text, if shown
    pub fn title(&self) -> FirstRunResult<Option<Element>> {
        Ok(self
            .app
            .static_texts()?
            .element(ContentScreen::Title)
            .cloned())
    }

    /// Assert the main flow is on screen
    pub fn is_on_screen(&self) -> FirstRunResult<&Self> {
        let present = self.title()?.is_some();
        require("ContentScreen", present, ContentScreen::Title)?;
        Ok(self)
    }
}

impl<A: AppUnderTest> PageObject for ContentScreenPage<'_, A> {
    fn is_loaded(&self) -> bool {
        self.is_on_screen().is_ok()
    }

    fn page_name(&self) -> &str {
        "ContentScreen"
    }
}

/// Page object for the onboarding screen.
#[derive(Debug)]
pub struct OnboardingScreenPage<'a, A: AppUnderTest> {
    app: &'a mut A,
}

impl<'a, A: AppUnderTest> OnboardingScreenPage<'a, A> {
    /// Wrap the app
    #[must_use]
    pub fn new(app: &'a mut A) -> Self {
        Self { app }
    }

    /// Assert onboarding is on screen
    pub fn is_on_screen(self) -> FirstRunResult<Self> {
        self.verify()?;
        Ok(self)
    }

    fn verify(&self) -> FirstRunResult<()> {
        let present = self.app.buttons()?.exists(OnboardingScreen::Complete);
        require("OnboardingScreen", present, OnboardingScreen::Complete)
    }

    /// Finish onboarding; the main flow follows.
    pub fn complete(self) -> FirstRunResult<ContentScreenPage<'a, A>> {
        self.app.tap(OnboardingScreen::Complete.automation_id())?;
        let app: &'a A = self.app;
        Ok(ContentScreenPage::new(app))
    }
}

impl<A: AppUnderTest> PageObject for OnboardingScreenPage<'_, A> {
    fn is_loaded(&self) -> bool {
        self.verify().is_ok()
    }

    fn page_name(&self) -> &str {
        "OnboardingScreen"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::view::{render, Screen};

    /// App double that shows a fixed screen and records taps.
    #[derive(Debug)]
    struct FixedApp {
        screen: Screen,
        taps: Vec<String>,
    }

    impl FixedApp {
        fn showing(screen: Screen) -> Self {
            Self {
                screen,
                taps: Vec::new(),
            }
        }
    }

    impl AppUnderTest for FixedApp {
        fn query(&self, kind: ElementKind) -> FirstRunResult<ElementQuery> {
            Ok(ElementQuery::new(
                render(self.screen)
                    .into_iter()
                    .filter(|element| element.kind == kind)
                    .collect(),
            ))
        }

        fn tap(&mut self, automation_id: &str) -> FirstRunResult<()> {
            self.taps.push(automation_id.to_string());
            self.screen = Screen::Content;
            Ok(())
        }
    }

    mod element_query_tests {
        use super::*;

        #[test]
        fn test_lookup_by_typed_id() {
            let query = ElementQuery::new(render(Screen::Content));
            assert!(query.exists(ContentScreen::Title));
            assert!(!query.exists(OnboardingScreen::Complete));
            assert_eq!(query.count(), 1);
        }

        #[test]
        fn test_lookup_by_raw_string() {
            let query = ElementQuery::new(render(Screen::Content));
            assert!(query.exists("automation.content.title"));
        }
    }

    mod content_page_tests {
        use super::*;

        #[test]
        fn test_is_on_screen_passes_on_content() {
            let app = FixedApp::showing(Screen::Content);
            let page = ContentScreenPage::new(&app);
            assert!(page.is_on_screen().is_ok());
            assert!(page.is_loaded());
            assert_eq!(page.page_name(), "ContentScreen");
        }

        #[test]
        fn test_is_on_screen_fails_on_onboarding() {
            let app = FixedApp::showing(Screen::Onboarding);
            let err = ContentScreenPage::new(&app).is_on_screen().unwrap_err();
            assert!(err.to_string().contains("automation.content.title"));
        }

        #[test]
        fn test_title_label() {
            let app = FixedApp::showing(Screen::Content);
            let title = ContentScreenPage::new(&app).title().unwrap().unwrap();
            assert_eq!(title.label, crate::view::CONTENT_TITLE);
        }
    }

    mod onboarding_page_tests {
        use super::*;

        #[test]
        fn test_complete_taps_and_returns_content_page() {
            let mut app = FixedApp::showing(Screen::Onboarding);
            OnboardingScreenPage::new(&mut app)
                .is_on_screen()
                .unwrap()
                .complete()
                .unwrap()
                .is_on_screen()
                .unwrap();
            assert_eq!(app.taps, vec!["automation.onboarding.complete".to_string()]);
        }

        #[test]
        fn test_is_on_screen_fails_on_content() {
            let mut app = FixedApp::showing(Screen::Content);
            let page = OnboardingScreenPage::new(&mut app);
            assert!(!page.is_loaded());
        }
    }
}
