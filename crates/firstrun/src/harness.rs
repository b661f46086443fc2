//! In-process app under test and the base UI test case.
//!
//! [`HeadlessApp`] stands in for a launched app: `launch()` plays the start-up
//! sequence (build the context from the store, apply launch arguments, build
//! the view) and automation then queries and taps its elements. Launching again
//! builds everything afresh from the store, like a process restart.
//!
//! [`UiTestCase`] is the shared setup for UI tests: it owns the app, collects
//! launch arguments through a [`LaunchArgumentBuilder`], and launches.

use crate::context::AutomationContext;
use crate::fixture::Fixture;
use crate::launch_args::configure;
use crate::launch_builder::LaunchArgumentBuilder;
use crate::page_object::{AppUnderTest, ElementQuery};
use crate::result::{FirstRunError, FirstRunResult};
use crate::setting_store::SettingStorage;
use crate::view::{AppViewModel, ElementKind, Screen};
use std::fmt;
use std::sync::Arc;

/// Produces the store a freshly launched app reads from.
pub type StoreFactory = Arc<dyn Fn() -> Box<dyn SettingStorage> + Send + Sync>;

fn cloning_factory<S>(store: S) -> StoreFactory
where
    S: SettingStorage + Clone + 'static,
{
    Arc::new(move || Box::new(store.clone()) as Box<dyn SettingStorage>)
}

/// Headless stand-in for the app under test.
pub struct HeadlessApp {
    store_factory: StoreFactory,
    launch_arguments: Vec<String>,
    view: Option<AppViewModel>,
}

impl fmt::Debug for HeadlessApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessApp")
            .field("launch_arguments", &self.launch_arguments)
            .field("running", &self.is_running())
            .field("screen", &self.view.as_ref().map(AppViewModel::screen))
            .finish()
    }
}

impl HeadlessApp {
    /// App whose launches read clones of `store`. Clones of the shipped
    /// stores share storage, so state carries across launches.
    #[must_use]
    pub fn new<S>(store: S) -> Self
    where
        S: SettingStorage + Clone + 'static,
    {
        Self::with_store_factory(cloning_factory(store))
    }

    /// App whose launches read a store from `factory`.
    #[must_use]
    pub fn with_store_factory(factory: StoreFactory) -> Self {
        Self {
            store_factory: factory,
            launch_arguments: Vec::new(),
            view: None,
        }
    }

    /// Arguments the next launch passes to the app
    #[must_use]
    pub fn launch_arguments(&self) -> &[String] {
        &self.launch_arguments
    }

    /// Replace the arguments for the next launch
    pub fn set_launch_arguments(&mut self, arguments: Vec<String>) {
        self.launch_arguments = arguments;
    }

    /// Start (or restart) the app.
    pub fn launch(&mut self) -> FirstRunResult<()> {
        let context = Arc::new(AutomationContext::from_boxed((self.store_factory)())?);
        let _ = configure(&context, &self.launch_arguments)?;
        let view = AppViewModel::new(context);
        tracing::info!(
            arguments = ?self.launch_arguments,
            screen = %view.screen(),
            "headless app launched"
        );
        self.view = Some(view);
        Ok(())
    }

    /// Stop the app.
    pub fn terminate(&mut self) {
        self.view = None;
    }

    /// Whether `launch` has run since the last `terminate`
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.view.is_some()
    }

    /// Screen currently shown
    pub fn screen(&self) -> FirstRunResult<Screen> {
        self.view().map(AppViewModel::screen)
    }

    /// Deliver pending flag changes to the view. Returns whether the screen
    /// changed.
    pub fn refresh(&mut self) -> FirstRunResult<bool> {
        Ok(self.view_mut()?.refresh())
    }

    /// Context of the running app
    pub fn context(&self) -> FirstRunResult<&Arc<AutomationContext>> {
        self.view().map(AppViewModel::context)
    }

    fn view(&self) -> FirstRunResult<&AppViewModel> {
        self.view
            .as_ref()
            .ok_or_else(|| FirstRunError::invalid_state("app is not running; call launch() first"))
    }

    fn view_mut(&mut self) -> FirstRunResult<&mut AppViewModel> {
        self.view
            .as_mut()
            .ok_or_else(|| FirstRunError::invalid_state("app is not running; call launch() first"))
    }
}

impl AppUnderTest for HeadlessApp {
    fn query(&self, kind: ElementKind) -> FirstRunResult<ElementQuery> {
        let elements = self
            .view()?
            .elements()
            .into_iter()
            .filter(|element| element.kind == kind)
            .collect();
        Ok(ElementQuery::new(elements))
    }

    fn tap(&mut self, automation_id: &str) -> FirstRunResult<()> {
        self.view_mut()?.tap(automation_id)
    }
}

/// Base UI test case.
///
/// `setup` creates the app and seeds the argument set from the app's existing
/// launch arguments; tests then add overrides such as
/// [`skip_onboarding`](Self::skip_onboarding) and call
/// [`launch`](Self::launch). Arguments added before `setup` are discarded.
pub struct UiTestCase {
    store_factory: StoreFactory,
    default_arguments: Vec<String>,
    launch_arguments: LaunchArgumentBuilder,
    app: Option<HeadlessApp>,
}

impl fmt::Debug for UiTestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiTestCase")
            .field("default_arguments", &self.default_arguments)
            .field("launch_arguments", &self.launch_arguments)
            .field("app", &self.app)
            .finish()
    }
}

impl UiTestCase {
    /// Test case over clones of `store`
    #[must_use]
    pub fn new<S>(store: S) -> Self
    where
        S: SettingStorage + Clone + 'static,
    {
        Self::with_store_factory(cloning_factory(store))
    }

    /// Test case whose app launches read a store from `factory`
    #[must_use]
    pub fn with_store_factory(factory: StoreFactory) -> Self {
        Self {
            store_factory: factory,
            default_arguments: Vec::new(),
            launch_arguments: LaunchArgumentBuilder::default(),
            app: None,
        }
    }

    /// Launch arguments the app carries before the test adds any
    #[must_use]
    pub fn with_default_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Ask the next launch to skip onboarding
    pub fn skip_onboarding(&self) -> &Self {
        self.launch_arguments.skip_onboarding();
        self
    }

    /// The argument set for the next launch
    #[must_use]
    pub fn launch_arguments(&self) -> &LaunchArgumentBuilder {
        &self.launch_arguments
    }

    /// Hand the collected arguments to the app and launch it
    pub fn launch(&mut self) -> FirstRunResult<&mut HeadlessApp> {
        let arguments = self.launch_arguments.build();
        let app = self.app.as_mut().ok_or_else(|| {
            FirstRunError::invalid_state("UI test case is not set up; call setup() first")
        })?;
        app.set_launch_arguments(arguments);
        app.launch()?;
        Ok(app)
    }

    /// The app under test
    pub fn app(&self) -> FirstRunResult<&HeadlessApp> {
        self.app
            .as_ref()
            .ok_or_else(|| FirstRunError::invalid_state("UI test case is not set up"))
    }

    /// The app under test, mutably
    pub fn app_mut(&mut self) -> FirstRunResult<&mut HeadlessApp> {
        self.app
            .as_mut()
            .ok_or_else(|| FirstRunError::invalid_state("UI test case is not set up"))
    }
}

impl Fixture for UiTestCase {
    fn setup(&mut self) -> FirstRunResult<()> {
        let mut app = HeadlessApp::with_store_factory(Arc::clone(&self.store_factory));
        app.set_launch_arguments(self.default_arguments.clone());
        self.launch_arguments = LaunchArgumentBuilder::new(app.launch_arguments().iter().cloned());
        self.app = Some(app);
        Ok(())
    }

    fn teardown(&mut self) -> FirstRunResult<()> {
        if let Some(mut app) = self.app.take() {
            app.terminate();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "UiTestCase"
    }
}
