//! firstrun: a first-run onboarding flag that UI tests can steer.
//!
//! The app persists a single "show onboarding" flag. At start-up the
//! `-skipOnboarding` launch argument can force it off, so automated tests land
//! straight in the main flow. Tests assemble those arguments with a
//! deduplicating builder and check screens through page objects.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │ LaunchArgument   │   │ launch_args::    │   │ AppViewModel     │
//! │ Builder (tests)  │──►│ configure()      │──►│ onboarding or    │
//! │ dedup, sorted    │   │ -skipOnboarding  │   │ content screen   │
//! └──────────────────┘   └────────┬─────────┘   └────────▲─────────┘
//!                                 │ set_show_onboarding   │ subscribe
//!                        ┌────────▼───────────────────────┴─────────┐
//!                        │ AutomationContext (Arc, write-through)    │
//!                        └────────┬──────────────────────────────────┘
//!                        ┌────────▼─────────┐
//!                        │ SettingStorage   │ hasOnboardingBeenShown
//!                        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use firstrun::{configure, AutomationContext, MemorySettingStore, SettingStorage};
//!
//! let store = MemorySettingStore::with_show_onboarding(true);
//! let context = AutomationContext::new(store.clone())?;
//! assert!(context.show_onboarding());
//!
//! configure(&context, ["/path/to/app", "-skipOnboarding"])?;
//! assert!(!context.show_onboarding());
//! assert!(!store.show_onboarding()?);
//! # Ok::<(), firstrun::FirstRunError>(())
//! ```

#![warn(missing_docs)]

// Lets `#[derive(AutomationId)]` name `::firstrun` from inside this crate.
extern crate self as firstrun;

mod automation;
mod context;
mod fixture;
mod harness;
mod launch_args;
mod launch_builder;
mod page_object;
mod result;
mod setting_store;
mod view;

pub use automation::{
    all_automation_ids, AutomationCatalog, AutomationIdentifying, ContentScreen, OnboardingScreen,
};
pub use context::AutomationContext;
pub use firstrun_derive::AutomationId;
pub use fixture::{run_fixture, Fixture};
pub use harness::{HeadlessApp, StoreFactory, UiTestCase};
pub use launch_args::{configure, LaunchArgumentKey};
pub use launch_builder::LaunchArgumentBuilder;
pub use page_object::{
    AppUnderTest, ContentScreenPage, ElementQuery, OnboardingScreenPage, PageObject,
};
pub use result::{FirstRunError, FirstRunResult};
pub use setting_store::{
    default_settings_path, FileSettingStore, MemorySettingStore, SettingStorage,
    DEFAULT_SETTINGS_DIR, DEFAULT_SETTINGS_FILE, ONBOARDING_KEY,
};
pub use view::{
    render, AppViewModel, Element, ElementKind, Screen, CONTENT_TITLE, ONBOARDING_COMPLETE_LABEL,
    ONBOARDING_MESSAGE,
};
