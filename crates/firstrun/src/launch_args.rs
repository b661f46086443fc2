//! Launch arguments understood by the app at start-up.
//!
//! Automated tests steer the app past stateful screens by passing reserved
//! tokens in the process argument list. [`configure`] runs once, before any
//! view reads the context, and applies whichever overrides are present.

use crate::context::AutomationContext;
use crate::result::FirstRunResult;
use std::fmt;

/// Reserved launch-argument tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LaunchArgumentKey {
    /// Treat onboarding as already seen
    SkipOnboarding,
}

impl LaunchArgumentKey {
    /// Every reserved token
    pub const ALL: [Self; 1] = [Self::SkipOnboarding];

    /// The literal token, matched exactly and case-sensitively
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SkipOnboarding => "-skipOnboarding",
        }
    }

    /// Whether `arguments` carries this token
    pub fn is_present<I, S>(self, arguments: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        arguments
            .into_iter()
            .any(|argument| argument.as_ref() == self.as_str())
    }
}

impl fmt::Display for LaunchArgumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for LaunchArgumentKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Apply start-up overrides found in `launch_arguments` to `context`.
///
/// With `-skipOnboarding` present the flag is forced to `false`; without it
/// nothing happens. Returns whether an override was applied.
pub fn configure<I, S>(context: &AutomationContext, launch_arguments: I) -> FirstRunResult<bool>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if !LaunchArgumentKey::SkipOnboarding.is_present(launch_arguments) {
        return Ok(false);
    }
    context.set_show_onboarding(false)?;
    tracing::info!(
        token = LaunchArgumentKey::SkipOnboarding.as_str(),
        "onboarding skipped by launch argument"
    );
    Ok(true)
}
