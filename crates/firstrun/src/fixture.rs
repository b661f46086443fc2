//! Test fixtures with guaranteed teardown.

use crate::result::FirstRunResult;

/// Trait for test fixtures that can be set up and torn down.
///
/// # Example
///
/// ```
/// use firstrun::{run_fixture, Fixture, FirstRunResult};
///
/// #[derive(Default)]
/// struct Counter {
///     live: bool,
/// }
///
/// impl Fixture for Counter {
///     fn setup(&mut self) -> FirstRunResult<()> {
///         self.live = true;
///         Ok(())
///     }
///
///     fn teardown(&mut self) -> FirstRunResult<()> {
///         self.live = false;
///         Ok(())
///     }
/// }
///
/// let mut counter = Counter::default();
/// let was_live = run_fixture(&mut counter, |c| Ok(c.live))?;
/// assert!(was_live);
/// assert!(!counter.live);
/// # Ok::<(), firstrun::FirstRunError>(())
/// ```
pub trait Fixture {
    /// Set up the fixture before the test body.
    fn setup(&mut self) -> FirstRunResult<()>;

    /// Tear down the fixture after the test body.
    fn teardown(&mut self) -> FirstRunResult<()>;

    /// Fixture name for logging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Run `body` between `setup` and `teardown`.
///
/// Teardown runs whether the body succeeds or not, and also after a failed
/// setup. The first error wins: a body error is reported even if teardown
/// fails afterwards.
pub fn run_fixture<F, T>(
    fixture: &mut F,
    body: impl FnOnce(&mut F) -> FirstRunResult<T>,
) -> FirstRunResult<T>
where
    F: Fixture + ?Sized,
{
    tracing::debug!(fixture = fixture.name(), "fixture setup");
    if let Err(err) = fixture.setup() {
        if let Err(teardown_err) = fixture.teardown() {
            tracing::warn!(fixture = fixture.name(), error = %teardown_err, "teardown after failed setup also failed");
        }
        return Err(err);
    }

    let outcome = body(fixture);

    tracing::debug!(fixture = fixture.name(), "fixture teardown");
    let teardown = fixture.teardown();
    match (outcome, teardown) {
        (Ok(value), Ok(())) => Ok(value),
        (Err(err), teardown) => {
            if let Err(teardown_err) = teardown {
                tracing::warn!(fixture = fixture.name(), error = %teardown_err, "teardown failed after test error");
            }
            Err(err)
        }
        (Ok(_), Err(err)) => Err(err),
    }
}
