//! Test-side assembly of launch arguments.
//!
//! A UI test collects the start-up flags it wants before the app launches.
//! Several setup steps may contribute, possibly from different threads, so the
//! set sits behind a mutex and every insert is exclusive. Duplicates collapse.

use crate::launch_args::LaunchArgumentKey;
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

/// Deduplicating, thread-safe collector of launch arguments.
///
/// # Example
///
/// ```
/// use firstrun::LaunchArgumentBuilder;
///
/// let builder = LaunchArgumentBuilder::new(["-foo", "-foo", "-bar"]);
/// builder.skip_onboarding().skip_onboarding();
///
/// assert_eq!(builder.build(), vec!["-bar", "-foo", "-skipOnboarding"]);
/// ```
#[derive(Debug, Default)]
pub struct LaunchArgumentBuilder {
    arguments: Mutex<BTreeSet<String>>,
}

impl LaunchArgumentBuilder {
    /// Create a builder seeded with `initial_arguments`, deduplicated.
    pub fn new<I, S>(initial_arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            arguments: Mutex::new(initial_arguments.into_iter().map(Into::into).collect()),
        }
    }

    /// Add the `-skipOnboarding` token. Idempotent.
    pub fn skip_onboarding(&self) -> &Self {
        self.key(LaunchArgumentKey::SkipOnboarding)
    }

    /// Add a reserved token.
    pub fn key(&self, key: LaunchArgumentKey) -> &Self {
        self.argument(key.as_str())
    }

    /// Add an arbitrary argument.
    pub fn argument(&self, argument: impl Into<String>) -> &Self {
        let argument = argument.into();
        let inserted = self.lock().insert(argument.clone());
        tracing::debug!(%argument, inserted, "launch argument added");
        self
    }

    /// Whether `argument` is already in the set.
    #[must_use]
    pub fn contains(&self, argument: &str) -> bool {
        self.lock().contains(argument)
    }

    /// Number of distinct arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no argument has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Flatten the set into a launch argument list.
    ///
    /// Every member appears exactly once. Order carries no meaning; it happens
    /// to be sorted.
    #[must_use]
    pub fn build(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        self.arguments.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Into<String>> FromIterator<S> for LaunchArgumentBuilder {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn as_set(arguments: &[String]) -> HashSet<&str> {
        arguments.iter().map(String::as_str).collect()
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_dedups_initial_arguments() {
            let built = LaunchArgumentBuilder::new(["-foo", "-foo", "-bar"]).build();
            assert_eq!(built.len(), 2);
            assert_eq!(as_set(&built), HashSet::from(["-foo", "-bar"]));
        }

        #[test]
        fn test_empty_builder() {
            let builder = LaunchArgumentBuilder::default();
            assert!(builder.is_empty());
            assert!(builder.build().is_empty());
        }

        #[test]
        fn test_from_iterator() {
            let builder: LaunchArgumentBuilder = vec!["-a".to_string(), "-a".to_string()]
                .into_iter()
                .collect();
            assert_eq!(builder.len(), 1);
        }
    }

    mod skip_onboarding_tests {
        use super::*;

        #[test]
        fn test_adds_reserved_token() {
            let builder = LaunchArgumentBuilder::new(Vec::<String>::new());
            builder.skip_onboarding();
            assert_eq!(builder.build(), vec!["-skipOnboarding".to_string()]);
        }

        #[test]
        fn test_idempotent() {
            let once = LaunchArgumentBuilder::new(["-foo"]);
            once.skip_onboarding();
            let twice = LaunchArgumentBuilder::new(["-foo"]);
            twice.skip_onboarding().skip_onboarding();
            assert_eq!(once.build(), twice.build());
        }

        #[test]
        fn test_merges_with_existing_token() {
            let builder = LaunchArgumentBuilder::new(["-skipOnboarding"]);
            builder.skip_onboarding();
            assert_eq!(builder.len(), 1);
            assert!(builder.contains("-skipOnboarding"));
        }

        #[test]
        fn test_chains_with_other_arguments() {
            let builder = LaunchArgumentBuilder::default();
            builder
                .argument("-uiTesting")
                .skip_onboarding()
                .key(LaunchArgumentKey::SkipOnboarding);
            assert_eq!(
                as_set(&builder.build()),
                HashSet::from(["-uiTesting", "-skipOnboarding"])
            );
        }
    }

    mod concurrency_tests {
        use super::*;

        #[test]
        fn test_concurrent_inserts_are_not_lost() {
            let builder = Arc::new(LaunchArgumentBuilder::default());
            let handles: Vec<_> = (0..8)
                .map(|worker| {
                    let builder = Arc::clone(&builder);
                    thread::spawn(move || {
                        for i in 0..50 {
                            builder.argument(format!("-w{worker}-{i}"));
                            builder.skip_onboarding();
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            let built = builder.build();
            assert_eq!(built.len(), 8 * 50 + 1);
            assert_eq!(as_set(&built).len(), built.len());
            assert!(builder.contains("-skipOnboarding"));
        }
    }
}
