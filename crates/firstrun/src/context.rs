//! The automation context: in-memory source of truth for "show onboarding".
//!
//! One context is built at start-up and shared by `Arc` between the launch
//! argument configurator and the view layer. It caches the persisted flag and
//! writes every assignment through to its [`SettingStorage`].
//!
//! The cached value lives in a [`tokio::sync::watch`] channel. A write holds
//! the channel's write lock while the store is updated, so a reader can never
//! see the cache ahead of (or behind) the store, and two writers can never
//! interleave. Subscribers are woken only when the value actually changes.

use crate::result::FirstRunResult;
use crate::setting_store::{FileSettingStore, SettingStorage};
use tokio::sync::watch;

/// Shared onboarding state with write-through persistence.
#[derive(Debug)]
pub struct AutomationContext {
    store: Box<dyn SettingStorage>,
    show_onboarding: watch::Sender<bool>,
}

impl AutomationContext {
    /// Build a context over `store`, seeding the cache from the persisted value.
    pub fn new(store: impl SettingStorage + 'static) -> FirstRunResult<Self> {
        Self::from_boxed(Box::new(store))
    }

    /// Build a context over an already boxed store.
    pub fn from_boxed(store: Box<dyn SettingStorage>) -> FirstRunResult<Self> {
        let initial = store.show_onboarding()?;
        tracing::debug!(show_onboarding = initial, "automation context initialised");
        Ok(Self {
            store,
            show_onboarding: watch::Sender::new(initial),
        })
    }

    /// Build a context over the settings file at the default location.
    pub fn with_default_store() -> FirstRunResult<Self> {
        Self::new(FileSettingStore::at_default_location()?)
    }

    /// Current cached flag.
    #[must_use]
    pub fn show_onboarding(&self) -> bool {
        *self.show_onboarding.borrow()
    }

    /// Update the flag and persist it as one atomic step.
    ///
    /// The store is written first; the cache only changes if that succeeds.
    /// The value is written even when it equals the cached one, but
    /// subscribers are notified only on an actual change.
    pub fn set_show_onboarding(&self, value: bool) -> FirstRunResult<()> {
        let mut outcome = Ok(());
        let changed = self.show_onboarding.send_if_modified(|current| {
            match self.store.set_show_onboarding(value) {
                Ok(()) => {
                    let changed = *current != value;
                    *current = value;
                    changed
                }
                Err(err) => {
                    outcome = Err(err);
                    false
                }
            }
        });
        match &outcome {
            Ok(()) => tracing::debug!(show_onboarding = value, changed, "onboarding flag set"),
            Err(err) => tracing::warn!(error = %err, "failed to persist onboarding flag"),
        }
        outcome
    }

    /// Receive a notification each time the flag changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.show_onboarding.subscribe()
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &dyn SettingStorage {
        self.store.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::result::FirstRunError;
    use crate::setting_store::MemorySettingStore;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    /// Store whose writes can be switched to fail.
    #[derive(Debug, Default)]
    struct FlakyStore {
        inner: MemorySettingStore,
        fail_writes: AtomicBool,
    }

    impl SettingStorage for FlakyStore {
        fn show_onboarding(&self) -> FirstRunResult<bool> {
            self.inner.show_onboarding()
        }

        fn set_show_onboarding(&self, value: bool) -> FirstRunResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(FirstRunError::storage(Path::new("flaky"), "write refused"));
            }
            self.inner.set_show_onboarding(value)
        }
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_seeds_from_persisted_true() {
            let store = MemorySettingStore::with_show_onboarding(true);
            let context = AutomationContext::new(store).unwrap();
            assert!(context.show_onboarding());
        }

        #[test]
        fn test_seeds_false_from_fresh_store() {
            let context = AutomationContext::new(MemorySettingStore::new()).unwrap();
            assert!(!context.show_onboarding());
        }

        #[test]
        fn test_propagates_store_read_failure() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("settings.json");
            std::fs::write(&path, "not json").unwrap();

            let err = AutomationContext::new(FileSettingStore::new(&path)).unwrap_err();
            assert!(matches!(err, FirstRunError::CorruptStore { .. }));
        }
    }

    mod write_through_tests {
        use super::*;

        #[test]
        fn test_set_writes_through() {
            let store = MemorySettingStore::with_show_onboarding(true);
            let context = AutomationContext::new(store.clone()).unwrap();

            context.set_show_onboarding(false).unwrap();

            assert!(!context.show_onboarding());
            assert!(!store.show_onboarding().unwrap());
        }

        #[test]
        fn test_same_value_still_written() {
            let store = MemorySettingStore::new();
            let context = AutomationContext::new(store.clone()).unwrap();
            assert!(!store.is_set());

            context.set_show_onboarding(false).unwrap();
            assert!(store.is_set());
        }

        #[test]
        fn test_failed_write_keeps_cache() {
            let store = Arc::new(FlakyStore::default());
            store.inner.set_show_onboarding(true).unwrap();
            let context = AutomationContext::new(Arc::clone(&store)).unwrap();

            store.fail_writes.store(true, Ordering::SeqCst);
            let err = context.set_show_onboarding(false).unwrap_err();

            assert!(matches!(err, FirstRunError::Storage { .. }));
            assert!(context.show_onboarding());
            assert!(store.show_onboarding().unwrap());
        }

        #[test]
        fn test_store_accessor_sees_writes() {
            let context = AutomationContext::new(MemorySettingStore::new()).unwrap();
            context.set_show_onboarding(true).unwrap();
            assert!(context.store().show_onboarding().unwrap());
        }
    }

    mod notification_tests {
        use super::*;

        #[test]
        fn test_subscriber_sees_change() {
            let context = AutomationContext::new(MemorySettingStore::with_show_onboarding(true))
                .unwrap();
            let mut updates = context.subscribe();
            assert!(!updates.has_changed().unwrap());

            context.set_show_onboarding(false).unwrap();

            assert!(updates.has_changed().unwrap());
            assert!(!*updates.borrow_and_update());
        }

        #[test]
        fn test_no_notification_without_change() {
            let context = AutomationContext::new(MemorySettingStore::new()).unwrap();
            let updates = context.subscribe();

            context.set_show_onboarding(false).unwrap();

            assert!(!updates.has_changed().unwrap());
        }

        #[test]
        fn test_no_notification_on_failed_write() {
            let store = Arc::new(FlakyStore::default());
            store.fail_writes.store(true, Ordering::SeqCst);
            let context = AutomationContext::new(Arc::clone(&store)).unwrap();
            let updates = context.subscribe();

            assert!(context.set_show_onboarding(true).is_err());
            assert!(!updates.has_changed().unwrap());
        }
    }

    mod concurrency_tests {
        use super::*;

        #[test]
        fn test_concurrent_writers_leave_cache_and_store_in_agreement() {
            let store = MemorySettingStore::new();
            let context = Arc::new(AutomationContext::new(store.clone()).unwrap());

            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let context = Arc::clone(&context);
                    thread::spawn(move || {
                        for round in 0..200 {
                            context.set_show_onboarding((i + round) % 2 == 0).unwrap();
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(context.show_onboarding(), store.show_onboarding().unwrap());
        }

        #[test]
        fn test_reader_never_sees_cache_ahead_of_store() {
            let store = MemorySettingStore::new();
            let context = Arc::new(AutomationContext::new(store.clone()).unwrap());

            let writer = {
                let context = Arc::clone(&context);
                thread::spawn(move || {
                    for round in 0..500 {
                        context.set_show_onboarding(round % 2 == 0).unwrap();
                    }
                })
            };

            for _ in 0..500 {
                // Holding the read guard blocks writers, so both views must agree.
                let cached = context.show_onboarding.borrow();
                assert_eq!(*cached, store.show_onboarding().unwrap());
            }
            writer.join().unwrap();
        }
    }
}
