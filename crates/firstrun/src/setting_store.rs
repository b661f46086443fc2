//! Durable storage for the onboarding flag.
//!
//! The flag lives under a single well-known key in a per-user key-value
//! settings store. Two backends are provided:
//!
//! - [`FileSettingStore`]: a JSON object on disk. Every read goes to the file,
//!   so separate instances pointed at the same path observe each other's
//!   writes. Keys other than ours are preserved on write.
//! - [`MemorySettingStore`]: an in-process map. Clones share the same map,
//!   which makes it the natural stand-in for the real store in tests.
//!
//! A missing key always reads as `false`.

use crate::result::{FirstRunError, FirstRunResult};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Key the onboarding flag is persisted under
pub const ONBOARDING_KEY: &str = "hasOnboardingBeenShown";

/// Directory (relative to the working directory) holding the default settings file
pub const DEFAULT_SETTINGS_DIR: &str = ".firstrun";

/// File name of the default settings file
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Read/write access to the persisted onboarding flag.
///
/// Implementations must be shareable across threads; the automation context
/// serializes its own writes but readers may live anywhere.
pub trait SettingStorage: Send + Sync + Debug {
    /// Persisted flag value, `false` when it was never written.
    fn show_onboarding(&self) -> FirstRunResult<bool>;

    /// Persist a new flag value.
    fn set_show_onboarding(&self, value: bool) -> FirstRunResult<()>;
}

impl<T: SettingStorage + ?Sized> SettingStorage for Arc<T> {
    fn show_onboarding(&self) -> FirstRunResult<bool> {
        (**self).show_onboarding()
    }

    fn set_show_onboarding(&self, value: bool) -> FirstRunResult<()> {
        (**self).set_show_onboarding(value)
    }
}

/// Default settings file location: `.firstrun/settings.json` under the
/// current working directory.
pub fn default_settings_path() -> FirstRunResult<PathBuf> {
    Ok(std::env::current_dir()?
        .join(DEFAULT_SETTINGS_DIR)
        .join(DEFAULT_SETTINGS_FILE))
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Settings store backed by a JSON object on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSettingStore {
    path: PathBuf,
}

impl FileSettingStore {
    /// Create a store for the given settings file. Nothing is touched on disk
    /// until the first read or write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at [`default_settings_path`].
    pub fn at_default_location() -> FirstRunResult<Self> {
        default_settings_path().map(Self::new)
    }

    /// Location of the settings file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> FirstRunResult<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(FirstRunError::storage(&self.path, err.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(FirstRunError::corrupt_store(
                &self.path,
                format!("expected a JSON object, found {}", json_kind(&other)),
            )),
            Err(err) => Err(FirstRunError::corrupt_store(&self.path, err.to_string())),
        }
    }

    fn save(&self, settings: &Map<String, Value>) -> FirstRunResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| FirstRunError::storage(&self.path, err.to_string()))?;
        }
        let mut encoded = serde_json::to_string_pretty(settings)?;
        encoded.push('\n');

        let temp = self.temp_path();
        fs::write(&temp, encoded).map_err(|err| FirstRunError::storage(&temp, err.to_string()))?;
        fs::rename(&temp, &self.path).map_err(|err| {
            let _ = fs::remove_file(&temp);
            FirstRunError::storage(&self.path, err.to_string())
        })
    }

    // Unique per write so concurrent writers never share a temp file.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map_or_else(|| DEFAULT_SETTINGS_FILE.into(), |name| name.to_string_lossy());
        let sequence = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.path.with_file_name(format!(
            ".{file_name}.{}.{sequence}.tmp",
            std::process::id()
        ))
    }
}

impl SettingStorage for FileSettingStore {
    fn show_onboarding(&self) -> FirstRunResult<bool> {
        let settings = self.load()?;
        let value = match settings.get(ONBOARDING_KEY) {
            None => false,
            Some(Value::Bool(value)) => *value,
            Some(other) => {
                return Err(FirstRunError::corrupt_store(
                    &self.path,
                    format!(
                        "{ONBOARDING_KEY} must be a boolean, found {}",
                        json_kind(other)
                    ),
                ))
            }
        };
        tracing::debug!(path = %self.path.display(), value, "read onboarding flag");
        Ok(value)
    }

    fn set_show_onboarding(&self, value: bool) -> FirstRunResult<()> {
        let mut settings = self.load()?;
        let _ = settings.insert(ONBOARDING_KEY.to_string(), Value::Bool(value));
        self.save(&settings)?;
        tracing::debug!(path = %self.path.display(), value, "wrote onboarding flag");
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// In-process settings store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingStore {
    values: Arc<Mutex<HashMap<String, bool>>>,
}

impl MemorySettingStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a flag value
    #[must_use]
    pub fn with_show_onboarding(value: bool) -> Self {
        let store = Self::new();
        store.insert(value);
        store
    }

    /// Whether the flag has ever been written
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(ONBOARDING_KEY)
    }

    /// Forget the flag, as on a fresh install
    pub fn clear(&self) {
        let _ = self
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(ONBOARDING_KEY);
    }

    fn insert(&self, value: bool) {
        let _ = self
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ONBOARDING_KEY.to_string(), value);
    }
}

impl SettingStorage for MemorySettingStore {
    fn show_onboarding(&self) -> FirstRunResult<bool> {
        Ok(self
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(ONBOARDING_KEY)
            .copied()
            .unwrap_or(false))
    }

    fn set_show_onboarding(&self, value: bool) -> FirstRunResult<()> {
        self.insert(value);
        tracing::debug!(value, "wrote onboarding flag to memory store");
        Ok(())
    }
}
