//! Status command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::StatusArgs;
use firstrun::{FileSettingStore, Screen, SettingStorage, ONBOARDING_KEY};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Persisted flag and the screen a plain launch would show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Settings file read
    pub store: PathBuf,
    /// Key the flag is stored under
    pub key: &'static str,
    /// Persisted flag value
    pub show_onboarding: bool,
    /// Screen a launch without arguments would show
    pub screen: Screen,
}

/// Read the flag without launching anything
pub fn read_status(store: &Path) -> CliResult<StatusReport> {
    let show_onboarding = FileSettingStore::new(store).show_onboarding()?;
    Ok(StatusReport {
        store: store.to_path_buf(),
        key: ONBOARDING_KEY,
        show_onboarding,
        screen: Screen::for_flag(show_onboarding),
    })
}

/// Execute the status command
pub fn execute_status(config: &CliConfig, args: &StatusArgs, out: &Reporter) -> CliResult<()> {
    let report = read_status(&config.store_path()?)?;
    if args.json {
        return out.json(&report);
    }
    out.field("store", report.store.display())?;
    out.field("key", report.key)?;
    out.field("show_onboarding", report.show_onboarding)?;
    out.field("screen", report.screen)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_status_of_missing_store() {
        let dir = tempdir().unwrap();
        let report = read_status(&dir.path().join("settings.json")).unwrap();
        assert!(!report.show_onboarding);
        assert_eq!(report.screen, Screen::Content);
        assert_eq!(report.key, "hasOnboardingBeenShown");
    }

    #[test]
    fn test_status_reflects_persisted_flag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        FileSettingStore::new(&path)
            .set_show_onboarding(true)
            .unwrap();

        let report = read_status(&path).unwrap();
        assert!(report.show_onboarding);
        assert_eq!(report.screen, Screen::Onboarding);
    }

    #[test]
    fn test_status_of_corrupt_store_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = read_status(&path).unwrap_err();
        assert!(err.to_string().contains("Corrupt settings store"));
    }

    #[test]
    fn test_status_json_shape() {
        let dir = tempdir().unwrap();
        let report = read_status(&dir.path().join("settings.json")).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["show_onboarding"], false);
        assert_eq!(json["screen"], "content");
        assert_eq!(json["key"], "hasOnboardingBeenShown");
    }
}
