//! JSON persistence for the raw input snapshot.
//!
//! Only raw inputs are stored, never derived figures: a loaded snapshot is
//! re-run through the engine, so a settings file written by an older build
//! always produces figures consistent with the current calculation. Missing
//! keys fall back to the snapshot defaults via serde, so partial files load
//! cleanly.
//!
//! Writes go through a temp file in the same directory followed by a rename,
//! so a crash mid-write leaves the previous settings intact.

use std::fs;
use std::path::{Path, PathBuf};

use paycheck_core::RawInputSnapshot;
use thiserror::Error;
use tracing::{debug, info};

const TMP_SUFFIX: &str = "tmp";

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Filesystem-backed JSON store for one settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot from the settings file.
    ///
    /// Keys absent from the file take their documented defaults; unknown
    /// keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be read or is not valid
    /// JSON.
    pub fn load(&self) -> Result<RawInputSnapshot, SettingsError> {
        let contents = fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), "settings loaded");
        Ok(snapshot)
    }

    /// Like [`load`], but a missing file yields the default snapshot instead
    /// of an error. A present-but-corrupt file is still an error; defaults
    /// must never silently replace data the user saved.
    ///
    /// [`load`]: SettingsStore::load
    pub fn load_or_default(&self) -> Result<RawInputSnapshot, SettingsError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(RawInputSnapshot::default());
        }
        self.load()
    }

    /// Writes the snapshot as pretty-printed JSON, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if serialization or any filesystem step
    /// fails.
    pub fn save(
        &self,
        snapshot: &RawInputSnapshot,
    ) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(snapshot)?;

        let tmp_path = self.path.with_extension(TMP_SUFFIX);
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("settings.json"))
    }

    #[test]
    fn save_then_load_round_trips_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut snapshot = RawInputSnapshot::default();
        snapshot.gross_salary = dec!(145125);
        snapshot
            .paycheck_deductions
            .insert("Parking".to_string(), dec!(25));

        store.save(&snapshot).expect("save failed");
        let loaded = store.load().expect("load failed");

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn partial_file_fills_missing_keys_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{ "gross_salary": "99000" }"#).unwrap();

        let loaded = store.load().expect("load failed");

        assert_eq!(loaded.gross_salary, dec!(99000));
        // Everything else is the documented default
        assert_eq!(loaded.pretax_contributions["403(b) Traditional"], dec!(20000));
        assert_eq!(loaded.monthly_budget_total(), dec!(3075));
    }

    #[test]
    fn load_or_default_returns_defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let loaded = store.load_or_default().expect("load_or_default failed");

        assert_eq!(loaded, RawInputSnapshot::default());
    }

    #[test]
    fn load_or_default_still_fails_on_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        let result = store.load_or_default();

        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&RawInputSnapshot::default()).unwrap();

        let mut snapshot = RawInputSnapshot::default();
        snapshot.bonus_income = dec!(10000);
        store.save(&snapshot).unwrap();

        assert_eq!(store.load().unwrap().bonus_income, dec!(10000));
    }
}
