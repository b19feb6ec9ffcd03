//! File-backed preference store for Devise.
//!
//! The selected pair lives in a small flat JSON object:
//!
//! ```json
//! { "fromCurrency": "EUR", "toCurrency": "USD" }
//! ```
//!
//! Writes go to a sibling temp file that is then renamed over the target,
//! so a crash mid-write never leaves a truncated file behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use devise_core::currency::{
    PreferencePair, PreferenceStore, SOURCE_KEY, StoreError, StoredPreferences, TARGET_KEY,
};
use tracing::{debug, warn};

/// Preference store persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    /// Creates a store at `path`. Nothing is read or written until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing the store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                serde_json::from_str(&text).map_err(|err| StoreError::Corrupt(err.to_string()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn load(&self) -> Result<StoredPreferences, StoreError> {
        let mut entries = self.read_entries()?;
        Ok(StoredPreferences {
            source: entries.remove(SOURCE_KEY),
            target: entries.remove(TARGET_KEY),
        })
    }

    fn save(&self, pair: &PreferencePair) -> Result<(), StoreError> {
        // Keep unrelated keys other tools may have written.
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            warn!(
                path = %self.path.display(),
                error = %err,
                "Could not read preference file, rewriting it with the selected pair only"
            );
            BTreeMap::new()
        });
        entries.insert(SOURCE_KEY.to_string(), pair.source().to_string());
        entries.insert(TARGET_KEY.to_string(), pair.target().to_string());

        let json =
            serde_json::to_vec_pretty(&entries).map_err(|err| StoreError::Corrupt(err.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(
            path = %self.path.display(),
            source = %pair.source(),
            target = %pair.target(),
            "Saved selected currencies"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devise_core::currency::{Preferences, RateTable, Role};
    use devise_shared::CurrencyCode;
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn pair(source: &str, target: &str) -> PreferencePair {
        PreferencePair::new(code(source), code(target))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load().unwrap(), StoredPreferences::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferenceStore::new(dir.path().join("nested/dir/prefs.json"));

        store.save(&pair("GBP", "JPY")).unwrap();

        assert_eq!(
            store.load().unwrap(),
            StoredPreferences {
                source: Some("GBP".into()),
                target: Some("JPY".into()),
            }
        );
        assert!(!dir.path().join("nested/dir/prefs.json.tmp").exists());
    }

    #[test]
    fn test_file_uses_pair_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = JsonFilePreferenceStore::new(&path);
        store.save(&pair("EUR", "USD")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["fromCurrency"], "EUR");
        assert_eq!(raw["toCurrency"], "USD");
    }

    #[test]
    fn test_save_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"theme":"dark","fromCurrency":"EUR"}"#).unwrap();

        JsonFilePreferenceStore::new(&path)
            .save(&pair("CHF", "EUR"))
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["fromCurrency"], "CHF");
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let err = JsonFilePreferenceStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn test_save_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();
        let store = JsonFilePreferenceStore::new(&path);

        store.save(&pair("USD", "JPY")).unwrap();

        assert_eq!(
            store.load().unwrap(),
            StoredPreferences {
                source: Some("USD".into()),
                target: Some("JPY".into()),
            }
        );
    }

    #[test]
    fn test_preferences_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let rates = RateTable::from_raw(
            code("EUR"),
            [("EUR", dec!(1)), ("USD", dec!(1.1)), ("SEK", dec!(11.2))],
        )
        .unwrap();

        {
            let mut prefs =
                Preferences::load(JsonFilePreferenceStore::new(&path), pair("EUR", "USD"));
            prefs.select(Role::Target, &code("SEK"), &rates).unwrap();
            prefs.swap();
        }

        let prefs = Preferences::load(JsonFilePreferenceStore::new(&path), pair("EUR", "USD"));
        assert_eq!(prefs.pair(), &pair("SEK", "EUR"));
    }
}
