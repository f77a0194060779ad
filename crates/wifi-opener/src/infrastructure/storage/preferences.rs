//! JSON preferences store.
//!
//! A single JSON object file (`preferences.json` next to `config.toml`) acts
//! as the user-defaults domain of the agent.  The rule list lives under the
//! [`RULES_KEY`] key as an array of `{"ssid", "url"}` records:
//!
//! ```json
//! { "wifiRules": [ { "ssid": "HAS", "url": "https://example.com/home" } ] }
//! ```
//!
//! Writes replace only their own key; any other keys in the file survive.
//! The file is written to a sibling temp file and renamed into place so a
//! crash mid-write never leaves a truncated store behind.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;
use wifi_opener_core::RuleSet;

use super::config::{config_dir, ConfigError};
use crate::application::manage_rules::{RuleRepository, RuleStoreError};

/// Key holding the serialized rule list.
pub const RULES_KEY: &str = "wifiRules";

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("I/O error accessing preferences at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preferences file {0} is not a JSON object")]
    NotAnObject(PathBuf),

    #[error("invalid JSON in preferences: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed key/value store.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/preferences.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformConfigDir`] if the config directory
    /// cannot be resolved.
    pub fn at_default_location() -> Result<Self, ConfigError> {
        Ok(Self::new(config_dir()?.join(PREFERENCES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError`] if the file exists but cannot be read or
    /// is not a JSON object.
    pub fn get(&self, key: &str) -> Result<Option<Value>, PreferencesError> {
        Ok(self.read_object()?.remove(key))
    }

    /// Stores `value` under `key`, keeping every other key.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError`] if the existing file is unreadable or the
    /// new contents cannot be written.
    pub fn set(&self, key: &str, value: Value) -> Result<(), PreferencesError> {
        let mut object = self.read_object()?;
        object.insert(key.to_string(), value);
        self.write_object(&object)
    }

    fn read_object(&self) -> Result<Map<String, Value>, PreferencesError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no preferences file at {}", self.path.display());
                return Ok(Map::new());
            }
            Err(source) => {
                return Err(PreferencesError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(object) => Ok(object),
            _ => Err(PreferencesError::NotAnObject(self.path.clone())),
        }
    }

    fn write_object(&self, object: &Map<String, Value>) -> Result<(), PreferencesError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;
        }

        let content = serde_json::to_string_pretty(object)?;
        let staging = self.path.with_extension("json.tmp");
        std::fs::write(&staging, content).map_err(|source| io_error(&staging, source))?;
        std::fs::rename(&staging, &self.path).map_err(|source| io_error(&self.path, source))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> PreferencesError {
    PreferencesError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl RuleRepository for PreferencesStore {
    fn load(&self) -> Result<Option<RuleSet>, RuleStoreError> {
        let value = self.get(RULES_KEY).map_err(|e| match e {
            PreferencesError::Io { .. } => RuleStoreError::Storage(e.to_string()),
            _ => RuleStoreError::Decode(e.to_string()),
        })?;

        value
            .map(|v| serde_json::from_value(v).map_err(|e| RuleStoreError::Decode(e.to_string())))
            .transpose()
    }

    fn save(&self, rules: &RuleSet) -> Result<(), RuleStoreError> {
        let value =
            serde_json::to_value(rules).map_err(|e| RuleStoreError::Storage(e.to_string()))?;
        self.set(RULES_KEY, value)
            .map_err(|e| RuleStoreError::Storage(e.to_string()))
    }

    fn location(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }
}

pub mod mock {
    //! In-memory rule repository for unit testing.

    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use wifi_opener_core::RuleSet;

    use crate::application::manage_rules::{RuleRepository, RuleStoreError};

    #[derive(Default)]
    pub struct MemoryRuleRepository {
        pub stored: Mutex<Option<RuleSet>>,
        /// When set, `load` reports a decode error.
        pub corrupt: bool,
        pub fail_saves: AtomicBool,
        pub saves: AtomicUsize,
    }

    impl MemoryRuleRepository {
        /// Nothing stored yet (first run).
        pub fn empty() -> Self {
            Self::default()
        }

        pub fn with_rules(rules: RuleSet) -> Self {
            Self {
                stored: Mutex::new(Some(rules)),
                ..Self::default()
            }
        }

        pub fn corrupt() -> Self {
            Self {
                corrupt: true,
                ..Self::default()
            }
        }

        pub fn stored(&self) -> Option<RuleSet> {
            self.stored.lock().unwrap().clone()
        }

        pub fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }

        pub fn fail_saves(&self) {
            self.fail_saves.store(true, Ordering::SeqCst);
        }
    }

    impl RuleRepository for MemoryRuleRepository {
        fn load(&self) -> Result<Option<RuleSet>, RuleStoreError> {
            if self.corrupt {
                return Err(RuleStoreError::Decode("mock corrupt value".into()));
            }
            Ok(self.stored())
        }

        fn save(&self, rules: &RuleSet) -> Result<(), RuleStoreError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(RuleStoreError::Storage("mock save failure".into()));
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.stored.lock().unwrap() = Some(rules.clone());
            Ok(())
        }

        fn location(&self) -> Option<PathBuf> {
            Some(PathBuf::from("memory://rules"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wifi_opener_core::Rule;

    struct TempStore {
        dir: PathBuf,
        store: PreferencesStore,
    }

    impl TempStore {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("wifi_opener_prefs_{}", uuid::Uuid::new_v4()));
            let store = PreferencesStore::new(dir.join(PREFERENCES_FILE));
            Self { dir, store }
        }

        fn write_raw(&self, content: &str) {
            std::fs::create_dir_all(&self.dir).expect("mkdir");
            std::fs::write(self.store.path(), content).expect("write");
        }

        fn read_raw(&self) -> Value {
            let text = std::fs::read_to_string(self.store.path()).expect("read");
            serde_json::from_str(&text).expect("json")
        }
    }

    impl Drop for TempStore {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.dir).ok();
        }
    }

    #[test]
    fn test_load_without_file_reports_nothing_stored() {
        let t = TempStore::new();
        assert_eq!(t.store.load().expect("load"), None);
    }

    #[test]
    fn test_save_then_load_preserves_order_and_values() {
        // Arrange
        let t = TempStore::new();
        let rules = RuleSet::from(vec![
            Rule::new("HAS", "https://example.com/home"),
            Rule::new("Café Wi-Fi", "https://menu.example/?a=1&b=2"),
        ]);

        // Act
        t.store.save(&rules).expect("save");
        let loaded = t.store.load().expect("load");

        // Assert
        assert_eq!(loaded, Some(rules));
    }

    #[test]
    fn test_save_writes_records_under_rules_key() {
        let t = TempStore::new();
        t.store.save(&RuleSet::seeded()).expect("save");

        assert_eq!(
            t.read_raw(),
            json!({ "wifiRules": [ { "ssid": "HAS", "url": "https://example.com/home" } ] })
        );
    }

    #[test]
    fn test_save_preserves_unrelated_keys() {
        // Arrange
        let t = TempStore::new();
        t.write_raw(r#"{ "launchAtLogin": true, "wifiRules": [] }"#);

        // Act
        t.store.save(&RuleSet::seeded()).expect("save");

        // Assert
        let raw = t.read_raw();
        assert_eq!(raw["launchAtLogin"], json!(true));
        assert_eq!(raw["wifiRules"][0]["ssid"], json!("HAS"));
    }

    #[test]
    fn test_undecodable_rules_value_is_decode_error() {
        let t = TempStore::new();
        t.write_raw(r#"{ "wifiRules": "not a list" }"#);

        assert!(matches!(t.store.load(), Err(RuleStoreError::Decode(_))));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let t = TempStore::new();
        t.write_raw("{ this is not json");

        assert!(matches!(t.store.load(), Err(RuleStoreError::Decode(_))));
    }

    #[test]
    fn test_non_object_file_is_decode_error() {
        let t = TempStore::new();
        t.write_raw("[1, 2, 3]");

        assert!(matches!(t.store.load(), Err(RuleStoreError::Decode(_))));
    }

    #[test]
    fn test_save_refuses_to_overwrite_corrupt_file() {
        let t = TempStore::new();
        t.write_raw("{ this is not json");

        let result = t.store.save(&RuleSet::seeded());

        assert!(matches!(result, Err(RuleStoreError::Storage(_))));
        let text = std::fs::read_to_string(t.store.path()).expect("read");
        assert_eq!(text, "{ this is not json");
    }

    #[test]
    fn test_generic_get_and_set_round_trip() {
        let t = TempStore::new();
        t.store.set("lastVersion", json!("0.1.0")).expect("set");
        assert_eq!(t.store.get("lastVersion").expect("get"), Some(json!("0.1.0")));
        assert_eq!(t.store.get("missing").expect("get"), None);
    }
}
