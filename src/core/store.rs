//! History and configuration collaborators
//!
//! The engines never own persistent state. Callers that keep a history or
//! saved settings hand the store in; `MemoryStore` is the in-process
//! implementation used by the CLI and tests.

use std::collections::{BTreeMap, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;

/// Default number of history entries a `MemoryStore` keeps
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// One recorded tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Tool identifier (`text-case-converter`, `regex-tester`)
    pub tool: String,
    pub input: String,
    pub output: String,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

impl HistoryEntry {
    pub fn new(
        tool: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        Self {
            tool: tool.into(),
            input: input.into(),
            output: output.into(),
            timestamp_ms,
        }
    }
}

/// Receives successful tool invocations
pub trait HistoryStore {
    fn record(&mut self, entry: HistoryEntry);
}

/// Key/value settings storage
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);
}

/// Read a typed config from `store`, falling back to its default when the
/// key is absent
pub fn load_config<T>(store: &dyn ConfigStore, key: &str) -> Result<T, ToolError>
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(T::default()),
    }
}

/// Write a typed config into `store`
pub fn save_config<T: Serialize>(
    store: &mut dyn ConfigStore,
    key: &str,
    config: &T,
) -> Result<(), ToolError> {
    store.set(key, serde_json::to_value(config)?);
    Ok(())
}

/// In-memory history and settings
#[derive(Debug, Clone)]
pub struct MemoryStore {
    settings: BTreeMap<String, Value>,
    history: VecDeque<HistoryEntry>,
    history_limit: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            settings: BTreeMap::new(),
            history: VecDeque::new(),
            history_limit,
        }
    }

    /// Seed settings from a JSON object; each top-level key becomes a
    /// setting
    pub fn from_json(json: &str) -> Result<Self, ToolError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(ToolError::Config(
                "expected a JSON object at the top level".to_string(),
            ));
        };

        let mut store = Self::default();
        store.settings.extend(map);
        Ok(store)
    }

    /// Recorded entries, newest first
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl HistoryStore for MemoryStore {
    fn record(&mut self, entry: HistoryEntry) {
        self.history.push_front(entry);
        self.history.truncate(self.history_limit);
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.settings.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.settings.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::case::CaseTarget;
    use crate::core::execute::TestMode;
    use crate::core::process::{CaseConversionConfig, RegexTestConfig};

    #[test]
    fn test_history_keeps_newest_entries() {
        let mut store = MemoryStore::with_history_limit(2);
        store.record(HistoryEntry::new("tool", "a", "1"));
        store.record(HistoryEntry::new("tool", "b", "2"));
        store.record(HistoryEntry::new("tool", "c", "3"));

        let inputs: Vec<&str> = store.history().map(|e| e.input.as_str()).collect();
        assert_eq!(inputs, vec!["c", "b"]);
    }

    #[test]
    fn test_config_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let config = CaseConversionConfig {
            target_case: CaseTarget::Kebabcase,
            preserve_acronyms: true,
            custom_delimiter: String::new(),
        };
        save_config(&mut store, "case", &config).unwrap();

        let loaded: CaseConversionConfig = load_config(&store, "case").unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_key_uses_default() {
        let store = MemoryStore::new();
        let loaded: RegexTestConfig = load_config(&store, "regex").unwrap();
        assert_eq!(loaded.mode, TestMode::Match);
        assert!(loaded.flags.global);
    }

    #[test]
    fn test_from_json_seeds_settings() {
        let store = MemoryStore::from_json(
            r#"{ "regex": { "mode": "split", "flags": { "ignoreCase": true } } }"#,
        )
        .unwrap();
        let loaded: RegexTestConfig = load_config(&store, "regex").unwrap();
        assert_eq!(loaded.mode, TestMode::Split);
        assert!(loaded.flags.ignore_case);
        assert!(!loaded.flags.global);
        assert!(loaded.show_groups);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            MemoryStore::from_json("[1, 2]"),
            Err(ToolError::Config(_))
        ));
        let store = MemoryStore::from_json(r#"{ "regex": { "mode": "explode" } }"#).unwrap();
        assert!(load_config::<RegexTestConfig>(&store, "regex").is_err());
    }
}
