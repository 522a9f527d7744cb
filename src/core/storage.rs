//! Browser-style local key-value storage for one visitor.
//!
//! Holds the two persisted site flags (`theme` and `language`). The service
//! seeds a store from the request cookies and sends back whatever changed,
//! so every visitor keeps their own flags. The payload lives behind a
//! `Mutex` so a store can be shared with the view-model.

use std::{collections::BTreeMap, sync::Mutex};

use crate::error::{FolioError, Result};

pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";
pub const PREFERENCE_KEYS: [&str; 2] = [THEME_KEY, LANGUAGE_KEY];

#[derive(Debug, Default)]
pub struct LocalStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl LocalStore {
    pub fn new() -> Self {
        LocalStore::default()
    }

    pub fn seeded<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        LocalStore {
            entries: Mutex::new(
                pairs
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|error| FolioError::Preferences(error.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Snapshot of every stored pair, ordered by key.
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_values_are_readable() {
        let store = LocalStore::seeded([(THEME_KEY, "light")]);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(store.get(LANGUAGE_KEY), None);
    }

    #[test]
    fn set_overrides_and_snapshots_stay_ordered() {
        let store = LocalStore::new();
        store.set(THEME_KEY, "dark").unwrap();
        store.set(LANGUAGE_KEY, "en").unwrap();
        store.set(THEME_KEY, "light").unwrap();
        let entries: Vec<(String, String)> = store.entries().into_iter().collect();
        assert_eq!(
            entries,
            vec![
                ("language".to_string(), "en".to_string()),
                ("theme".to_string(), "light".to_string()),
            ]
        );
    }

    #[test]
    fn stores_are_independent() {
        let first = LocalStore::new();
        let second = LocalStore::new();
        first.set(THEME_KEY, "light").unwrap();
        assert_eq!(second.get(THEME_KEY), None);
    }
}
