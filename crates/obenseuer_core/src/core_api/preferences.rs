use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::error::{CoreError, CoreErrorCode};
use super::types::{FavoriteIds, ItemId, UserPreferences};

pub const DARK_MODE_KEY: &str = "darkMode";
pub const FAVORITES_KEY: &str = "favorites";

/// String key/value persistence, in the shape of a browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store kept as one JSON object of string values on disk. Every `set`
/// rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens `path`. A missing, unreadable or corrupt file is an empty store;
    /// write problems surface from `set`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring corrupt preference file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no preference file yet");
                BTreeMap::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable preference file");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), CoreError> {
        let storage_error = |detail: String| {
            CoreError::new(
                CoreErrorCode::Storage,
                format!("failed to write {}: {detail}", self.path.display()),
            )
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| storage_error(e.to_string()))?;
        }
        let text =
            serde_json::to_string_pretty(&self.values).map_err(|e| storage_error(e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| storage_error(e.to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Theme flag and favorites on top of any [`KeyValueStore`].
///
/// Reads never fail: a missing, unreadable or corrupt value yields the
/// default. Writes happen immediately and report storage failures.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    store: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn load_preferences(&self) -> UserPreferences {
        let defaults = UserPreferences::default();
        UserPreferences {
            dark_mode: self.read_value(DARK_MODE_KEY).unwrap_or(defaults.dark_mode),
            favorite_ids: self
                .read_value(FAVORITES_KEY)
                .unwrap_or(defaults.favorite_ids),
        }
    }

    pub fn save_dark_mode(&mut self, dark_mode: bool) -> Result<(), CoreError> {
        self.write_value(DARK_MODE_KEY, &dark_mode)?;
        info!(dark_mode, "saved theme preference");
        Ok(())
    }

    pub fn toggle_dark_mode(&mut self) -> Result<bool, CoreError> {
        let dark_mode = !self.load_preferences().dark_mode;
        self.save_dark_mode(dark_mode)?;
        Ok(dark_mode)
    }

    /// Adds `id` to the favorites, or removes it if already there.
    pub fn toggle_favorite(&mut self, id: ItemId) -> Result<FavoriteIds, CoreError> {
        let mut favorites = self.load_preferences().favorite_ids;
        let added = favorites.toggle(id);
        self.write_value(FAVORITES_KEY, &favorites)?;
        info!(id, added, total = favorites.len(), "updated favorites");
        Ok(favorites)
    }

    fn read_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.store.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "preference read failed; using default");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "corrupt preference value; using default");
                None
            }
        }
    }

    fn write_value<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), CoreError> {
        let text = serde_json::to_string(value).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Storage,
                format!("failed to encode preference '{key}': {e}"),
            )
        })?;
        self.store.set(key, &text)
    }
}
