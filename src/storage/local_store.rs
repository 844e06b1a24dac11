use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use snafu::ResultExt;
use tracing::warn;
use crate::errors::{ClientError, SerializationSnafu, StorageSnafu};

const STORAGE_FILE: &str = "storage.json";

/// File-backed key/value store standing in for the browser's localStorage.
/// The whole map is written through to a single JSON file on every
/// mutation. A missing or unreadable file reads as empty, the same way the
/// web client treats unparseable localStorage content.
pub struct LocalStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl LocalStore {

    pub fn open(dir: impl AsRef<Path>) -> Result<Self, ClientError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).context(StorageSnafu { path: dir })?;
        let path = dir.join(STORAGE_FILE);

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Discarding unreadable local storage file {}: {err}", path.display());
                BTreeMap::new()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err).context(StorageSnafu { path }),
        };

        Ok(LocalStore { path, entries: Mutex::new(entries) })
    }

    pub fn get_item(&self, key: &str) -> Option<Value> {
        self.entries().get(key).cloned()
    }

    /// Typed read. A missing key and a value that no longer matches the
    /// expected shape both read as `None`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_item(key)?;
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!("Stored value under '{key}' is not readable anymore: {err}");
                None
            }
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ClientError> {
        let value = serde_json::to_value(value).context(SerializationSnafu)?;
        let mut entries = self.entries();
        entries.insert(key.to_string(), value);
        self.persist(&entries)
    }

    /// Removes a key. Returns whether the key was present.
    pub fn remove_item(&self, key: &str) -> Result<bool, ClientError> {
        let mut entries = self.entries();
        let removed = entries.remove(key).is_some();
        if removed {
            self.persist(&entries)?;
        }
        Ok(removed)
    }

    fn persist(&self, entries: &BTreeMap<String, Value>) -> Result<(), ClientError> {
        let raw = serde_json::to_string_pretty(entries).context(SerializationSnafu)?;
        fs::write(&self.path, raw).context(StorageSnafu { path: self.path.clone() })
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, Value>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
