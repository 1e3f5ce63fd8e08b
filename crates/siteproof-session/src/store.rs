//! File-backed key/value store, the local-storage analog.
//!
//! Every read and write is a single whole-file operation; writes go through
//! a temp file and rename so a crash can't leave a half-written store.
//! Reads fail soft: a missing or corrupt file behaves as an empty store.

use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("session store rename error: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Handle to the store file. Cheap to construct; all IO happens per
/// operation so concurrent handles always see the latest committed state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a string value. Absent keys, unreadable files, and non-string
    /// values all read as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.read_all().get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    /// Read a structured value stored under `key`.
    pub fn get_value(&self, key: &str) -> Option<Value> {
        self.read_all().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_value(key, Value::String(value.to_string()))
    }

    pub fn set_value(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut map = self.read_all();
        map.insert(key.to_string(), value);
        self.write_all(&map)
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_all();
        if map.remove(key).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }

    fn read_all(&self) -> Map<String, Value> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not read session store");
                return Map::new();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "session store content is not a JSON object, treating as empty");
                Map::new()
            }
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = dir {
            fs::create_dir_all(dir)?;
        }
        let mut tmp = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
            None => tempfile::NamedTempFile::new_in(".")?,
        };
        serde_json::to_writer_pretty(&mut tmp, map)?;
        tmp.flush()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        (dir, store)
    }

    #[test]
    fn get_on_missing_file_is_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("demo-role"), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_dir, store) = temp_store();
        store.set("demo-role", "cleaner").unwrap();
        assert_eq!(store.get("demo-role").as_deref(), Some("cleaner"));

        store.set("demo-role", "admin").unwrap();
        assert_eq!(store.get("demo-role").as_deref(), Some("admin"));
    }

    #[test]
    fn remove_deletes_only_the_key() {
        let (_dir, store) = temp_store();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "not json {").unwrap();
        assert_eq!(store.get("demo-role"), None);

        // and the store recovers on the next write
        store.set("demo-role", "manager").unwrap();
        assert_eq!(store.get("demo-role").as_deref(), Some("manager"));
    }

    #[test]
    fn non_string_values_read_as_none_via_get() {
        let (_dir, store) = temp_store();
        store
            .set_value("user", serde_json::json!({ "id": 1 }))
            .unwrap();
        assert_eq!(store.get("user"), None);
        assert!(store.get_value("user").is_some());
    }
}
