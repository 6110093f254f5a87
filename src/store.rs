//! Named password storage.
//!
//! The whole store is one JSON blob kept by a [`Backend`], the same way a
//! browser keeps a single key-value entry. [`PasswordStore`] holds the decoded
//! mapping and writes the full blob back after every change.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::StoreError;

const STORE_VERSION: u8 = 1;

/// Raw blob storage under the password store.
pub trait Backend {
    /// `None` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&mut self, blob: &str) -> Result<(), StoreError>;
}

fn check_capacity(blob: &str, capacity: Option<usize>) -> Result<(), StoreError> {
    match capacity {
        Some(capacity) if blob.len() > capacity => Err(StoreError::CapacityExceeded {
            needed: blob.len(),
            capacity,
        }),
        _ => Ok(()),
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    blob: Option<String>,
    capacity: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            blob: None,
            capacity: Some(capacity),
        }
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            capacity: None,
        }
    }
}

impl Backend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> Result<(), StoreError> {
        check_capacity(blob, self.capacity)?;
        self.blob = Some(blob.to_string());
        Ok(())
    }
}

/// JSON file on disk.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    capacity: Option<usize>,
}

impl FileBackend {
    const APP_DIR: &str = "oktogen";
    const FILE_NAME: &str = "passwords.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            capacity: None,
        }
    }

    pub fn with_capacity(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    /// `<data dir>/oktogen/passwords.json`, if the platform has a data dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(Self::APP_DIR).join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for FileBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, blob: &str) -> Result<(), StoreError> {
        check_capacity(blob, self.capacity)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // written beside the target and renamed over it, so a failed write
        // never leaves a truncated store behind
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(blob.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct StoreData {
    version: u8,
    passwords: BTreeMap<String, String>,
}

/// Saved passwords keyed by label. Labels are unique, last write wins.
pub struct PasswordStore<B: Backend> {
    backend: B,
    passwords: BTreeMap<String, String>,
}

impl<B: Backend> PasswordStore<B> {
    /// Loads whatever the backend holds, or starts empty.
    pub fn open(backend: B) -> Result<Self, StoreError> {
        let passwords = match backend.read()? {
            Some(blob) if !blob.trim().is_empty() => {
                let data: StoreData = serde_json::from_str(&blob)?;
                if data.version != STORE_VERSION {
                    return Err(StoreError::Corrupt(format!(
                        "unsupported store version {}",
                        data.version
                    )));
                }
                data.passwords
            }
            _ => BTreeMap::new(),
        };
        debug!(entries = passwords.len(), "password store loaded");

        Ok(Self { backend, passwords })
    }

    /// Inserts or overwrites `label`. An empty label is ignored.
    ///
    /// On failure the in-memory contents are left as they were.
    pub fn save(&mut self, label: &str, password: &str) -> Result<(), StoreError> {
        if label.is_empty() {
            debug!("ignoring save with empty label");
            return Ok(());
        }

        let mut updated = self.passwords.clone();
        updated.insert(label.to_string(), password.to_string());
        self.persist(updated)?;
        info!(label, "password saved");

        Ok(())
    }

    /// Removes `label`, returning whether it was present.
    pub fn remove(&mut self, label: &str) -> Result<bool, StoreError> {
        if !self.passwords.contains_key(label) {
            return Ok(false);
        }

        let mut updated = self.passwords.clone();
        updated.remove(label);
        self.persist(updated)?;
        info!(label, "password removed");

        Ok(true)
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.passwords.get(label).map(String::as_str)
    }

    /// Every saved entry, ordered by label.
    pub fn load_all(&self) -> &BTreeMap<String, String> {
        &self.passwords
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn persist(&mut self, passwords: BTreeMap<String, String>) -> Result<(), StoreError> {
        let data = StoreData {
            version: STORE_VERSION,
            passwords,
        };
        let blob = serde_json::to_string_pretty(&data)?;
        self.backend.write(&blob)?;
        self.passwords = data.passwords;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> PasswordStore<MemoryBackend> {
        PasswordStore::open(MemoryBackend::new()).unwrap()
    }

    #[test]
    fn new_store_is_empty() {
        let store = memory_store();
        assert!(store.is_empty());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn save_then_load_all() {
        let mut store = memory_store();
        store.save("bank", "Xk9!aQ").unwrap();

        assert_eq!(store.load_all().get("bank").map(String::as_str), Some("Xk9!aQ"));
    }

    #[test]
    fn save_same_label_overwrites() {
        let mut store = memory_store();
        store.save("bank", "first").unwrap();
        store.save("bank", "second").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("bank"), Some("second"));
    }

    #[test]
    fn empty_label_is_a_no_op() {
        let mut store = memory_store();
        store.save("", "secret").unwrap();

        assert!(store.is_empty());
        assert_eq!(store.into_backend().read().unwrap(), None);
    }

    #[test]
    fn reopening_sees_saved_entries() {
        let mut store = memory_store();
        store.save("mail", "p@ss").unwrap();
        store.save("bank", "Xk9!aQ").unwrap();

        let reopened = PasswordStore::open(store.into_backend()).unwrap();
        let labels: Vec<&str> = reopened.load_all().keys().map(String::as_str).collect();

        assert_eq!(labels, vec!["bank", "mail"]);
        assert_eq!(reopened.get("mail"), Some("p@ss"));
    }

    #[test]
    fn remove_entry() {
        let mut store = memory_store();
        store.save("bank", "Xk9!aQ").unwrap();

        assert!(store.remove("bank").unwrap());
        assert!(!store.remove("bank").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn capacity_exceeded_keeps_previous_contents() {
        let mut store = PasswordStore::open(MemoryBackend::with_capacity(80)).unwrap();
        store.save("a", "short").unwrap();

        let err = store.save("b", &"x".repeat(200)).unwrap_err();

        assert!(matches!(err, StoreError::CapacityExceeded { capacity: 80, .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("b"), None);

        let reopened = PasswordStore::open(store.into_backend()).unwrap();
        assert_eq!(reopened.get("a"), Some("short"));
    }

    #[test]
    fn corrupt_blob_is_reported() {
        let result = PasswordStore::open(MemoryBackend::with_blob("{not json"));
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn unknown_version_is_reported() {
        let blob = r#"{"version": 9, "passwords": {}}"#;
        let result = PasswordStore::open(MemoryBackend::with_blob(blob));
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("passwords.json");

        let mut store = PasswordStore::open(FileBackend::new(&path)).unwrap();
        assert!(store.is_empty());
        store.save("bank", "Xk9!aQ").unwrap();
        store.save("bank", "Xk9!aR").unwrap();

        let reopened = PasswordStore::open(FileBackend::new(&path)).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get("bank"), Some("Xk9!aR"));

        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["version"], 1);
        assert_eq!(on_disk["passwords"]["bank"], "Xk9!aR");
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn file_write_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passwords.json");

        let mut store = PasswordStore::open(FileBackend::new(&path)).unwrap();
        store.save("bank", "Xk9!aQ").unwrap();
        store.save("mail", "p@ss").unwrap();

        assert_eq!(dir_entries(dir.path()), vec!["passwords.json"]);
    }

    #[test]
    fn failed_file_write_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        // a non-empty directory where the store file should be cannot be replaced
        let path = dir.path().join("passwords.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "old").unwrap();

        let mut backend = FileBackend::new(&path);
        let err = backend.write(r#"{"version": 1, "passwords": {}}"#).unwrap_err();

        assert!(matches!(err, StoreError::Unavailable(_)));
        assert_eq!(fs::read_to_string(path.join("keep")).unwrap(), "old");
        assert_eq!(dir_entries(dir.path()), vec!["passwords.json"]);
    }

    #[test]
    fn file_backend_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passwords.json");
        let backend = FileBackend::new(&path).with_capacity(Some(10));

        let mut store = PasswordStore::open(backend).unwrap();
        assert!(store.save("bank", "Xk9!aQ").is_err());
        assert!(!path.exists());
    }
}
