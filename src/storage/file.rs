//! File-backed key-value store implementation.
//!
//! Each key maps to one JSON file under the store directory. Writes replace
//! the file wholesale, matching the snapshot persistence model.

use super::KeyValueStore;
use crate::error::{KikuError, Result};
use std::path::{Path, PathBuf};

/// Key-value store persisting each key as `<dir>/<key>.json`.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys are internal identifiers, not user input, but a separator
        // would silently escape the store directory.
        if key.is_empty() || key.contains(['/', '\\']) {
            return Err(KikuError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::write(&path, value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        assert!(store.get("audio_files").unwrap().is_none());

        store.set("audio_files", "[{\"a\":1}]").unwrap();
        assert_eq!(
            store.get("audio_files").unwrap().as_deref(),
            Some("[{\"a\":1}]")
        );
        assert!(dir.path().join("audio_files.json").exists());

        store.delete("audio_files").unwrap();
        assert!(store.get("audio_files").unwrap().is_none());
        store.delete("audio_files").unwrap();
    }

    #[test]
    fn test_rejects_path_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }
}
