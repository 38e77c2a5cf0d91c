//! In-memory key-value store implementation.
//!
//! Useful for testing; nothing survives the process.

use super::KeyValueStore;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory key-value store.
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().unwrap();
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().unwrap();
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get("records").unwrap().is_none());

        store.set("records", "[]").unwrap();
        assert_eq!(store.get("records").unwrap().as_deref(), Some("[]"));

        store.set("records", "[1]").unwrap();
        assert_eq!(store.get("records").unwrap().as_deref(), Some("[1]"));

        store.delete("records").unwrap();
        assert!(store.get("records").unwrap().is_none());

        // Deleting an absent key is fine.
        store.delete("records").unwrap();
    }
}
