// src/storage/memory_store.rs

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::KeyValueStore;
use crate::error::AppResult;

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> AppResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_replaces_value() {
        let store = MemoryStore::new();
        assert_eq!(store.read("recipes").unwrap(), None);

        store.write("recipes", b"[1]").unwrap();
        store.write("recipes", b"[2]").unwrap();
        assert_eq!(store.read("recipes").unwrap(), Some(b"[2]".to_vec()));

        store.remove("recipes").unwrap();
        assert_eq!(store.read("recipes").unwrap(), None);
    }
}
