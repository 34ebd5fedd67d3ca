//! In-memory snapshot store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use farber_workflow::{SnapshotStore, StorageError};

/// In-memory key-value snapshot store.
///
/// Intended for tests/dev. Cloning yields a handle to the same underlying
/// map, so a test can keep one handle while the engine owns the other.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::Io("lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, state: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Io("lock poisoned".to_string()))?;
        entries.insert(key.to_string(), state.to_string());
        Ok(())
    }
}
