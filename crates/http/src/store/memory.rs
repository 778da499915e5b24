use super::{CredentialStorage, StorageError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-process credential storage; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn replace(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut map = self.entries();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut map = self.entries();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}
