use super::{CredentialStorage, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Credential entries kept in a single JSON file.
///
/// Every write rewrites the whole file through a sibling temporary file and
/// a rename, so readers never observe half of a record.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "Wrote credential file");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), StorageError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), StorageError> {
    Ok(())
}

impl CredentialStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.guard();
        Ok(self.load()?.remove(key))
    }

    fn replace(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let _guard = self.guard();
        // A corrupt file is overwritten rather than merged
        let mut map = self.load().unwrap_or_default();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        self.save(&map)
    }

    fn remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        let _guard = self.guard();
        let mut map = self.load().unwrap_or_default();
        for key in keys {
            map.remove(*key);
        }
        self.save(&map)
    }
}
