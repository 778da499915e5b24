//! Credential entries in the browser's `localStorage`

use evcharge_http::{CredentialStorage, StorageError};
use gloo::storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

/// [`CredentialStorage`] over `window.localStorage`.
///
/// Values are stored as raw strings, not JSON encoded, so the entries stay
/// readable by anything else sharing the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl CredentialStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw().get_item(key).map_err(js_error)
    }

    fn replace(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let storage = LocalStorage::raw();
        for (key, value) in entries {
            storage.set_item(key, value).map_err(js_error)?;
        }
        Ok(())
    }

    fn remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        let storage = LocalStorage::raw();
        for key in keys {
            storage.remove_item(key).map_err(js_error)?;
        }
        Ok(())
    }
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Backend(format!("localStorage: {err:?}"))
}
