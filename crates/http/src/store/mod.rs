//! Persisted credential state
//!
//! The credential record is kept as four named string entries so that any
//! key/value backend (browser storage, a JSON file, memory) can hold it.
//! [`TokenStore`] is the only code that reads or writes those entries, and
//! it treats anything partial or unparsable as "no session".

mod memory;
#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use evcharge_core::{CredentialRecord, SharedClock, SystemClock, UserProfile};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, warn};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const EXPIRES_AT_KEY: &str = "expiresAt";
pub const USER_KEY: &str = "user";

const ALL_KEYS: [&str; 4] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, EXPIRES_AT_KEY, USER_KEY];

/// Default lead window for proactive refresh, in seconds
pub const DEFAULT_REFRESH_LEAD_SECS: i64 = 300;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Key/value backend holding the credential entries
pub trait CredentialStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write every entry in one step
    fn replace(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;

    fn remove(&self, keys: &[&str]) -> Result<(), StorageError>;
}

/// Lifecycle wrapper around the persisted credential record
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn CredentialStorage>,
    clock: SharedClock,
    refresh_lead: Duration,
    lock: Arc<Mutex<()>>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn CredentialStorage>) -> Self {
        Self {
            storage,
            clock: Arc::new(SystemClock),
            refresh_lead: Duration::seconds(DEFAULT_REFRESH_LEAD_SECS),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Token store backed by process memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_refresh_lead(mut self, lead: Duration) -> Self {
        self.refresh_lead = lead;
        self
    }

    pub fn refresh_lead(&self) -> Duration {
        self.refresh_lead
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Replace the whole record
    pub fn store(&self, record: &CredentialRecord) -> Result<(), StorageError> {
        let user = serde_json::to_string(&record.user)?;
        let entries = [
            (ACCESS_TOKEN_KEY, record.access_token.clone()),
            (REFRESH_TOKEN_KEY, record.refresh_token.clone()),
            (
                EXPIRES_AT_KEY,
                record.expires_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            (USER_KEY, user),
        ];

        let _guard = self.guard();
        self.storage.replace(&entries)?;
        debug!(user_id = %record.user.id, expires_at = %record.expires_at, "Stored credential record");
        Ok(())
    }

    /// Current record, or `None` when absent, partial or malformed
    pub fn read(&self) -> Option<CredentialRecord> {
        let _guard = self.guard();
        self.load()
    }

    /// Delete every entry. Returns whether anything was stored.
    pub fn clear(&self) -> Result<bool, StorageError> {
        let _guard = self.guard();
        let present = ALL_KEYS.iter().any(|key| self.entry(key).is_some());
        self.storage.remove(&ALL_KEYS)?;
        debug!(present, "Cleared credential record");
        Ok(present)
    }

    /// True iff a complete record is stored; partial records count as absent
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// True iff the stored expiry falls within the lead window of now.
    /// A lead reaching past the earliest representable time is always due.
    pub fn should_refresh(&self) -> bool {
        self.read().is_some_and(|record| {
            record
                .expires_at
                .checked_sub_signed(self.refresh_lead)
                .is_none_or(|threshold| self.clock.now() >= threshold)
        })
    }

    pub fn access_token(&self) -> Option<String> {
        let _guard = self.guard();
        self.entry(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        let _guard = self.guard();
        self.entry(REFRESH_TOKEN_KEY)
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.read().map(|record| record.user)
    }

    /// Startup check: a partial or malformed record is deleted entirely
    pub fn restore(&self) -> Option<CredentialRecord> {
        let _guard = self.guard();
        if let Some(record) = self.load() {
            return Some(record);
        }

        let leftovers = ALL_KEYS.iter().any(|key| self.entry(key).is_some());
        if leftovers {
            warn!("Discarding incomplete credential record");
            if let Err(err) = self.storage.remove(&ALL_KEYS) {
                warn!("Failed to discard credential record: {err}");
            }
        }
        None
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn entry(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(Some(value)) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(err) => {
                warn!(key, "Failed to read credential entry: {err}");
                None
            }
        }
    }

    fn load(&self) -> Option<CredentialRecord> {
        let access_token = self.entry(ACCESS_TOKEN_KEY)?;
        let refresh_token = self.entry(REFRESH_TOKEN_KEY)?;
        let expires_at = self.entry(EXPIRES_AT_KEY)?;
        let user = self.entry(USER_KEY)?;

        let expires_at = match DateTime::parse_from_rfc3339(&expires_at) {
            Ok(parsed) => parsed.with_timezone(&Utc),
            Err(err) => {
                warn!("Stored expiry is malformed: {err}");
                return None;
            }
        };
        let user = match serde_json::from_str::<UserProfile>(&user) {
            Ok(user) => user,
            Err(err) => {
                warn!("Stored user profile is malformed: {err}");
                return None;
            }
        };

        Some(CredentialRecord {
            access_token,
            refresh_token,
            expires_at,
            user,
        })
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("refresh_lead", &self.refresh_lead)
            .finish_non_exhaustive()
    }
}
