//! Persistence for the summary length preference.
//!
//! A single string key holds one of `"short"`, `"medium"` or `"long"`.

use crate::summary::Length;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::warn;

/// Key under which the preference is stored
pub const PREFERENCE_KEY: &str = "summaryMode";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    DbError(#[from] sled::Error),
}

/// Restores and persists the user's preferred summary length.
pub trait PreferenceStore: Send + Sync {
    /// Stored value, or [`Length::Medium`] if missing or unreadable
    fn load(&self) -> Length;

    fn save(&self, value: Length) -> Result<(), StorageError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn load(&self) -> Length {
        (**self).load()
    }

    fn save(&self, value: Length) -> Result<(), StorageError> {
        (**self).save(value)
    }
}

fn parse_stored(raw: Option<&[u8]>) -> Length {
    let Some(bytes) = raw else {
        return Length::default();
    };

    match std::str::from_utf8(bytes).ok().and_then(|s| s.parse().ok()) {
        Some(length) => length,
        None => {
            warn!(
                value = %String::from_utf8_lossy(bytes),
                "ignoring unrecognised stored length preference"
            );
            Length::default()
        }
    }
}

/// Sled-backed preference store that survives restarts.
pub struct SledPreferenceStore {
    db: sled::Db,
}

impl SledPreferenceStore {
    /// Open or create the store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Write a raw value under the preference key, bypassing validation
    pub fn save_raw(&self, value: &str) -> Result<(), StorageError> {
        self.db.insert(PREFERENCE_KEY, value.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }
}

impl PreferenceStore for SledPreferenceStore {
    fn load(&self) -> Length {
        match self.db.get(PREFERENCE_KEY) {
            Ok(value) => parse_stored(value.as_deref()),
            Err(e) => {
                warn!(error = %e, "failed to read length preference, using default");
                Length::default()
            }
        }
    }

    fn save(&self, value: Length) -> Result<(), StorageError> {
        self.save_raw(value.as_str())
    }
}

/// In-process store; nothing outlives the value itself.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    value: Mutex<Option<String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an arbitrary raw value
    pub fn with_raw(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Length {
        let guard = self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        parse_stored(guard.as_deref().map(str::as_bytes))
    }

    fn save(&self, value: Length) -> Result<(), StorageError> {
        let mut guard = self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(value.as_str().to_string());
        Ok(())
    }
}
