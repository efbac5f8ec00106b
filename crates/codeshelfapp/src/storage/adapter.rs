use super::KeyValueStore;
use crate::error::Result;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Typed, failure-tolerant access to a [`KeyValueStore`].
///
/// `try_*` methods report what went wrong. `load`, `save` and `clear` apply
/// the best-effort policy on top of them: the cause is logged and the caller
/// carries on with its in-memory state.
pub struct StorageAdapter<B: KeyValueStore> {
    backend: B,
}

impl<B: KeyValueStore> StorageAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read and decode the value under `key`.
    /// `Ok(None)` means nothing is stored there (an empty value counts as nothing).
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get(key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }

    /// Load `key`, falling back to `default` on any failure.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => {
                debug!("loaded '{}' from {}", key, self.backend.location().display());
                value
            }
            Ok(None) => default,
            Err(e) => {
                warn!("could not load '{}', using defaults: {}", key, e);
                default
            }
        }
    }

    pub fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    /// Save `value` under `key`. Failures are logged, never returned.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match self.try_save(key, value) {
            Ok(()) => debug!("saved '{}'", key),
            Err(e) => error!("Error saving '{}' to storage: {}", key, e),
        }
    }

    pub fn try_clear(&self) -> Result<()> {
        self.backend.clear()
    }

    /// Wipe the whole backend. Failures are logged, never returned.
    pub fn clear(&self) {
        if let Err(e) = self.try_clear() {
            error!("Error clearing storage: {}", e);
        }
    }
}
