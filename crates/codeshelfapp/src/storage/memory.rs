use super::KeyValueStore;
use crate::error::{CodeshelfError, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// In-memory key-value store for testing.
///
/// Uses `RefCell` for interior mutability since codeshelf is single-threaded,
/// so the `KeyValueStore` trait can keep `&self` on every method.
#[derive(Default)]
pub struct MemStore {
    entries: RefCell<BTreeMap<String, String>>,
    simulate_read_error: RefCell<bool>,
    simulate_write_error: RefCell<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `get` fail, as an unavailable store would.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Make every write (`set`, `remove`, `clear`) fail.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper: place a raw value without going through the trait.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn check_write(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CodeshelfError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(CodeshelfError::Store("Simulated read error".to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_write()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_write()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }

    fn clear(&self) -> Result<()> {
        self.check_write()?;
        self.entries.borrow_mut().clear();
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://codeshelf")
    }
}
