//! # Storage Layer
//!
//! Codeshelf persists its state in a plain string-keyed key-value store, one
//! JSON document per key. The layer is split in two:
//!
//! 1. **Backends** ([`KeyValueStore`]): raw get/set of strings. They know
//!    *where* bytes live (a directory of files, a map in memory) and nothing
//!    about the records inside.
//! 2. **Adapter** ([`adapter::StorageAdapter`]): typed `load`/`save` on top of
//!    a backend. It owns the serialization and the failure policy.
//!
//! ## Failure Policy
//!
//! Storage is best effort. The in-memory collections are the source of truth
//! for the session:
//! - a load that fails (missing key, unreadable file, corrupt JSON) yields the
//!   caller's default;
//! - a save that fails is logged and otherwise ignored.
//!
//! The backends themselves still return `Result`s so the adapter can log the
//! actual cause.
//!
//! ## Keys
//!
//! | Key | Document |
//! |-----|----------|
//! | `snippets` | list of snippets |
//! | `categories` | list of categories |
//! | `banners` | list of banners |
//!
//! There is no schema tag and no migration: a change in the shape of a stored
//! value is not detected.
//!
//! ## Implementations
//!
//! - [`fs::FsStore`]: one `<key>.json` file per key inside a data directory.
//! - [`memory::MemStore`]: for tests, with failure injection.

use crate::error::Result;
use std::path::PathBuf;

pub mod adapter;
pub mod fs;
pub mod memory;

pub const SNIPPETS_KEY: &str = "snippets";
pub const CATEGORIES_KEY: &str = "categories";
pub const BANNERS_KEY: &str = "banners";

/// Abstract interface for raw key-value I/O.
///
/// All methods take `&self`; implementations that need mutation use interior
/// mutability (codeshelf is single-threaded).
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    /// Returns `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Every key currently present, sorted.
    fn keys(&self) -> Result<Vec<String>>;

    /// Remove every key in the store, including keys codeshelf did not write.
    fn clear(&self) -> Result<()>;

    /// Where the data lives. For `MemStore` this is a virtual path.
    fn location(&self) -> PathBuf;
}
