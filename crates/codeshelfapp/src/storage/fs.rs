use super::KeyValueStore;
use crate::error::{CodeshelfError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const VALUE_EXT: &str = "json";

/// Key-value store backed by a directory: each key is a `<key>.json` file.
///
/// Writes are atomic (temp file, then rename) so a crash never leaves a
/// half-written document behind.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CodeshelfError::Io)?;
        }
        Ok(())
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, VALUE_EXT)))
    }
}

/// Keys become file names, so only a conservative charset is allowed.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(CodeshelfError::Store(format!("Invalid storage key: '{}'", key)))
    }
}

/// A temp file left behind by an interrupted `set`.
fn is_leftover_tmp(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with('.') && name.ends_with(".tmp"))
}

impl KeyValueStore for FsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(CodeshelfError::Io)?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        self.ensure_dir()?;

        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(CodeshelfError::Io)?;
        fs::rename(&tmp_path, path).map_err(CodeshelfError::Io)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        if path.exists() {
            fs::remove_file(path).map_err(CodeshelfError::Io)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(CodeshelfError::Io)? {
            let path = entry.map_err(CodeshelfError::Io)?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(VALUE_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn clear(&self) -> Result<()> {
        if !self.root.exists() {
            return Ok(());
        }

        // Every key file goes, including ones codeshelf did not write.
        // Subdirectories and other files are not part of the store.
        for key in self.keys()? {
            self.remove(&key)?;
        }
        for entry in fs::read_dir(&self.root).map_err(CodeshelfError::Io)? {
            let path = entry.map_err(CodeshelfError::Io)?.path();
            if path.is_file() && is_leftover_tmp(&path) {
                fs::remove_file(&path).map_err(CodeshelfError::Io)?;
            }
        }
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.root.clone()
    }
}
