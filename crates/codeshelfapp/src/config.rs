//! # Configuration
//!
//! Codeshelf configuration is a [`confique`] struct loaded in layers:
//!
//! 1. **Environment variables**: `CODESHELF_DATA_DIR`, `CODESHELF_LOG_LEVEL`,
//!    `CODESHELF_EXPORT_DIR`.
//! 2. **Config file**: `codeshelf.toml` in the OS config directory (via the
//!    `directories` crate). A missing file is not an error.
//! 3. **Compiled defaults**.
//!
//! The CLI `--data-dir` flag beats all of these; see [`crate::init`].
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where `snippets.json` and friends live |
//! | `log_level` | `warn` | Log level when `-v` is not given |
//! | `export_dir` | current dir | Where dated export files are written |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "codeshelf.toml";

/// Configuration for codeshelf, stored in `codeshelf.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CodeshelfConfig {
    /// Directory holding the persisted collections.
    #[config(env = "CODESHELF_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// One of error, warn, info, debug, trace.
    #[config(env = "CODESHELF_LOG_LEVEL", default = "warn")]
    pub log_level: String,

    /// Directory export files are written to when no output path is given.
    #[config(env = "CODESHELF_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,
}

impl Default for CodeshelfConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "warn".to_string(),
            export_dir: None,
        }
    }
}

impl CodeshelfConfig {
    /// Load from the environment, then `file`, then defaults.
    pub fn load_from(file: &Path) -> Result<Self, confique::Error> {
        Self::builder().env().file(file).load()
    }

    /// Export directory, defaulting to `cwd`.
    pub fn export_dir(&self, cwd: &Path) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| cwd.to_path_buf())
    }
}
