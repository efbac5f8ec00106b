//! # Startup
//!
//! [`initialize`] wires a ready-to-use [`CodeshelfApi`] over the filesystem.
//!
//! ## Data Directory Resolution
//!
//! 1. `data_override` (the CLI `--data-dir` flag), used as is.
//! 2. `data_dir` from [`CodeshelfConfig`] (environment or config file).
//! 3. The OS data directory from `directories`
//!    (e.g. `~/.local/share/codeshelf` on Linux).
//! 4. `./.codeshelf` when the OS gives no home directory.
//!
//! The directory is created lazily on the first save.

use crate::api::CodeshelfApi;
use crate::commands::CodeshelfPaths;
use crate::config::{CodeshelfConfig, CONFIG_FILE_NAME};
use crate::storage::fs::FsStore;
use crate::store::EntityStore;
use confique::Config;
use directories::ProjectDirs;
use log::{debug, warn};
use std::path::PathBuf;

const LOCAL_DATA_DIR: &str = ".codeshelf";

pub struct CodeshelfContext {
    pub api: CodeshelfApi<FsStore>,
    pub config: CodeshelfConfig,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "codeshelf", "codeshelf")
}

/// Path of `codeshelf.toml`, if the OS has a config directory.
pub fn config_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn try_load_config() -> Result<CodeshelfConfig, confique::Error> {
    match config_file_path() {
        Some(path) => CodeshelfConfig::load_from(&path),
        None => CodeshelfConfig::builder().env().load(),
    }
}

/// Load configuration. A broken config file is reported and ignored.
pub fn load_config() -> CodeshelfConfig {
    try_load_config().unwrap_or_else(|e| {
        warn!("could not load configuration, using defaults: {}", e);
        CodeshelfConfig::default()
    })
}

pub fn resolve_data_dir(data_override: Option<PathBuf>, config: &CodeshelfConfig) -> PathBuf {
    data_override
        .or_else(|| config.data_dir.clone())
        .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from(LOCAL_DATA_DIR))
}

pub fn initialize(data_override: Option<PathBuf>) -> CodeshelfContext {
    initialize_with(load_config(), data_override)
}

/// Same as [`initialize`] with an already loaded configuration.
pub fn initialize_with(config: CodeshelfConfig, data_override: Option<PathBuf>) -> CodeshelfContext {
    let data_dir = resolve_data_dir(data_override, &config);
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let export_dir = config.export_dir(&cwd);
    debug!(
        "data dir {}, export dir {}",
        data_dir.display(),
        export_dir.display()
    );

    let store = EntityStore::load(FsStore::new(data_dir.clone()));
    let paths = CodeshelfPaths {
        data_dir,
        export_dir,
    };
    let api = CodeshelfApi::new(store, paths);

    CodeshelfContext { api, config }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let config = CodeshelfConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let dir = resolve_data_dir(Some(PathBuf::from("/from/flag")), &config);
        assert_eq!(dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn config_beats_os_default() {
        let config = CodeshelfConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        assert_eq!(resolve_data_dir(None, &config), PathBuf::from("/from/config"));
    }

    #[test]
    fn falls_back_to_some_directory() {
        let dir = resolve_data_dir(None, &CodeshelfConfig::default());
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn initialize_with_override_uses_that_directory() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = initialize_with(CodeshelfConfig::default(), Some(dir.path().to_path_buf()));
        assert_eq!(ctx.api.paths().data_dir, dir.path());
        assert_eq!(ctx.api.store().backend().root(), dir.path());
        assert_eq!(ctx.api.store().categories().len(), 3);
    }
}
