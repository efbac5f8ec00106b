//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI
//! clients. It owns the [`EntityStore`] and the resolved paths, forwards to
//! `commands::*` and returns `Result<CmdResult>`.
//!
//! The facade does no business logic, no terminal output and no formatting.
//! Its one bit of input shaping is turning the CLI's flat arguments into
//! drafts and patches.
//!
//! ## Generic Over KeyValueStore
//!
//! - Production: `CodeshelfApi<FsStore>`
//! - Testing: `CodeshelfApi<MemStore>`

use crate::commands::{self, CmdResult, CodeshelfPaths};
use crate::document::{Document, ImportedDocument};
use crate::error::Result;
use crate::model::{BannerDraft, SnippetDraft, SnippetPatch};
use crate::storage::KeyValueStore;
use crate::store::EntityStore;
use std::collections::HashSet;
use std::path::Path;

pub use commands::get::SnippetFilter;

pub struct CodeshelfApi<B: KeyValueStore> {
    store: EntityStore<B>,
    paths: CodeshelfPaths,
}

impl<B: KeyValueStore> CodeshelfApi<B> {
    pub fn new(store: EntityStore<B>, paths: CodeshelfPaths) -> Self {
        Self { store, paths }
    }

    pub fn store(&self) -> &EntityStore<B> {
        &self.store
    }

    pub fn paths(&self) -> &CodeshelfPaths {
        &self.paths
    }

    // --- Snippets ---

    pub fn list_snippets(&self, filter: &SnippetFilter) -> Result<CmdResult> {
        commands::get::run(&self.store, filter)
    }

    pub fn show_snippet(&self, id: &str) -> Result<CmdResult> {
        commands::get::show(&self.store, id)
    }

    pub fn create_snippet(&mut self, draft: SnippetDraft) -> Result<CmdResult> {
        commands::create::run(&mut self.store, draft)
    }

    pub fn update_snippet(&mut self, id: &str, patch: SnippetPatch) -> Result<CmdResult> {
        commands::update::run(&mut self.store, id, patch)
    }

    pub fn delete_snippets<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        let ids: Vec<String> = ids.iter().map(|i| i.as_ref().to_string()).collect();
        commands::delete::run(&mut self.store, &ids)
    }

    // --- Categories ---

    pub fn list_categories(&self) -> Result<CmdResult> {
        commands::categories::list(&self.store)
    }

    pub fn add_category(&mut self, name: &str, icon: Option<&str>) -> Result<CmdResult> {
        commands::categories::add(&mut self.store, name, icon)
    }

    pub fn rename_category(&mut self, id: &str, name: &str) -> Result<CmdResult> {
        commands::categories::rename(&mut self.store, id, name)
    }

    pub fn set_category_icon(&mut self, id: &str, icon: &str) -> Result<CmdResult> {
        commands::categories::set_icon(&mut self.store, id, icon)
    }

    pub fn delete_category(&mut self, id: &str) -> Result<CmdResult> {
        commands::categories::delete(&mut self.store, id)
    }

    // --- Banners ---

    pub fn list_banners(&self, active_only: bool) -> Result<CmdResult> {
        commands::banners::list(&self.store, active_only)
    }

    pub fn add_banner(&mut self, image_url: String, link: Option<String>, active: bool) -> Result<CmdResult> {
        let draft = BannerDraft {
            image_url,
            link,
            is_active: active,
        };
        commands::banners::add(&mut self.store, draft)
    }

    pub fn set_banner_link(&mut self, id: &str, link: Option<String>) -> Result<CmdResult> {
        commands::banners::set_link(&mut self.store, id, link)
    }

    pub fn toggle_banner(&mut self, id: &str) -> Result<CmdResult> {
        commands::banners::toggle(&mut self.store, id)
    }

    pub fn delete_banner(&mut self, id: &str) -> Result<CmdResult> {
        commands::banners::delete(&mut self.store, id)
    }

    // --- Transfer ---

    pub fn export_all(&self) -> Document {
        commands::export::export_all(&self.store, self.store.now())
    }

    pub fn export_subset(&self, ids: &HashSet<String>) -> Result<Document> {
        commands::export::export_subset(&self.store, ids, self.store.now())
    }

    /// Write an export file; see [`commands::export::run`].
    pub fn export_to_file(&self, ids: &[String], output: Option<&Path>) -> Result<CmdResult> {
        commands::export::run(&self.store, ids, output, &self.paths.export_dir)
    }

    pub fn import_document(&mut self, doc: ImportedDocument) {
        commands::import::import_document(&mut self.store, doc)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<CmdResult> {
        commands::import::run(&mut self.store, path)
    }

    pub fn reset(&mut self, confirmed: bool) -> Result<CmdResult> {
        commands::reset::run(&mut self.store, confirmed)
    }
}
