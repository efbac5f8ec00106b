//! # Command Layer
//!
//! The business operations of codeshelf. Each command lives in its own
//! submodule and is a plain function over an
//! [`EntityStore`](crate::store::EntityStore).
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - validate user input (required fields, known languages and icons,
//!   unique category names);
//! - perform the mutation through the entity store;
//! - return a structured [`CmdResult`] with the affected records and
//!   messages.
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: no stdout/stderr, no colors.
//! - **Argument parsing**: that belongs to the CLI.
//! - **Confirmation prompts**: `reset` is told whether the user confirmed.
//!
//! Commands do touch the filesystem where the operation is about files:
//! `export` writes the document it builds and `import` reads one.
//!
//! ## Testing Strategy
//!
//! Command tests run against a `MemStore`-backed store with a stepping clock
//! and sequential ids (see `store::fixtures`).
//!
//! ## Command Modules
//!
//! - [`create`]: add a snippet
//! - [`get`]: list and show snippets
//! - [`update`]: edit a snippet
//! - [`delete`]: remove a snippet
//! - [`categories`]: manage categories
//! - [`banners`]: manage banners
//! - [`export`]: build and write export documents
//! - [`import`]: load an export document
//! - [`reset`]: restore defaults
//! - [`helpers`]: shared validation

use crate::document::Document;
use crate::model::{Banner, Category, CodeSnippet};
use serde::Serialize;
use std::path::PathBuf;

pub mod banners;
pub mod categories;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod helpers;
pub mod import;
pub mod reset;
pub mod update;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_snippets: Vec<CodeSnippet>,
    pub listed_snippets: Vec<CodeSnippet>,
    pub listed_categories: Vec<Category>,
    pub listed_banners: Vec<Banner>,
    pub document: Option<Document>,
    pub written_paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_snippets(mut self, snippets: Vec<CodeSnippet>) -> Self {
        self.listed_snippets = snippets;
        self
    }

    pub fn with_listed_categories(mut self, categories: Vec<Category>) -> Self {
        self.listed_categories = categories;
        self
    }

    pub fn with_listed_banners(mut self, banners: Vec<Banner>) -> Self {
        self.listed_banners = banners;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}

#[derive(Debug, Clone)]
pub struct CodeshelfPaths {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
}
