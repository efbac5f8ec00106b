//! # codeshelf
//!
//! A personal catalog of UI code snippets (HTML and CSS), grouped into
//! named categories, plus a small list of promotional banners. Everything is
//! persisted as JSON documents in a key-value store and can be moved between
//! machines as a single export file.
//!
//! ## Layers
//!
//! - [`storage`]: the key-value backends and the best-effort adapter over them.
//! - [`store`]: the in-memory collections, saved after every change.
//! - [`integrity`]: keeps snippet category names pointing at real categories.
//! - [`commands`]: validated business operations returning
//!   [`commands::CmdResult`].
//! - [`api`]: the facade UI clients talk to.
//! - [`init`] and [`config`]: wiring for the filesystem-backed production setup.

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod init;
pub mod integrity;
pub mod model;
pub mod storage;
pub mod store;
