//! # Domain Model
//!
//! This module defines the three records codeshelf keeps: [`CodeSnippet`],
//! [`Category`] and [`Banner`], plus the drafts and patches used to create
//! and edit them.
//!
//! ## Denormalized Category Reference
//!
//! A snippet points at its category by **name**, not by id. This keeps
//! exported documents readable and lets a snippet survive the deletion of
//! its category: see [`crate::integrity`] for how dangling names fall back
//! to [`FALLBACK_CATEGORY`].
//!
//! Renaming a category does not follow through to its snippets. From a
//! snippet's point of view a rename is a delete of the old name plus an add
//! of the new one.
//!
//! ## Wire Format
//!
//! Records are stored with camelCase keys (`imageUrl`, `isActive`,
//! `coverImage`, `createdAt`, `updatedAt`). Every field has a default so a
//! record with missing fields still loads; imported data is not validated
//! field by field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CodeshelfError;

/// Name substituted for a snippet's category when that category is gone.
pub const FALLBACK_CATEGORY: &str = "General";

/// Placeholder shown for snippets without a cover image, and the image of
/// the built-in banner.
pub const DEFAULT_COVER_IMAGE: &str = "https://images.unsplash.com/photo-1555066931-4365d14bab8c";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: CategoryIcon) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.as_str().to_string(),
        }
    }
}

/// The fixed set of icons a category can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryIcon {
    #[default]
    Code,
    Layout,
    ShoppingCart,
    FileCode,
    Database,
    Globe,
    Package,
    Settings,
    Terminal,
    Folder,
}

impl CategoryIcon {
    pub const ALL: [CategoryIcon; 10] = [
        CategoryIcon::Code,
        CategoryIcon::Layout,
        CategoryIcon::ShoppingCart,
        CategoryIcon::FileCode,
        CategoryIcon::Database,
        CategoryIcon::Globe,
        CategoryIcon::Package,
        CategoryIcon::Settings,
        CategoryIcon::Terminal,
        CategoryIcon::Folder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryIcon::Code => "Code",
            CategoryIcon::Layout => "Layout",
            CategoryIcon::ShoppingCart => "ShoppingCart",
            CategoryIcon::FileCode => "FileCode",
            CategoryIcon::Database => "Database",
            CategoryIcon::Globe => "Globe",
            CategoryIcon::Package => "Package",
            CategoryIcon::Settings => "Settings",
            CategoryIcon::Terminal => "Terminal",
            CategoryIcon::Folder => "Folder",
        }
    }
}

impl fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryIcon {
    type Err = CodeshelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CategoryIcon::ALL
            .iter()
            .find(|icon| icon.as_str().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = CategoryIcon::ALL.iter().map(|i| i.as_str()).collect();
                CodeshelfError::Validation(format!(
                    "Unknown icon '{}' (expected one of: {})",
                    wanted,
                    known.join(", ")
                ))
            })
    }
}

/// Languages a snippet can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetLanguage {
    Html,
    Css,
}

impl SnippetLanguage {
    pub const ALL: [SnippetLanguage; 2] = [SnippetLanguage::Html, SnippetLanguage::Css];

    pub fn as_str(&self) -> &'static str {
        match self {
            SnippetLanguage::Html => "HTML",
            SnippetLanguage::Css => "CSS",
        }
    }
}

impl fmt::Display for SnippetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnippetLanguage {
    type Err = CodeshelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SnippetLanguage::ALL
            .iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| {
                CodeshelfError::Validation(format!(
                    "Unknown language '{}' (expected HTML or CSS)",
                    wanted
                ))
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeSnippet {
    pub id: String,
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub cover_image: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CodeSnippet {
    /// The cover image, or the shared placeholder when none was set.
    pub fn cover_image_or_default(&self) -> &str {
        if self.cover_image.trim().is_empty() {
            DEFAULT_COVER_IMAGE
        } else {
            &self.cover_image
        }
    }

    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }

    /// Merge the supplied fields and stamp `updated_at`. `created_at` is kept.
    pub fn apply(&mut self, patch: &SnippetPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(code) = &patch.code {
            self.code = code.clone();
        }
        if let Some(language) = &patch.language {
            self.language = language.clone();
        }
        if let Some(cover_image) = &patch.cover_image {
            self.cover_image = cover_image.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        self.updated_at = now;
    }
}

/// Everything needed to create a snippet except its identity and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetDraft {
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub cover_image: String,
    pub category: String,
}

/// Fields to merge onto an existing snippet. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub cover_image: Option<String>,
    pub category: Option<String>,
}

impl SnippetPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.code.is_none()
            && self.language.is_none()
            && self.cover_image.is_none()
            && self.category.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<CategoryIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerDraft {
    pub image_url: String,
    pub link: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerPatch {
    pub image_url: Option<String>,
    /// `Some(None)` clears the link.
    pub link: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// The categories a fresh (or reset) catalog starts with.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("1", FALLBACK_CATEGORY, CategoryIcon::Code),
        Category::new("2", "Hero Sections", CategoryIcon::Layout),
        Category::new("3", "Checkout", CategoryIcon::ShoppingCart),
    ]
}

/// The banners a fresh (or reset) catalog starts with.
pub fn default_banners() -> Vec<Banner> {
    vec![Banner {
        id: "1".to_string(),
        image_url: DEFAULT_COVER_IMAGE.to_string(),
        link: None,
        is_active: true,
    }]
}
