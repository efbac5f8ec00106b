//! # Entity Store
//!
//! [`EntityStore`] is the application state: the snippet, category and banner
//! collections for the current session, plus the storage they mirror to.
//!
//! ## Lifecycle
//!
//! 1. [`EntityStore::load`] reads each collection through the
//!    [`StorageAdapter`], falling back to its default (no snippets, the three
//!    built-in categories, the built-in banner).
//! 2. Every mutation rewrites one collection in memory and then calls
//!    [`EntityStore::changed`] for it, which saves that collection right away.
//!    There is no batching and no dirty tracking.
//! 3. A failed save is logged by the adapter; the in-memory value stays
//!    authoritative until the process exits.
//!
//! ## Missing Ids
//!
//! Editing or deleting an id that is not in a collection leaves the
//! collection untouched, saves nothing and returns `None`. The command layer
//! turns that into a warning.
//!
//! ## Categories
//!
//! Any change to the category collection goes through
//! [`EntityStore::apply_category_change`], so snippets never keep pointing at
//! a category that is gone.

use crate::clock::{Clock, IdGenerator, SystemClock, UuidIds};
use crate::integrity::reconcile_snippet_categories;
use crate::model::{
    default_banners, default_categories, Banner, BannerDraft, BannerPatch, Category, CategoryIcon,
    CategoryPatch, CodeSnippet, SnippetDraft, SnippetPatch,
};
use crate::storage::adapter::StorageAdapter;
use crate::storage::{KeyValueStore, BANNERS_KEY, CATEGORIES_KEY, SNIPPETS_KEY};
use chrono::{DateTime, Utc};
use log::{debug, info};

/// The three independently persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Snippets,
    Categories,
    Banners,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Snippets,
        Collection::Categories,
        Collection::Banners,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Collection::Snippets => SNIPPETS_KEY,
            Collection::Categories => CATEGORIES_KEY,
            Collection::Banners => BANNERS_KEY,
        }
    }
}

pub struct EntityStore<B: KeyValueStore> {
    adapter: StorageAdapter<B>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    snippets: Vec<CodeSnippet>,
    categories: Vec<Category>,
    banners: Vec<Banner>,
}

impl<B: KeyValueStore> EntityStore<B> {
    /// Load all collections from `backend` using the wall clock and UUID ids.
    pub fn load(backend: B) -> Self {
        Self::load_with(backend, Box::new(SystemClock::new()), Box::new(UuidIds))
    }

    pub fn load_with(backend: B, clock: Box<dyn Clock>, ids: Box<dyn IdGenerator>) -> Self {
        let adapter = StorageAdapter::new(backend);
        let snippets = adapter.load(SNIPPETS_KEY, Vec::new());
        let categories = adapter.load(CATEGORIES_KEY, default_categories());
        let banners = adapter.load(BANNERS_KEY, default_banners());
        Self {
            adapter,
            clock,
            ids,
            snippets,
            categories,
            banners,
        }
    }

    pub fn snippets(&self) -> &[CodeSnippet] {
        &self.snippets
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn snippet(&self, id: &str) -> Option<&CodeSnippet> {
        self.snippets.iter().find(|s| s.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn banner(&self, id: &str) -> Option<&Banner> {
        self.banners.iter().find(|b| b.id == id)
    }

    /// Current time from the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn adapter(&self) -> &StorageAdapter<B> {
        &self.adapter
    }

    pub fn backend(&self) -> &B {
        self.adapter.backend()
    }

    /// Persist one collection after it changed.
    pub fn changed(&self, collection: Collection) {
        let key = collection.key();
        match collection {
            Collection::Snippets => self.adapter.save(key, &self.snippets),
            Collection::Categories => self.adapter.save(key, &self.categories),
            Collection::Banners => self.adapter.save(key, &self.banners),
        }
    }

    // --- Snippets ---

    pub fn add_snippet(&mut self, draft: SnippetDraft) -> CodeSnippet {
        let now = self.clock.now();
        let snippet = CodeSnippet {
            id: self.ids.next_id(),
            title: draft.title,
            description: draft.description,
            code: draft.code,
            language: draft.language,
            cover_image: draft.cover_image,
            category: draft.category,
            created_at: now,
            updated_at: now,
        };
        self.snippets.push(snippet.clone());
        self.changed(Collection::Snippets);
        snippet
    }

    pub fn edit_snippet(&mut self, id: &str, patch: &SnippetPatch) -> Option<CodeSnippet> {
        let pos = self.snippets.iter().position(|s| s.id == id)?;
        let now = self.clock.now();
        self.snippets[pos].apply(patch, now);
        let updated = self.snippets[pos].clone();
        self.changed(Collection::Snippets);
        Some(updated)
    }

    pub fn delete_snippet(&mut self, id: &str) -> Option<CodeSnippet> {
        let pos = self.snippets.iter().position(|s| s.id == id)?;
        let removed = self.snippets.remove(pos);
        self.changed(Collection::Snippets);
        Some(removed)
    }

    pub fn replace_snippets(&mut self, snippets: Vec<CodeSnippet>) {
        self.snippets = snippets;
        self.changed(Collection::Snippets);
    }

    // --- Categories ---

    /// Replace the category collection and move snippets whose category
    /// disappeared to the fallback. Both collections are saved.
    ///
    /// Returns the updated categories and snippets.
    pub fn apply_category_change(
        &mut self,
        categories: Vec<Category>,
    ) -> (&[Category], &[CodeSnippet]) {
        self.categories = categories;
        let moved = reconcile_snippet_categories(&self.categories, &mut self.snippets);
        if moved > 0 {
            debug!("{} snippet(s) moved to the fallback category", moved);
        }
        self.changed(Collection::Categories);
        self.changed(Collection::Snippets);
        (&self.categories, &self.snippets)
    }

    /// Swap in `categories` as given, without reconciling snippets. Used by
    /// import, where the document's snippets arrive alongside.
    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.changed(Collection::Categories);
    }

    pub fn add_category(&mut self, name: String, icon: CategoryIcon) -> Category {
        let category = Category::new(self.ids.next_id(), name, icon);
        let mut categories = self.categories.clone();
        categories.push(category.clone());
        self.apply_category_change(categories);
        category
    }

    pub fn edit_category(&mut self, id: &str, patch: &CategoryPatch) -> Option<Category> {
        let pos = self.categories.iter().position(|c| c.id == id)?;
        let mut categories = self.categories.clone();
        if let Some(name) = &patch.name {
            categories[pos].name = name.clone();
        }
        if let Some(icon) = patch.icon {
            categories[pos].icon = icon.as_str().to_string();
        }
        let updated = categories[pos].clone();
        self.apply_category_change(categories);
        Some(updated)
    }

    pub fn delete_category(&mut self, id: &str) -> Option<Category> {
        let pos = self.categories.iter().position(|c| c.id == id)?;
        let mut categories = self.categories.clone();
        let removed = categories.remove(pos);
        self.apply_category_change(categories);
        Some(removed)
    }

    // --- Banners ---

    pub fn add_banner(&mut self, draft: BannerDraft) -> Banner {
        let banner = Banner {
            id: self.ids.next_id(),
            image_url: draft.image_url,
            link: draft.link,
            is_active: draft.is_active,
        };
        self.banners.push(banner.clone());
        self.changed(Collection::Banners);
        banner
    }

    pub fn edit_banner(&mut self, id: &str, patch: &BannerPatch) -> Option<Banner> {
        let banner = self.banners.iter_mut().find(|b| b.id == id)?;
        if let Some(image_url) = &patch.image_url {
            banner.image_url = image_url.clone();
        }
        if let Some(link) = &patch.link {
            banner.link = link.clone();
        }
        if let Some(is_active) = patch.is_active {
            banner.is_active = is_active;
        }
        let updated = banner.clone();
        self.changed(Collection::Banners);
        Some(updated)
    }

    pub fn delete_banner(&mut self, id: &str) -> Option<Banner> {
        let pos = self.banners.iter().position(|b| b.id == id)?;
        let removed = self.banners.remove(pos);
        self.changed(Collection::Banners);
        Some(removed)
    }

    pub fn replace_banners(&mut self, banners: Vec<Banner>) {
        self.banners = banners;
        self.changed(Collection::Banners);
    }

    // --- Whole dataset ---

    /// Restore the built-in defaults and wipe the backend, including keys
    /// codeshelf never wrote. The defaults are then saved again.
    pub fn reset(&mut self) {
        self.snippets = Vec::new();
        self.categories = default_categories();
        self.banners = default_banners();
        self.adapter.clear();
        for collection in Collection::ALL {
            self.changed(collection);
        }
        info!(
            "storage at {} reset to defaults",
            self.backend().location().display()
        );
    }
}
