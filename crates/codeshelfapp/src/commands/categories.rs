//! Category management. Every change replaces the whole category list
//! through [`EntityStore::apply_category_change`], so snippets left without
//! a category are moved to the fallback in the same step.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{CategoryIcon, CategoryPatch, FALLBACK_CATEGORY};
use crate::storage::KeyValueStore;
use crate::store::EntityStore;

use super::helpers::validate_category_name;

pub fn list<B: KeyValueStore>(store: &EntityStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_categories(store.categories().to_vec()))
}

pub fn add<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    name: &str,
    icon: Option<&str>,
) -> Result<CmdResult> {
    let name = validate_category_name(name, store.categories(), None)?;
    let icon = match icon {
        Some(raw) => raw.parse::<CategoryIcon>()?,
        None => CategoryIcon::default(),
    };

    let category = store.add_category(name, icon);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category added ({}): {}",
        category.id, category.name
    )));
    Ok(result.with_listed_categories(vec![category]))
}

/// Rename a category. Snippets are not renamed with it; they fall back.
pub fn rename<B: KeyValueStore>(store: &mut EntityStore<B>, id: &str, name: &str) -> Result<CmdResult> {
    let name = validate_category_name(name, store.categories(), Some(id))?;
    let before = count_in_fallback(store);
    let patch = CategoryPatch {
        name: Some(name),
        icon: None,
    };
    finish_edit(store, id, &patch, before, "renamed")
}

pub fn set_icon<B: KeyValueStore>(store: &mut EntityStore<B>, id: &str, icon: &str) -> Result<CmdResult> {
    let patch = CategoryPatch {
        name: None,
        icon: Some(icon.parse()?),
    };
    let before = count_in_fallback(store);
    finish_edit(store, id, &patch, before, "updated")
}

pub fn delete<B: KeyValueStore>(store: &mut EntityStore<B>, id: &str) -> Result<CmdResult> {
    let before = count_in_fallback(store);
    let mut result = CmdResult::default();
    match store.delete_category(id) {
        Some(category) => {
            result.add_message(CmdMessage::success(format!(
                "Category deleted ({}): {}",
                category.id, category.name
            )));
            report_moved(&mut result, store, before);
        }
        None => result.add_message(CmdMessage::warning(format!("No category with id {}", id))),
    }
    Ok(result)
}

fn finish_edit<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    id: &str,
    patch: &CategoryPatch,
    before: usize,
    verb: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.edit_category(id, patch) {
        Some(category) => {
            result.add_message(CmdMessage::success(format!(
                "Category {} ({}): {}",
                verb, category.id, category.name
            )));
            report_moved(&mut result, store, before);
            result.listed_categories.push(category);
        }
        None => result.add_message(CmdMessage::warning(format!("No category with id {}", id))),
    }
    Ok(result)
}

fn count_in_fallback<B: KeyValueStore>(store: &EntityStore<B>) -> usize {
    store
        .snippets()
        .iter()
        .filter(|s| s.category == FALLBACK_CATEGORY)
        .count()
}

fn report_moved<B: KeyValueStore>(result: &mut CmdResult, store: &EntityStore<B>, before: usize) {
    let moved = count_in_fallback(store).saturating_sub(before);
    if moved > 0 {
        result.add_message(CmdMessage::info(format!(
            "{} snippet(s) moved to {}",
            moved, FALLBACK_CATEGORY
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, MessageLevel};
    use crate::error::CodeshelfError;
    use crate::store::fixtures::{draft, mem_store};

    #[test]
    fn add_uses_default_icon() {
        let mut store = mem_store();
        let result = add(&mut store, "  Forms ", None).unwrap();
        let category = &result.listed_categories[0];
        assert_eq!(category.name, "Forms");
        assert_eq!(category.icon, "Code");
        assert_eq!(store.categories().len(), 4);
    }

    #[test]
    fn add_rejects_duplicates_and_bad_icons() {
        let mut store = mem_store();
        let err = add(&mut store, "checkout", None).unwrap_err();
        assert!(matches!(err, CodeshelfError::DuplicateCategory(_)));

        let err = add(&mut store, "Forms", Some("Rocket")).unwrap_err();
        assert!(matches!(err, CodeshelfError::Validation(_)));
        assert_eq!(store.categories().len(), 3);
    }

    #[test]
    fn add_parses_icon_case_insensitively() {
        let mut store = mem_store();
        let result = add(&mut store, "Data", Some("database")).unwrap();
        assert_eq!(result.listed_categories[0].icon, "Database");
    }

    #[test]
    fn rename_strands_snippets() {
        let mut store = mem_store();
        create::run(&mut store, draft("Pay", "Checkout")).unwrap();

        let result = rename(&mut store, "3", "Payments").unwrap();
        assert_eq!(store.category("3").unwrap().name, "Payments");
        assert_eq!(store.snippets()[0].category, "General");
        assert!(result
            .messages
            .iter()
            .any(|m| m.content == "1 snippet(s) moved to General"));
    }

    #[test]
    fn set_icon_keeps_snippets() {
        let mut store = mem_store();
        create::run(&mut store, draft("Pay", "Checkout")).unwrap();
        let result = set_icon(&mut store, "3", "Package").unwrap();
        assert_eq!(result.listed_categories[0].icon, "Package");
        assert_eq!(result.messages.len(), 1);
        assert_eq!(store.snippets()[0].category, "Checkout");
    }

    #[test]
    fn delete_moves_snippets_and_warns_on_missing() {
        let mut store = mem_store();
        create::run(&mut store, draft("Hero", "Hero Sections")).unwrap();
        create::run(&mut store, draft("Plain", "General")).unwrap();

        let result = delete(&mut store, "2").unwrap();
        assert_eq!(store.categories().len(), 2);
        assert!(store.snippets().iter().all(|s| s.category == "General"));
        assert!(result.messages.iter().any(|m| m.content.contains("1 snippet(s)")));

        let missing = delete(&mut store, "2").unwrap();
        assert_eq!(missing.messages[0].level, MessageLevel::Warning);
    }
}
