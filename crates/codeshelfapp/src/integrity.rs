//! # Category Reference Integrity
//!
//! Snippets name their category instead of pointing at its id. The rule that
//! keeps those names meaningful:
//!
//! > Every snippet's `category` equals the name of a current category, or
//! > [`FALLBACK_CATEGORY`].
//!
//! The rule is not checked on every write. It is restored each time the
//! category collection is replaced (see
//! [`crate::store::EntityStore::apply_category_change`]): any snippet whose
//! category name is no longer present is moved to the fallback.
//!
//! Matching is exact and case-sensitive. A renamed category therefore strands
//! its snippets, which then fall back like those of a deleted category.

use crate::model::{Category, CodeSnippet, FALLBACK_CATEGORY};
use std::collections::HashSet;

/// Rewrite dangling category names to the fallback. Returns how many
/// snippets were moved.
pub fn reconcile_snippet_categories(categories: &[Category], snippets: &mut [CodeSnippet]) -> usize {
    let valid: HashSet<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    let mut moved = 0;
    for snippet in snippets.iter_mut() {
        if !valid.contains(snippet.category.as_str()) && snippet.category != FALLBACK_CATEGORY {
            snippet.category = FALLBACK_CATEGORY.to_string();
            moved += 1;
        }
    }
    moved
}

/// True when `snippet` satisfies the rule against `categories`.
pub fn has_valid_category(categories: &[Category], snippet: &CodeSnippet) -> bool {
    snippet.category == FALLBACK_CATEGORY || categories.iter().any(|c| c.name == snippet.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryIcon;

    fn snippet(id: &str, category: &str) -> CodeSnippet {
        CodeSnippet {
            id: id.into(),
            title: format!("Snippet {}", id),
            category: category.into(),
            ..Default::default()
        }
    }

    fn cats(names: &[&str]) -> Vec<Category> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Category::new((i + 1).to_string(), *n, CategoryIcon::Code))
            .collect()
    }

    #[test]
    fn removed_category_falls_back() {
        let mut snippets = vec![snippet("1", "Hero")];
        let moved = reconcile_snippet_categories(&cats(&["General"]), &mut snippets);
        assert_eq!(moved, 1);
        assert_eq!(snippets[0].category, "General");
    }

    #[test]
    fn surviving_categories_are_untouched() {
        let mut snippets = vec![snippet("1", "Hero"), snippet("2", "General")];
        let moved = reconcile_snippet_categories(&cats(&["General", "Hero"]), &mut snippets);
        assert_eq!(moved, 0);
        assert_eq!(snippets[0].category, "Hero");
    }

    #[test]
    fn fallback_is_valid_even_without_a_general_category() {
        let mut snippets = vec![snippet("1", "General"), snippet("2", "Gone")];
        let categories = cats(&["Checkout"]);
        let moved = reconcile_snippet_categories(&categories, &mut snippets);
        assert_eq!(moved, 1);
        assert!(snippets.iter().all(|s| s.category == "General"));
        assert!(snippets.iter().all(|s| has_valid_category(&categories, s)));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut snippets = vec![snippet("1", "hero")];
        reconcile_snippet_categories(&cats(&["Hero"]), &mut snippets);
        assert_eq!(snippets[0].category, "General");
    }

    #[test]
    fn reconcile_is_idempotent() {
        let categories = cats(&["General", "Checkout"]);
        let mut once = vec![snippet("1", "Hero"), snippet("2", "Checkout"), snippet("3", "")];
        reconcile_snippet_categories(&categories, &mut once);
        let mut twice = once.clone();
        let moved = reconcile_snippet_categories(&categories, &mut twice);
        assert_eq!(moved, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_category_list_sends_everything_to_fallback() {
        let mut snippets = vec![snippet("1", "Hero"), snippet("2", "Checkout")];
        reconcile_snippet_categories(&[], &mut snippets);
        assert!(snippets.iter().all(|s| s.category == FALLBACK_CATEGORY));
    }
}
