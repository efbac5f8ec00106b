use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CodeSnippet;
use crate::storage::KeyValueStore;
use crate::store::EntityStore;

/// Category selector value that matches every snippet.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetFilter {
    /// Category name to keep. `None` or [`ALL_CATEGORIES`] keeps everything.
    pub category: Option<String>,
}

impl SnippetFilter {
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            category: Some(name.into()),
        }
    }

    pub fn matches(&self, snippet: &CodeSnippet) -> bool {
        match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(name) => snippet.category == name,
        }
    }
}

pub fn run<B: KeyValueStore>(store: &EntityStore<B>, filter: &SnippetFilter) -> Result<CmdResult> {
    let snippets: Vec<CodeSnippet> = store
        .snippets()
        .iter()
        .filter(|s| filter.matches(s))
        .cloned()
        .collect();

    let mut result = CmdResult::default();
    if snippets.is_empty() {
        let content = match filter.category.as_deref() {
            None | Some(ALL_CATEGORIES) => "No snippets yet.".to_string(),
            Some(name) => format!("No snippets in {}.", name),
        };
        result.add_message(CmdMessage::info(content));
    }
    Ok(result.with_listed_snippets(snippets))
}

pub fn show<B: KeyValueStore>(store: &EntityStore<B>, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.snippet(id) {
        Some(snippet) => result.listed_snippets.push(snippet.clone()),
        None => result.add_message(CmdMessage::warning(format!("No snippet with id {}", id))),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, MessageLevel};
    use crate::store::fixtures::{draft, mem_store};

    #[test]
    fn filters_by_category() {
        let mut store = mem_store();
        create::run(&mut store, draft("A", "General")).unwrap();
        create::run(&mut store, draft("B", "Checkout")).unwrap();
        create::run(&mut store, draft("C", "Checkout")).unwrap();

        let all = run(&store, &SnippetFilter::default()).unwrap();
        assert_eq!(all.listed_snippets.len(), 3);

        let all_keyword = run(&store, &SnippetFilter::category("all")).unwrap();
        assert_eq!(all_keyword.listed_snippets.len(), 3);

        let checkout = run(&store, &SnippetFilter::category("Checkout")).unwrap();
        let titles: Vec<&str> = checkout
            .listed_snippets
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["B", "C"]);
    }

    #[test]
    fn empty_listing_has_message() {
        let store = mem_store();
        let result = run(&store, &SnippetFilter::category("Hero Sections")).unwrap();
        assert!(result.listed_snippets.is_empty());
        assert_eq!(result.messages[0].content, "No snippets in Hero Sections.");
    }

    #[test]
    fn show_finds_or_warns() {
        let mut store = mem_store();
        create::run(&mut store, draft("A", "General")).unwrap();

        let found = show(&store, "100").unwrap();
        assert_eq!(found.listed_snippets[0].title, "A");

        let missing = show(&store, "7").unwrap();
        assert!(missing.listed_snippets.is_empty());
        assert_eq!(missing.messages[0].level, MessageLevel::Warning);
    }
}
