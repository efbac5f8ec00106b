use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SnippetDraft;
use crate::storage::KeyValueStore;
use crate::store::EntityStore;

use super::helpers::validate_draft;

pub fn run<B: KeyValueStore>(store: &mut EntityStore<B>, draft: SnippetDraft) -> Result<CmdResult> {
    let draft = validate_draft(draft, store.categories())?;
    let snippet = store.add_snippet(draft);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Snippet created ({}): {}",
        snippet.id, snippet.title
    )));
    result.affected_snippets.push(snippet);
    Ok(result)
}
