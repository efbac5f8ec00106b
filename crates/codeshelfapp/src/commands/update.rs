use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SnippetPatch;
use crate::storage::KeyValueStore;
use crate::store::EntityStore;

use super::helpers::validate_patch;

pub fn run<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    id: &str,
    patch: SnippetPatch,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if patch.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    let patch = validate_patch(patch, store.categories())?;
    match store.edit_snippet(id, &patch) {
        Some(snippet) => {
            result.add_message(CmdMessage::success(format!(
                "Snippet updated ({}): {}",
                snippet.id, snippet.title
            )));
            result.affected_snippets.push(snippet);
        }
        None => result.add_message(CmdMessage::warning(format!("No snippet with id {}", id))),
    }
    Ok(result)
}
