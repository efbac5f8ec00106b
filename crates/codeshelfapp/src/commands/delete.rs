use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::store::EntityStore;

pub fn run<B: KeyValueStore>(store: &mut EntityStore<B>, ids: &[String]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for id in ids {
        match store.delete_snippet(id) {
            Some(snippet) => {
                result.add_message(CmdMessage::success(format!(
                    "Snippet deleted ({}): {}",
                    snippet.id, snippet.title
                )));
                result.affected_snippets.push(snippet);
            }
            None => result.add_message(CmdMessage::warning(format!("No snippet with id {}", id))),
        }
    }

    Ok(result)
}
