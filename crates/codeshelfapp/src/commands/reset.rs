use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::store::EntityStore;

/// Wipe storage and restore the defaults. Without `confirmed` nothing
/// happens and the result says what would be lost.
pub fn run<B: KeyValueStore>(store: &mut EntityStore<B>, confirmed: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !confirmed {
        result.add_message(CmdMessage::warning(format!(
            "This deletes {} snippet(s), {} categor(ies) and {} banner(s) stored at {}. Re-run with --yes to confirm.",
            store.snippets().len(),
            store.categories().len(),
            store.banners().len(),
            store.backend().location().display()
        )));
        return Ok(result);
    }

    store.reset();
    result.add_message(CmdMessage::success("All data reset to defaults."));
    Ok(result)
}
