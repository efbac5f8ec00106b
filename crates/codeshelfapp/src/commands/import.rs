use crate::commands::{CmdMessage, CmdResult};
use crate::document::ImportedDocument;
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::store::EntityStore;
use log::info;
use std::fs;
use std::path::Path;

/// Replace the catalog with `doc`. Collections the document lacks keep
/// their current value and are not saved again.
pub fn import_document<B: KeyValueStore>(store: &mut EntityStore<B>, doc: ImportedDocument) {
    store.replace_snippets(doc.snippets);
    if let Some(categories) = doc.categories {
        store.replace_categories(categories);
    }
    if let Some(banners) = doc.banners {
        store.replace_banners(banners);
    }
}

/// Read an export file and import it. Nothing changes if the file cannot be
/// read or is not an export document.
pub fn run<B: KeyValueStore>(store: &mut EntityStore<B>, path: &Path) -> Result<CmdResult> {
    let raw = fs::read_to_string(path)?;
    let doc = ImportedDocument::parse(&raw)?;

    let mut result = CmdResult::default();
    if doc.categories.is_none() {
        result.add_message(CmdMessage::info("No categories in file; keeping current ones."));
    }
    if doc.banners.is_none() {
        result.add_message(CmdMessage::info("No banners in file; keeping current ones."));
    }

    let count = doc.snippets.len();
    import_document(store, doc);
    info!("imported {} snippet(s) from {}", count, path.display());

    result.add_message(CmdMessage::success(format!(
        "Imported {} snippet(s) from {}",
        count,
        path.display()
    )));
    Ok(result)
}
