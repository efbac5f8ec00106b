use crate::commands::{CmdMessage, CmdResult};
use crate::document::{export_file_name, Document};
use crate::error::{CodeshelfError, Result};
use crate::storage::KeyValueStore;
use crate::store::EntityStore;
use chrono::{DateTime, Utc};
use log::info;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything in the catalog, stamped with `now`.
pub fn export_all<B: KeyValueStore>(store: &EntityStore<B>, now: DateTime<Utc>) -> Document {
    Document {
        snippets: store.snippets().to_vec(),
        categories: store.categories().to_vec(),
        banners: store.banners().to_vec(),
        export_date: now,
    }
}

/// The snippets whose id is in `ids`, in collection order, with the full
/// category and banner lists.
pub fn export_subset<B: KeyValueStore>(
    store: &EntityStore<B>,
    ids: &HashSet<String>,
    now: DateTime<Utc>,
) -> Result<Document> {
    if ids.is_empty() {
        return Err(CodeshelfError::EmptySelection);
    }
    let mut document = export_all(store, now);
    document.snippets.retain(|s| ids.contains(&s.id));
    Ok(document)
}

/// Build the document for `ids` (everything when empty) and write it to
/// `output`, or to a dated file in `export_dir`.
pub fn run<B: KeyValueStore>(
    store: &EntityStore<B>,
    ids: &[String],
    output: Option<&Path>,
    export_dir: &Path,
) -> Result<CmdResult> {
    let now = store.now();
    let selected = !ids.is_empty();
    let document = if selected {
        let wanted: HashSet<String> = ids.iter().cloned().collect();
        export_subset(store, &wanted, now)?
    } else {
        export_all(store, now)
    };

    let mut result = CmdResult::default();
    for id in ids {
        if store.snippet(id).is_none() {
            result.add_message(CmdMessage::warning(format!("No snippet with id {}", id)));
        }
    }

    let path: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => export_dir.join(export_file_name(selected, now)),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, document.to_json_pretty()?)?;
    info!(
        "exported {} snippet(s) to {}",
        document.snippets.len(),
        path.display()
    );

    result.add_message(CmdMessage::success(format!(
        "Exported {} snippet(s) to {}",
        document.snippets.len(),
        path.display()
    )));
    result.written_paths.push(path);
    result.document = Some(document);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::document::ImportedDocument;
    use crate::model::{default_banners, default_categories};
    use crate::store::fixtures::{draft, mem_store};
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn subset_keeps_order_and_full_collections() {
        let mut store = mem_store();
        for title in ["A", "B", "C"] {
            create::run(&mut store, draft(title, "General")).unwrap();
        }
        let ids: HashSet<String> = ["102", "100"].iter().map(|s| s.to_string()).collect();
        let doc = export_subset(&store, &ids, date()).unwrap();

        let titles: Vec<&str> = doc.snippets.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(doc.categories, default_categories());
        assert_eq!(doc.banners, default_banners());
        assert_eq!(doc.export_date, date());
    }

    #[test]
    fn empty_selection_is_an_error() {
        let store = mem_store();
        let err = export_subset(&store, &HashSet::new(), date()).unwrap_err();
        assert!(matches!(err, CodeshelfError::EmptySelection));
    }

    #[test]
    fn run_writes_dated_file() {
        let dir = tempdir().unwrap();
        let mut store = mem_store();
        create::run(&mut store, draft("A", "General")).unwrap();

        let result = run(&store, &[], None, dir.path()).unwrap();
        let path = &result.written_paths[0];
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("code-library-export-2024-03-01"));
        assert!(!name.contains("selected"));

        let raw = fs::read_to_string(path).unwrap();
        let parsed = ImportedDocument::parse(&raw).unwrap();
        assert_eq!(parsed.snippets, store.snippets());
    }

    #[test]
    fn run_with_ids_uses_selected_name_and_warns_on_unknown() {
        let dir = tempdir().unwrap();
        let mut store = mem_store();
        create::run(&mut store, draft("A", "General")).unwrap();

        let ids = vec!["100".to_string(), "404".to_string()];
        let result = run(&store, &ids, None, dir.path()).unwrap();
        let name = result.written_paths[0].file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("code-library-export-selected-"));
        assert!(result.has_warnings());
        assert_eq!(result.document.unwrap().snippets.len(), 1);
    }

    #[test]
    fn run_honors_explicit_output() {
        let dir = tempdir().unwrap();
        let store = mem_store();
        let target = dir.path().join("nested").join("out.json");
        run(&store, &[], Some(target.as_path()), dir.path()).unwrap();
        assert!(target.exists());
    }
}
