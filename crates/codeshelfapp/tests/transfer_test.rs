use chrono::{Duration, TimeZone, Utc};
use codeshelfapp::clock::{SequentialIds, StepClock};
use codeshelfapp::commands::export::{export_all, export_subset};
use codeshelfapp::commands::import::{self, import_document};
use codeshelfapp::document::ImportedDocument;
use codeshelfapp::error::CodeshelfError;
use codeshelfapp::model::{default_banners, default_categories, SnippetDraft};
use codeshelfapp::storage::fs::FsStore;
use codeshelfapp::storage::KeyValueStore;
use codeshelfapp::store::EntityStore;
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> EntityStore<FsStore> {
    let start = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
    EntityStore::load_with(
        FsStore::new(dir.path().join("data")),
        Box::new(StepClock::new(start, Duration::seconds(1))),
        Box::new(SequentialIds::starting_at(1)),
    )
}

fn css(title: &str, category: &str) -> SnippetDraft {
    SnippetDraft {
        title: title.to_string(),
        description: format!("{} styles", title),
        code: ".x { color: red; }".to_string(),
        language: "CSS".to_string(),
        cover_image: String::new(),
        category: category.to_string(),
    }
}

#[test]
fn test_export_import_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.add_snippet(css("Button", "General"));
    store.add_snippet(css("Hero", "Hero Sections"));

    let snippets = store.snippets().to_vec();
    let categories = store.categories().to_vec();
    let banners = store.banners().to_vec();

    let json = export_all(&store, store.now()).to_json_pretty().unwrap();
    store.reset();
    assert!(store.snippets().is_empty());

    import_document(&mut store, ImportedDocument::parse(&json).unwrap());
    assert_eq!(store.snippets(), snippets.as_slice());
    assert_eq!(store.categories(), categories.as_slice());
    assert_eq!(store.banners(), banners.as_slice());
}

#[test]
fn test_export_subset_picks_selected_ids() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    for title in ["One", "Two", "Three"] {
        store.add_snippet(css(title, "General"));
    }

    let ids: HashSet<String> = ["1", "3"].iter().map(|s| s.to_string()).collect();
    let doc = export_subset(&store, &ids, store.now()).unwrap();

    let got: Vec<&str> = doc.snippets.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(got, vec!["1", "3"]);
    assert_eq!(doc.categories, store.categories());
    assert_eq!(doc.banners, store.banners());
}

#[test]
fn test_malformed_import_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.add_snippet(css("Keep", "General"));
    let before = fs::read_to_string(dir.path().join("data").join("snippets.json")).unwrap();

    let file = dir.path().join("incoming.json");
    for raw in ["{}", r#"{"snippets": "nope"}"#, "[]", "not json"] {
        fs::write(&file, raw).unwrap();
        let err = import::run(&mut store, &file).unwrap_err();
        assert!(matches!(err, CodeshelfError::InvalidFormat(_)));
    }

    let after = fs::read_to_string(dir.path().join("data").join("snippets.json")).unwrap();
    assert_eq!(before, after);
    assert_eq!(store.snippets().len(), 1);
}

#[test]
fn test_import_keeps_records_with_odd_fields() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let file = dir.path().join("odd.json");
    fs::write(
        &file,
        r#"{"snippets": [
            {"id": 2, "title": "Numeric id", "coverImage": null, "createdAt": "2024-02-01"},
            "not a record"
        ]}"#,
    )
    .unwrap();

    import::run(&mut store, &file).unwrap();

    assert_eq!(store.snippets().len(), 2);
    assert_eq!(store.snippets()[0].id, "2");
    assert_eq!(store.snippets()[0].title, "Numeric id");
    assert_eq!(store.categories(), default_categories().as_slice());
    let persisted = fs::read_to_string(dir.path().join("data").join("snippets.json")).unwrap();
    assert!(persisted.contains("Numeric id"));
}

#[test]
fn test_reset_leaves_only_default_keys() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.add_snippet(css("Gone", "Checkout"));
    store.backend().set("theme", "\"dark\"").unwrap();

    store.reset();

    assert!(store.snippets().is_empty());
    assert_eq!(store.categories(), default_categories().as_slice());
    assert_eq!(store.banners(), default_banners().as_slice());
    assert_eq!(
        store.backend().keys().unwrap(),
        vec!["banners", "categories", "snippets"]
    );

    let reloaded = store_in(&dir);
    assert!(reloaded.snippets().is_empty());
    assert_eq!(reloaded.categories(), default_categories().as_slice());
}

#[test]
fn test_category_removal_is_persisted_for_snippets() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.add_snippet(css("Cart", "Checkout"));
    store.delete_category("3");

    let reloaded = store_in(&dir);
    assert_eq!(reloaded.snippets()[0].category, "General");
}
