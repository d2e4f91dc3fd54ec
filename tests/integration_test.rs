/// End-to-end workflows over the library API
///
/// These tests drive the same operations the explorer runs: listing, history,
/// entry commands and session persistence
mod common;

use std::fs;

use common::{TreeBuilder, names, project_tree};
use filey::fsops::{
    Preview, create_file, create_folder, delete_entry, drop_target, move_entries, paste_entry,
    preview_for, rename_entry,
};
use filey::search::{SearchMode, filter_entries};
use filey::session::{Session, SessionStore};
use filey::theme::ThemePreset;
use filey::{History, breadcrumbs, list_directory};

#[test]
fn test_e2e_listing_order() {
    let tree = project_tree();
    let listing = list_directory(tree.path()).unwrap();

    assert_eq!(names(&listing), ["Assets", "docs", "src", ".hidden", "Cargo.toml", "README.md"]);
    assert_eq!(listing.entries[4].display_label(), "Cargo.toml (2.0 KB)");
    assert_eq!(listing.entries[0].display_label(), "Assets");
}

#[test]
fn test_e2e_navigate_with_history() {
    let tree = project_tree();
    let root = tree.path().to_path_buf();
    let docs = root.join("docs");
    let src = root.join("src");
    let mut history = History::new();

    history.push(&root);
    history.push(&docs);
    assert_eq!(names(&list_directory(history.current().unwrap()).unwrap()), ["guide.md", "notes.txt"]);

    // Back, then a fresh visit drops the forward entry
    assert_eq!(history.back(), Some(root.as_path()));
    history.push(&src);
    assert!(!history.can_go_forward());
    assert_eq!(history.len(), 2);
    assert_eq!(names(&list_directory(&src).unwrap()), ["lib.rs", "main.rs"]);

    assert_eq!(history.back(), Some(root.as_path()));
    assert_eq!(history.forward(), Some(src.as_path()));
}

#[test]
fn test_e2e_breadcrumbs_lead_back_up() {
    let tree = project_tree();
    let nested = tree.path().join("docs");
    let crumbs = breadcrumbs(&nested);

    assert_eq!(crumbs.last().unwrap().path, nested);
    assert_eq!(crumbs.last().unwrap().label, "docs");
    let parent = &crumbs[crumbs.len() - 2];
    assert_eq!(parent.path, tree.path());
    assert!(list_directory(&parent.path).is_ok());
}

#[test]
fn test_e2e_entry_commands() {
    let tree = TreeBuilder::new().with_folder("inbox").build();
    let root = tree.path();

    let archive = create_folder(root, "archive").unwrap();
    let draft = create_file(root, "draft.txt").unwrap();
    fs::write(&draft, "hello").unwrap();

    let letter = rename_entry(&draft, "letter.txt").unwrap();
    let copy = paste_entry(&letter, root).unwrap();
    assert_eq!(copy, root.join("letter - Copy1.txt"));

    let report = move_entries(&[letter.clone(), copy.clone()], &archive);
    assert!(report.is_clean());
    assert_eq!(report.moved.len(), 2);
    assert_eq!(names(&list_directory(&archive).unwrap()), ["letter - Copy1.txt", "letter.txt"]);

    delete_entry(&archive).unwrap();
    assert_eq!(names(&list_directory(root).unwrap()), ["inbox"]);
}

#[test]
fn test_e2e_move_lands_in_folder_under_cursor() {
    let tree = project_tree();
    let listing = list_directory(tree.path()).unwrap();
    let docs = listing.entries.iter().find(|e| e.name == "docs").unwrap();
    let readme = listing.entries.iter().find(|e| e.name == "README.md").unwrap();

    assert_eq!(drop_target(tree.path(), Some(docs)), docs.path);
    assert_eq!(drop_target(tree.path(), Some(readme)), tree.path());

    let report = move_entries(&[readme.path.clone()], &drop_target(tree.path(), Some(docs)));
    assert!(report.is_clean());
    assert!(tree.path().join("docs").join("README.md").exists());
}

#[test]
fn test_e2e_search_within_folder() {
    let tree = project_tree();
    let listing = list_directory(tree.path()).unwrap();

    let substring: Vec<&str> = filter_entries(&listing.entries, "md", SearchMode::Substring)
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(substring, ["README.md"]);

    let fuzzy = filter_entries(&listing.entries, "crgtml", SearchMode::Fuzzy);
    assert_eq!(fuzzy.first().map(|e| e.name.as_str()), Some("Cargo.toml"));
}

#[test]
fn test_e2e_folder_preview() {
    let tree = project_tree();
    let listing = list_directory(tree.path()).unwrap();
    let docs = listing.entries.iter().find(|e| e.name == "docs").unwrap();

    match preview_for(docs) {
        Preview::Folder { peek, .. } => assert_eq!(peek.as_deref(), Some("guide.md, notes.txt")),
        other => panic!("expected folder preview, got {:?}", other),
    }
}

#[test]
fn test_e2e_session_restores_last_path() {
    let tree = project_tree();
    let config = TreeBuilder::new().build();
    let store = SessionStore::new(config.path().join("filey").join("session.json"));

    let mut session = Session::new(tree.path());
    session.last_path = tree.path().join("src").canonicalize().unwrap();
    session.theme = ThemePreset::Light.theme();
    store.save(&session).unwrap();

    let restored = store.load(tree.path()).unwrap().unwrap();
    assert_eq!(restored, session);
}

#[test]
fn test_e2e_session_with_deleted_last_path_falls_back_home() {
    let tree = project_tree();
    let config = TreeBuilder::new().build();
    let store = SessionStore::new(config.path().join("session.json"));

    let mut session = Session::new(tree.path());
    session.last_path = tree.path().join("docs");
    store.save(&session).unwrap();
    fs::remove_dir_all(tree.path().join("docs")).unwrap();

    let restored = store.load(tree.path()).unwrap().unwrap();
    assert_eq!(restored.last_path, tree.path());
}
