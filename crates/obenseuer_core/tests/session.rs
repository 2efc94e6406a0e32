use std::fs;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use obenseuer_core::core_api::{
    CategoryFilter, ConsoleCommand, CopyTarget, CoreErrorCode, DARK_MODE_KEY, FAVORITES_KEY,
    JsonFileStore, KeyValueStore, MemoryStore, RecordingClipboard, Session, SortKey, ViewAction,
};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn fixture_path() -> PathBuf {
    workspace_root().join("tests/fixtures/items.json")
}

fn temp_prefs_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}_{}_{}.json", std::process::id(), nanos))
}

fn loaded_session() -> Session<MemoryStore> {
    let mut session = Session::new(MemoryStore::new());
    session
        .load_catalog_file(&fixture_path())
        .expect("fixture catalog should load");
    session
}

#[test]
fn new_session_is_empty_with_default_preferences() {
    let session = Session::new(MemoryStore::new());
    assert!(session.catalog().is_empty());
    assert!(session.preferences().dark_mode);
    assert!(session.preferences().favorite_ids.is_empty());
    assert!(session.view().items.is_empty());
}

#[test]
fn loading_catalog_resets_selected_category() {
    let mut session = loaded_session();
    session.dispatch(ViewAction::SelectCategory(CategoryFilter::Named(
        "Food".into(),
    )));
    session.dispatch(ViewAction::SetSearch("m".into()));
    assert_eq!(session.view().items.len(), 1);

    let loaded = session
        .load_catalog_text(r#"[{"ID": 99, "Title": "Mop", "Value": 1}]"#)
        .expect("replacement catalog should load");
    assert_eq!(loaded, 1);
    assert_eq!(session.view_state().selected_category, CategoryFilter::All);
    assert_eq!(session.view_state().search_term, "m");
    assert_eq!(session.view().items[0].id, 99);
}

#[test]
fn parse_error_leaves_catalog_and_view_untouched() {
    let mut session = loaded_session();
    session.dispatch(ViewAction::SelectCategory(CategoryFilter::Named(
        "Drink".into(),
    )));
    session.dispatch(ViewAction::SetSortKey(SortKey::Title));
    let catalog_before = session.catalog().clone();
    let view_before = session.view_state().clone();

    let err = session
        .load_catalog_text("[{\"ID\": oops}]")
        .expect_err("malformed catalog should be rejected");
    assert_eq!(err.code, CoreErrorCode::Parse);
    assert_eq!(session.catalog(), &catalog_before);
    assert_eq!(session.view_state(), &view_before);
}

#[test]
fn missing_catalog_file_is_io_error() {
    let mut session = Session::new(MemoryStore::new());
    let err = session
        .load_catalog_file(&workspace_root().join("tests/fixtures/missing.json"))
        .expect_err("missing file should fail");
    assert_eq!(err.code, CoreErrorCode::Io);
    assert!(session.catalog().is_empty());
}

#[test]
fn favorites_toggle_and_persist() {
    let mut session = loaded_session();
    assert!(session.toggle_favorite(7).expect("memory store writes"));
    assert!(session.toggle_favorite(12).expect("memory store writes"));
    let favorites: Vec<i64> = session.favorite_items().iter().map(|i| i.id).collect();
    assert_eq!(favorites, vec![12, 7]);

    assert!(!session.toggle_favorite(7).expect("memory store writes"));
    let store = session.into_store();
    assert_eq!(
        store.get(FAVORITES_KEY).expect("readable"),
        Some("[12]".to_string())
    );
}

#[test]
fn dark_mode_toggle_persists() {
    let mut session = Session::new(MemoryStore::new());
    assert!(!session.toggle_dark_mode().expect("memory store writes"));
    assert!(!session.preferences().dark_mode);
    assert_eq!(
        session
            .preference_store()
            .store()
            .get(DARK_MODE_KEY)
            .expect("readable"),
        Some("false".to_string())
    );
}

#[test]
fn item_command_uses_entered_amount() {
    let mut session = loaded_session();
    assert_eq!(session.item_command(3).to_string(), "add_item 3 1");
    session.dispatch(ViewAction::SetAmount { id: 3, amount: 50 });
    assert_eq!(session.item_command(3).to_string(), "add_item 3 50");
    assert_eq!(session.item_command(12).to_string(), "add_item 12 1");
}

#[test]
fn stat_command_uses_console_panel_state() {
    let mut session = Session::new(MemoryStore::new());
    assert_eq!(
        session.stat_command().expect("default stat").to_string(),
        "player_stats health set 100"
    );

    session.dispatch(ViewAction::SelectStat("mushroom_need".into()));
    session.dispatch(ViewAction::SetStatValue(0));
    assert_eq!(
        session.stat_command().expect("known stat").to_string(),
        "player_stats mushroom_need set 0"
    );

    session.dispatch(ViewAction::SelectStat("stamina".into()));
    let err = session.stat_command().expect_err("unknown stat");
    assert_eq!(err.code, CoreErrorCode::UnknownStat);
}

#[test]
fn copy_marks_target_only_on_success() {
    let mut session = loaded_session();
    let now = Instant::now();
    let command = session.item_command(3);

    let mut primary = RecordingClipboard::new();
    let mut fallback = RecordingClipboard::new();
    let text = session
        .copy_command(&command, CopyTarget::Item(3), &mut primary, &mut fallback, now)
        .expect("copy should succeed");
    assert_eq!(text, "add_item 3 1");
    assert_eq!(primary.last(), Some("add_item 3 1"));
    assert!(session.view_state().is_copied(CopyTarget::Item(3), now));

    let mut broken = RecordingClipboard::unavailable();
    let mut also_broken = RecordingClipboard::unavailable();
    let later = now + std::time::Duration::from_secs(5);
    let err = session
        .copy_command(
            &ConsoleCommand::GodMode,
            CopyTarget::ConsolePanel,
            &mut broken,
            &mut also_broken,
            later,
        )
        .expect_err("no clipboard available");
    assert_eq!(err.code, CoreErrorCode::ClipboardWrite);
    assert!(!session.view_state().is_copied(CopyTarget::ConsolePanel, later));
}

#[test]
fn json_file_store_survives_reopen() {
    let path = temp_prefs_path("obenseuer_prefs");
    {
        let store = JsonFileStore::open(&path);
        let mut session = Session::new(store);
        session.toggle_favorite(20).expect("file store writes");
        session.set_dark_mode(false).expect("file store writes");
    }

    let reopened = Session::new(JsonFileStore::open(&path));
    assert!(!reopened.preferences().dark_mode);
    assert_eq!(reopened.preferences().favorite_ids.as_slice(), &[20]);

    let _ = fs::remove_file(path);
}

#[test]
fn corrupt_preference_file_falls_back_to_defaults() {
    let path = temp_prefs_path("obenseuer_prefs_corrupt");
    fs::write(&path, "{ this is not json").expect("write corrupt file");

    let session = Session::new(JsonFileStore::open(&path));
    assert!(session.preferences().dark_mode);
    assert!(session.preferences().favorite_ids.is_empty());

    let _ = fs::remove_file(path);
}

#[test]
fn unreadable_preference_path_falls_back_and_reports_writes() {
    let dir = temp_prefs_path("obenseuer_prefs_dir");
    fs::create_dir_all(&dir).expect("create directory in place of the file");

    let mut session = Session::new(JsonFileStore::open(&dir));
    assert!(session.preferences().dark_mode);
    assert!(session.preferences().favorite_ids.is_empty());

    let err = session
        .set_dark_mode(false)
        .expect_err("a directory cannot be written as a file");
    assert_eq!(err.code, CoreErrorCode::Storage);

    let _ = fs::remove_dir_all(dir);
}
