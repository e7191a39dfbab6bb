//! Tests for typed preferences over real and in-memory stores.

use tempfile::NamedTempFile;

use starmoon::{
    KeyValueStore, MemoryStore, PreferenceRepository, SavedSession, SessionStore, keys,
};
use starmoon_tictactoe::{Player, Statistics, Symbol};

fn open(db: &NamedTempFile) -> SessionStore {
    let path = db.path().to_str().expect("Invalid path").to_string();
    SessionStore::new(PreferenceRepository::open(path).expect("Failed to open repository"))
}

#[test]
fn test_fresh_database_loads_defaults() {
    let db = NamedTempFile::new().expect("Failed to create temp file");
    assert_eq!(open(&db).load(), SavedSession::default());
}

#[test]
fn test_preferences_persist_across_instances() {
    let db = NamedTempFile::new().expect("Failed to create temp file");
    let ghost = Symbol::parse("👻").expect("palette glyph");
    {
        let store = open(&db);
        store.set_player_name(Player::X, "Ann");
        store.set_player_name(Player::O, "Bea");
        store.set_player_symbol(Player::O, ghost);
        store.set_sound_enabled(false);
        store.set_statistics(&Statistics::new(3, 1, 2));
    }

    let session = open(&db).load();
    assert_eq!(session.player_x().name(), "Ann");
    assert_eq!(session.player_o().name(), "Bea");
    assert_eq!(*session.player_x().symbol(), Symbol::default_for(Player::X));
    assert_eq!(*session.player_o().symbol(), ghost);
    assert!(!*session.sound_enabled());
    assert_eq!(*session.statistics(), Statistics::new(3, 1, 2));
}

#[test]
fn test_symbols_stored_as_glyph_text() {
    let db = NamedTempFile::new().expect("Failed to create temp file");
    open(&db).set_player_symbol(Player::X, Symbol::parse("🦊").expect("palette glyph"));

    let path = db.path().to_str().expect("Invalid path").to_string();
    let raw = PreferenceRepository::open(path)
        .expect("Failed to open repository")
        .get(keys::PLAYER_X_SYMBOL)
        .expect("Query failed");
    assert_eq!(raw.as_deref(), Some("🦊"));
}

#[test]
fn test_malformed_statistics_overwritten_by_next_write() {
    let raw = MemoryStore::new();
    raw.set(keys::STATISTICS, r#"{"x_wins":-4}"#).expect("Write failed");
    let store = SessionStore::new(raw);

    let mut stats = store.statistics();
    assert_eq!(stats, Statistics::default());

    stats.record(&starmoon_tictactoe::Outcome::Draw);
    store.set_statistics(&stats);
    assert_eq!(store.statistics(), Statistics::new(0, 0, 1));
}

#[test]
fn test_blank_name_is_kept() {
    let store = SessionStore::new(MemoryStore::new());
    store.set_player_name(Player::O, "   ");
    assert_eq!(store.player_name(Player::O), "   ");
    assert!(!store.profile(Player::O).has_name());
}

#[test]
fn test_load_saved_leaves_missing_database_alone() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("never_played.db");

    let session = SessionStore::load_saved(&path).expect("Missing file is not an error");
    assert!(session.is_none());
    assert!(!path.exists(), "load_saved created {}", path.display());
}

#[test]
fn test_load_saved_reads_existing_database() {
    let db = NamedTempFile::new().expect("Failed to create temp file");
    open(&db).set_statistics(&Statistics::new(2, 0, 1));

    let session = SessionStore::load_saved(db.path())
        .expect("Failed to read database")
        .expect("Saved session missing");
    assert_eq!(*session.statistics(), Statistics::new(2, 0, 1));
}
