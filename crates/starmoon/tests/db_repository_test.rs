//! Tests for the SQLite preference repository.

use tempfile::NamedTempFile;

use starmoon::{DbErrorKind, KeyValueStore, PreferenceRepository};

/// Creates a temporary database file and a migrated repository; the file
/// handle must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, PreferenceRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = PreferenceRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}

#[test]
fn test_missing_key_is_none() {
    let (_db, repo) = setup_test_db();
    assert!(repo.find("player_x_name").expect("Query failed").is_none());
    assert_eq!(repo.get("player_x_name").expect("Query failed"), None);
}

#[test]
fn test_upsert_inserts_then_replaces() {
    let (_db, repo) = setup_test_db();
    repo.upsert("player_x_name", "Ann").expect("Insert failed");
    repo.upsert("player_x_name", "Bea").expect("Update failed");

    let row = repo
        .find("player_x_name")
        .expect("Query failed")
        .expect("Row missing");
    assert_eq!(row.value(), "Bea");
    assert_eq!(repo.list().expect("List failed").len(), 1);
}

#[test]
fn test_list_ordered_by_key() {
    let (_db, repo) = setup_test_db();
    repo.set("sound_enabled", "false").expect("Write failed");
    repo.set("player_o_name", "Oli").expect("Write failed");
    repo.set("player_x_name", "Xia").expect("Write failed");

    let keys: Vec<String> = repo
        .list()
        .expect("List failed")
        .iter()
        .map(|row| row.key().clone())
        .collect();
    assert_eq!(keys, ["player_o_name", "player_x_name", "sound_enabled"]);
}

#[test]
fn test_values_survive_a_new_repository() {
    let (db, repo) = setup_test_db();
    repo.set("statistics", r#"{"x_wins":1,"o_wins":0,"draws":2}"#)
        .expect("Write failed");
    drop(repo);

    let path = db.path().to_str().expect("Invalid path").to_string();
    let reopened = PreferenceRepository::open(path).expect("Reopen failed");
    assert_eq!(
        reopened.get("statistics").expect("Query failed").as_deref(),
        Some(r#"{"x_wins":1,"o_wins":0,"draws":2}"#)
    );
}

#[test]
fn test_reopen_does_not_rerun_migrations() {
    let (db, repo) = setup_test_db();
    repo.set("player_o_name", "Oli").expect("Write failed");

    let path = db.path().to_str().expect("Invalid path").to_string();
    PreferenceRepository::open(path.clone()).expect("Second open failed");
    PreferenceRepository::open(path).expect("Third open failed");
    assert_eq!(repo.list().expect("List failed").len(), 1);
}

#[test]
fn test_unopenable_path_is_an_error() {
    let err = PreferenceRepository::open("/definitely/not/here/starmoon.db".to_string())
        .expect_err("Opened a path in a missing directory");
    assert_eq!(err.kind, DbErrorKind::Open);
    assert!(err.message.contains("/definitely/not/here/starmoon.db"), "{}", err);
}
