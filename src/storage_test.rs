use super::*;

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert!(storage.is_empty());

    storage.set(TOKEN_KEY, "abc123").unwrap();
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc123"));
    assert_eq!(storage.len(), 1);

    storage.remove(TOKEN_KEY).unwrap();
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn memory_storage_remove_missing_key_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.remove("nope").is_ok());
}

#[test]
fn evict_session_removes_both_keys_only() {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, "t").unwrap();
    storage.set(USER_KEY, "{}").unwrap();
    storage.set("theme", "dark").unwrap();

    evict_session(&storage);

    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(USER_KEY).unwrap(), None);
    assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
}

// =============================================================
// FileStorage
// =============================================================

#[test]
fn file_storage_missing_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("session.json"));
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn file_storage_survives_new_handle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    FileStorage::new(&path).set(TOKEN_KEY, "abc123").unwrap();

    let reopened = FileStorage::new(&path);
    assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("abc123"));
}

#[test]
fn file_storage_remove_persists() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("session.json"));
    storage.set(TOKEN_KEY, "abc123").unwrap();
    storage.set(USER_KEY, r#"{"username":"alice"}"#).unwrap();

    storage.remove(TOKEN_KEY).unwrap();

    let reopened = FileStorage::new(storage.path());
    assert_eq!(reopened.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(reopened.get(USER_KEY).unwrap().as_deref(), Some(r#"{"username":"alice"}"#));
}

#[test]
fn file_storage_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let storage = FileStorage::new(&path);
    assert!(matches!(storage.get(TOKEN_KEY), Err(StorageError::Corrupt(_))));
}
