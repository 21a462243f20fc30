use std::fs;
use userstore_core::{JsonFileStorage, StorageError, StoreError, User, UserStorage, UserStore};

fn sample_users() -> Vec<User> {
    let mut inactive = User::new(4, "Cường", "cuong@example.com", 28).unwrap();
    inactive.is_active = false;
    vec![
        User::new(1, "Nguyễn Văn An", "an@example.com", 25).unwrap(),
        User::new(2, "Lee, \"Bo\"", "bo@example.com", 0).unwrap(),
        inactive,
    ]
}

#[test]
fn load_missing_file_returns_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path().join("absent.json"));

    assert!(storage.load().unwrap().is_empty());
    assert!(!storage.path().exists());
}

#[test]
fn load_zero_length_file_returns_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    fs::write(&path, "").unwrap();

    assert!(JsonFileStorage::new(&path).load().unwrap().is_empty());
}

#[test]
fn save_then_load_roundtrips_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path().join("users.json"));
    let users = sample_users();

    storage.save(&users).unwrap();
    assert_eq!(storage.load().unwrap(), users);
}

#[test]
fn save_then_load_roundtrips_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path().join("users.json"));
    storage.save(&sample_users()).unwrap();

    storage.save(&[]).unwrap();
    assert!(storage.load().unwrap().is_empty());
}

#[test]
fn save_leaves_no_temp_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path().join("users.json"));
    storage.save(&sample_users()).unwrap();
    storage.save(&sample_users()[..1]).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn load_malformed_json_is_corrupt_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    fs::write(&path, "{ not json").unwrap();

    let err = JsonFileStorage::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::CorruptData { .. }));
}

#[test]
fn load_wrong_shape_is_corrupt_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    fs::write(&path, r#"[{"id": "one", "name": "Ann"}]"#).unwrap();

    let err = JsonFileStorage::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::CorruptData { .. }));
}

#[test]
fn save_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path().join("nope").join("users.json"));

    let err = storage.save(&sample_users()).unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
}

#[test]
fn save_over_directory_is_io_error_and_leaves_it_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("users.json");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep.txt"), "keep").unwrap();

    let err = JsonFileStorage::new(&target).save(&sample_users()).unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
    assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "keep");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn store_open_rejects_duplicate_emails_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    let users = vec![
        User::new(1, "Ann", "same@x.com", 20).unwrap(),
        User::new(2, "Bo", "same@x.com", 30).unwrap(),
    ];
    fs::write(&path, serde_json::to_string(&users).unwrap()).unwrap();

    let result = UserStore::open(JsonFileStorage::new(&path));
    assert!(matches!(result, Err(StoreError::CorruptData(_))));
}

#[test]
fn store_open_reports_malformed_file_as_corrupt_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let result = UserStore::open(JsonFileStorage::new(&path));
    assert!(matches!(result, Err(StoreError::CorruptData(_))));
}
