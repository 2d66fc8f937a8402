//! On-disk behaviour of the local store

use serde::{Deserialize, Serialize};
use tempfile::tempdir;
use ugc_store::{AutoSaver, KeyValueStore, LocalStore, SaveOutcome, AUTOSAVE_KEY};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Draft {
    tone: String,
    step: u8,
}

#[test]
fn test_values_survive_reopen() {
    let dir = tempdir().unwrap();
    {
        let mut store = LocalStore::open(dir.path()).unwrap();
        store.set_item("theme", "sunset").unwrap();
    }
    let store = LocalStore::open(dir.path()).unwrap();
    assert_eq!(store.get_item("theme").as_deref(), Some("sunset"));
}

#[test]
fn test_corrupted_file_opens_empty() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("local_storage.json"), "[[[").unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    assert_eq!(store.used_bytes(), 0);
}

#[test]
fn test_quota_failure_keeps_previous_value_on_disk() {
    let dir = tempdir().unwrap();
    let mut store = LocalStore::open_with_quota(dir.path(), 64).unwrap();
    store.set_item("k", "small").unwrap();
    assert!(store.set_item("k", &"y".repeat(100)).is_err());

    let reopened = LocalStore::open(dir.path()).unwrap();
    assert_eq!(reopened.get_item("k").as_deref(), Some("small"));
}

#[test]
fn test_autosaver_round_trip_through_disk() {
    let dir = tempdir().unwrap();
    let draft = Draft {
        tone: "casual".to_string(),
        step: 2,
    };
    {
        let mut store = LocalStore::open(dir.path()).unwrap();
        let mut saver = AutoSaver::new(AUTOSAVE_KEY);
        assert_eq!(saver.save(&mut store, &draft).unwrap(), SaveOutcome::Saved);
    }

    let store = LocalStore::open(dir.path()).unwrap();
    let mut saver = AutoSaver::new(AUTOSAVE_KEY);
    let restored: Draft = saver.restore(&store).unwrap();
    assert_eq!(restored, draft);
}

#[test]
fn test_restore_primes_fingerprint() {
    let dir = tempdir().unwrap();
    let draft = Draft {
        tone: "excited".to_string(),
        step: 0,
    };
    let mut store = LocalStore::open(dir.path()).unwrap();
    AutoSaver::new(AUTOSAVE_KEY).save(&mut store, &draft).unwrap();

    let mut saver = AutoSaver::new(AUTOSAVE_KEY);
    let restored: Draft = saver.restore(&store).unwrap();
    assert_eq!(
        saver.save(&mut store, &restored).unwrap(),
        SaveOutcome::Unchanged
    );
}

#[test]
fn test_clear_removes_key() {
    let dir = tempdir().unwrap();
    let mut store = LocalStore::open(dir.path()).unwrap();
    let mut saver = AutoSaver::new(AUTOSAVE_KEY);
    saver.save(&mut store, &"draft").unwrap();
    saver.clear(&mut store).unwrap();
    assert!(!store.contains_key(AUTOSAVE_KEY));
}

#[test]
fn test_successful_write_leaves_no_temp_file() {
    let dir = tempdir().unwrap();
    let mut store = LocalStore::open(dir.path()).unwrap();
    store.set_item("theme", "ocean").unwrap();
    assert!(store.path().exists());
    assert!(!dir.path().join("local_storage.json.tmp").exists());
}

#[cfg(unix)]
#[test]
fn test_write_error_on_full_disk_is_reported() {
    let full = std::path::Path::new("/dev/full");
    if !full.exists() {
        return;
    }
    let dir = tempdir().unwrap();
    let mut store = LocalStore::open(dir.path()).unwrap();
    store.set_item("theme", "sunset").unwrap();

    std::os::unix::fs::symlink(full, dir.path().join("local_storage.json.tmp")).unwrap();

    let mut saver = AutoSaver::new(AUTOSAVE_KEY);
    let draft = Draft {
        tone: "excited".to_string(),
        step: 1,
    };
    assert!(store.set_item(AUTOSAVE_KEY, "{\"a\":1}").is_err());
    assert!(saver.save(&mut store, &draft).is_err());
    // Fingerprint not recorded, so the next attempt writes again
    assert!(saver.save(&mut store, &draft).is_err());
    assert!(!store.contains_key(AUTOSAVE_KEY));

    let reopened = LocalStore::open(dir.path()).unwrap();
    assert_eq!(reopened.get_item("theme").as_deref(), Some("sunset"));
    assert!(!reopened.contains_key(AUTOSAVE_KEY));
}

#[test]
fn test_failed_remove_keeps_value() {
    let dir = tempdir().unwrap();
    let mut store = LocalStore::open(dir.path()).unwrap();
    store.set_item(AUTOSAVE_KEY, "{\"step\":2}").unwrap();

    // A directory where the temp file goes makes every write fail
    std::fs::create_dir(dir.path().join("local_storage.json.tmp")).unwrap();

    assert!(store.remove_item(AUTOSAVE_KEY).is_err());
    assert_eq!(store.get_item(AUTOSAVE_KEY).as_deref(), Some("{\"step\":2}"));

    let reopened = LocalStore::open(dir.path()).unwrap();
    assert!(reopened.contains_key(AUTOSAVE_KEY));
}
