//! Tests for the progress store and answer validation.

use shellfolio_core::achievements::{FIRST_BLOOD, HALFWAY, KONAMI_WARRIOR, MASTER_HACKER};
use shellfolio_core::{
    Catalog, Challenge, Difficulty, FileStorage, MemoryStorage, Progress, ProgressStore, Storage,
    StorageError, LEGACY_UNLOCK_KEY, PROGRESS_KEY,
};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Storage whose every call fails, like a browser with storage disabled.
struct BrokenStorage;

impl Storage for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }
}

/// Storage that keeps serving reads after writes start failing.
struct QuotaStorage {
    inner: MemoryStorage,
    full: Rc<Cell<bool>>,
}

impl Storage for QuotaStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.full.get() {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

fn memory_store() -> ProgressStore {
    ProgressStore::new(Box::new(MemoryStorage::new()), &Catalog::builtin())
}

#[test]
fn test_base64_scenario() {
    let catalog = Catalog::builtin();
    assert!(catalog.validate("base64-decode", "khalid builds bridges..."));

    let mut store = memory_store();
    let progress = store.mark_solved("base64-decode");
    let solved: Vec<_> = progress.solved_challenges.iter().cloned().collect();
    assert_eq!(solved, vec!["base64-decode".to_string()]);
    assert!(progress.has_achievement(FIRST_BLOOD));
}

#[test]
fn test_validator_normalization() {
    let catalog = Catalog::new(vec![Challenge::new(
        "word",
        "Word",
        "",
        "answer",
        "",
        Difficulty::Easy,
    )]);
    assert_eq!(
        catalog.validate("word", "  AnSwEr  "),
        catalog.validate("word", "answer")
    );
    assert!(catalog.validate("word", "  AnSwEr  "));
}

#[test]
fn test_validator_unknown_id() {
    let catalog = Catalog::builtin();
    for answer in ["", "portfolio", "Khalid builds bridges..."] {
        assert!(!catalog.validate("nonexistent-id", answer));
    }
}

#[test]
fn test_idempotent_solve() {
    let mut store = memory_store();
    let once = store.mark_solved("rot13");
    let twice = store.mark_solved("rot13");
    assert_eq!(once.solved_challenges, twice.solved_challenges);
    assert_eq!(twice.solved_count(), 1);
}

#[test]
fn test_achievements_never_revoked() {
    let mut store = memory_store();
    let mut previous: BTreeSet<String> = BTreeSet::new();
    for id in ["morse-signal", "rot13", "hex-dump", "base64-decode", "binary-whisper"] {
        let progress = store.mark_solved(id);
        assert!(progress.achievements.is_superset(&previous));
        previous = progress.achievements;
    }
    // first_blood survives later solves
    assert!(previous.contains(FIRST_BLOOD));
}

#[test]
fn test_full_catalog_completion() {
    let catalog = Catalog::builtin();
    let mut store = memory_store();
    let mut ids: Vec<_> = catalog.ids().map(str::to_string).collect();
    ids.reverse();
    let mut last = Progress::default();
    for id in &ids {
        last = store.mark_solved(id);
    }
    assert_eq!(last.solved_count(), catalog.len());
    assert!(last.has_achievement(MASTER_HACKER));
    assert!(last.has_achievement(HALFWAY));
}

#[test]
fn test_halfway_threshold_rounds_up() {
    let mut store = memory_store();
    store.mark_solved("rot13");
    let two = store.mark_solved("hex-dump");
    assert!(!two.has_achievement(HALFWAY));
    let three = store.mark_solved("base64-decode");
    assert!(three.has_achievement(HALFWAY));
}

#[test]
fn test_corrupt_record_reads_empty() {
    let storage = MemoryStorage::new().with_entry(PROGRESS_KEY, "{not json");
    let store = ProgressStore::new(Box::new(storage), &Catalog::builtin());
    assert_eq!(store.load(), Progress::default());
}

#[test]
fn test_legacy_flag_seeds_konami() {
    let storage = MemoryStorage::new().with_entry(LEGACY_UNLOCK_KEY, "true");
    let store = ProgressStore::new(Box::new(storage), &Catalog::builtin());
    let progress = store.load();
    assert!(progress.konami_unlocked);
    assert!(progress.solved_challenges.is_empty());
}

#[test]
fn test_structured_record_wins_over_legacy_flag() {
    let storage = MemoryStorage::new()
        .with_entry(LEGACY_UNLOCK_KEY, "true")
        .with_entry(PROGRESS_KEY, r#"{"solvedChallenges":["rot13"]}"#);
    let store = ProgressStore::new(Box::new(storage), &Catalog::builtin());
    let progress = store.load();
    assert!(!progress.konami_unlocked);
    assert!(progress.is_solved("rot13"));
}

#[test]
fn test_broken_storage_keeps_session_state() {
    let mut store = ProgressStore::new(Box::new(BrokenStorage), &Catalog::builtin());
    assert_eq!(store.load(), Progress::default());

    store.mark_solved("rot13");
    let progress = store.mark_solved("hex-dump");
    assert_eq!(progress.solved_count(), 2);
    assert_eq!(store.current().solved_count(), 2);

    // reset must not panic either
    store.reset();
    assert_eq!(store.current(), &Progress::default());
}

#[test]
fn test_failed_writes_keep_newer_session_state() {
    let full = Rc::new(Cell::new(false));
    let storage = QuotaStorage {
        inner: MemoryStorage::new(),
        full: Rc::clone(&full),
    };
    let mut store = ProgressStore::new(Box::new(storage), &Catalog::builtin());
    store.mark_solved("rot13");

    full.set(true);
    let progress = store.unlock_konami();
    assert!(progress.konami_unlocked);
    assert!(progress.has_achievement(KONAMI_WARRIOR));

    let progress = store.mark_solved("hex-dump");
    assert!(progress.konami_unlocked);
    assert!(progress.has_achievement(KONAMI_WARRIOR));
    assert!(progress.is_solved("rot13"));
    assert!(progress.is_solved("hex-dump"));

    let progress = store.mark_solved("base64-decode");
    assert_eq!(progress.solved_count(), 3);
    assert!(progress.has_achievement(HALFWAY));
    assert_eq!(store.current(), &progress);
}

#[test]
fn test_record_written_elsewhere_is_merged() {
    let catalog = Catalog::builtin();
    let other = Progress {
        solved_challenges: ["hex-dump".to_string()].into_iter().collect(),
        ..Progress::default()
    };
    let mut storage = MemoryStorage::new();
    storage
        .set(PROGRESS_KEY, &serde_json::to_string(&other).unwrap())
        .unwrap();
    let mut elsewhere = ProgressStore::new(Box::new(storage), &catalog);
    elsewhere.mark_solved("rot13");
    let merged = elsewhere.mark_solved("morse-signal");
    assert_eq!(merged.solved_count(), 3);
    assert!(merged.is_solved("hex-dump"));
}

#[test]
fn test_konami_achievement_via_recompute() {
    let mut store = memory_store();
    store.mark_solved("rot13");
    let progress = store.unlock_konami();
    assert!(progress.has_achievement(KONAMI_WARRIOR));
    assert!(progress.has_achievement(FIRST_BLOOD));

    let again = store.recompute_achievements();
    assert_eq!(again.achievements, progress.achievements);
}

#[test]
fn test_reset_returns_to_first_run() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::builtin();
    {
        let mut store = ProgressStore::new(Box::new(FileStorage::new(dir.path())), &catalog);
        store.mark_solved("rot13");
        store.unlock_konami();
    }

    let mut store = ProgressStore::new(Box::new(FileStorage::new(dir.path())), &catalog);
    assert!(store.load().is_solved("rot13"));
    assert!(store.load().konami_unlocked);

    store.reset();
    let fresh = ProgressStore::new(Box::new(FileStorage::new(dir.path())), &catalog);
    assert_eq!(fresh.load(), Progress::default());
}
