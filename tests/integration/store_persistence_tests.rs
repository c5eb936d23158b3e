/*!
 * Integration tests for snapshot persistence
 */

use anyhow::Result;
use std::sync::Arc;

use songlingo::database::schema::SEED_LANGUAGES;
use songlingo::database::{
    DEFAULT_SNAPSHOT_KEY, FileSlot, LearningStore, MemorySlot, SnapshotSlot, StoreOptions,
};
use songlingo::errors::StoreError;

use crate::common;

/// Test that a fresh store is seeded and saved before initialize returns
#[test]
fn test_initialize_withEmptySlot_shouldSeedAndSave() -> Result<()> {
    let slot = MemorySlot::new();
    let store = common::memory_store(&slot)?;

    assert_eq!(store.list_languages()?.len(), SEED_LANGUAGES.len());
    assert!(slot.get(DEFAULT_SNAPSHOT_KEY).is_some());
    Ok(())
}

/// Test that everything written through one store is visible in the next
#[test]
fn test_reopen_withFileSlot_shouldRestoreAllData() -> Result<()> {
    let dir = common::create_temp_dir()?;

    let (song_id, language_id) = {
        let store = common::file_store(&dir)?;
        let language = store.language_by_code("es")?.expect("es is seeded");
        let song_id = store.add_song("Canción", "Artista", language.id, "hola\namor")?;
        store.upsert_vocabulary("amor", "love", language.id, Some(song_id))?;
        store.upsert_vocabulary("amor", "", language.id, Some(song_id))?;
        store.upsert_progress(song_id, 1, true)?;
        store.close()?;
        (song_id, language.id)
    };

    assert!(FileSlot::new(dir.path()).path_for(DEFAULT_SNAPSHOT_KEY).exists());

    let store = common::file_store(&dir)?;
    let song = store.get_song(song_id)?.expect("song survives reopen");
    assert_eq!(song.title, "Canción");

    let vocabulary = store.vocabulary_by_language(language_id)?;
    assert_eq!(vocabulary.len(), 1);
    assert_eq!(vocabulary[0].frequency_count, 2);
    assert_eq!(vocabulary[0].translation, "love");
    assert_eq!(vocabulary[0].first_song_id, Some(song_id));

    let progress = store.progress_for_song(song_id)?.expect("progress survives reopen");
    assert_eq!(progress.current_line, 1);
    assert!(progress.completed);
    Ok(())
}

/// Test that each command is durable without an explicit close
#[test]
fn test_command_withoutClose_shouldAlreadyBeSaved() -> Result<()> {
    let slot = MemorySlot::new();
    let song_id = {
        let store = common::memory_store(&slot)?;
        let language = store.language_by_code("ko")?.expect("ko is seeded");
        store.add_song("Song", "Artist", language.id, "사랑해")?
    };

    let store = common::memory_store(&slot)?;
    assert!(store.get_song(song_id)?.is_some());
    Ok(())
}

/// Test that a failed save leaves no observable effect
#[test]
fn test_command_withFailingSave_shouldRevert() -> Result<()> {
    let slot = MemorySlot::new();
    let store = common::memory_store(&slot)?;
    let language = store.language_by_code("fr")?.expect("fr is seeded");
    let before = slot.get(DEFAULT_SNAPSHOT_KEY);

    slot.set_fail_saves(true);
    let result = store.add_song("Chanson", "Artiste", language.id, "bonjour");
    assert!(matches!(result, Err(StoreError::Snapshot(_))));

    assert!(store.songs_by_language(language.id)?.is_empty());
    assert_eq!(slot.get(DEFAULT_SNAPSHOT_KEY), before);

    slot.set_fail_saves(false);
    store.add_song("Chanson", "Artiste", language.id, "bonjour")?;
    assert_eq!(store.songs_by_language(language.id)?.len(), 1);
    Ok(())
}

/// Test that an unreadable snapshot fails initialization
#[test]
fn test_initialize_withCorruptSnapshot_shouldBeFatal() {
    let slot = MemorySlot::new();
    slot.insert(DEFAULT_SNAPSHOT_KEY, b"definitely not a database".to_vec());

    let store = LearningStore::new(Arc::new(slot), StoreOptions::default());
    let error = store.initialize().unwrap_err();

    assert!(error.is_fatal());
    assert!(!store.is_initialized());
}

/// Test that operations before initialize and after close are rejected
#[test]
fn test_operations_outsideLifecycle_shouldReportNotInitialized() -> Result<()> {
    let store = LearningStore::new(Arc::new(MemorySlot::new()), StoreOptions::default());
    assert!(matches!(store.list_languages(), Err(StoreError::NotInitialized)));
    assert!(matches!(store.add_song("t", "a", 1, "l"), Err(StoreError::NotInitialized)));

    store.initialize()?;
    store.initialize()?;
    assert!(store.is_initialized());

    store.close()?;
    assert!(matches!(store.stats(), Err(StoreError::NotInitialized)));
    Ok(())
}

/// Test a custom snapshot key
#[test]
fn test_customSnapshotKey_shouldSaveUnderThatKey() -> Result<()> {
    let slot = MemorySlot::new();
    let options = StoreOptions {
        snapshot_key: "otherDB".to_string(),
        seed_sample_songs: false,
    };
    let _store = LearningStore::open(Arc::new(slot.clone()), options)?;

    assert!(slot.load("otherDB")?.is_some());
    assert!(slot.load(DEFAULT_SNAPSHOT_KEY)?.is_none());
    Ok(())
}
