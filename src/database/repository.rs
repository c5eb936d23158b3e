/*!
 * Repository layer for the learning-data store.
 *
 * `LearningStore` is the explicit store handle: constructed once at startup,
 * initialized once, and shared by reference with every component that reads
 * or writes learning data. Every command commits its transaction and saves a
 * full snapshot before returning. If the save fails the in-memory database is
 * rolled back to the last saved snapshot, so an unsaved effect is never
 * observable.
 */

use chrono::SecondsFormat;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Arc;

use super::connection::DatabaseConnection;
use super::models::{
    LanguageRecord, LearningSessionRecord, ProgressRecord, SongRecord, StoreStats,
    VocabularyRecord, VocabularyUpsert,
};
use super::schema;
use super::snapshot::SnapshotSlot;
use crate::errors::StoreError;

/// Well-known key under which the snapshot is saved
pub const DEFAULT_SNAPSHOT_KEY: &str = "languageSongsDB";

/// Store settings that do not change after construction
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Key of the snapshot blob inside the slot
    pub snapshot_key: String,
    /// Insert the sample songs when creating a fresh database
    pub seed_sample_songs: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            seed_sample_songs: false,
        }
    }
}

/// Live database plus the bytes of the last durable save
struct StoreState {
    db: DatabaseConnection,
    last_saved: Vec<u8>,
}

/// Handle to the persistent learning-data store
pub struct LearningStore {
    slot: Arc<dyn SnapshotSlot>,
    options: StoreOptions,
    state: Mutex<Option<StoreState>>,
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl LearningStore {
    /// Create an uninitialized store over a snapshot slot
    pub fn new(slot: Arc<dyn SnapshotSlot>, options: StoreOptions) -> Self {
        Self {
            slot,
            options,
            state: Mutex::new(None),
        }
    }

    /// Create and initialize a store in one step
    pub fn open(slot: Arc<dyn SnapshotSlot>, options: StoreOptions) -> Result<Self, StoreError> {
        let store = Self::new(slot, options);
        store.initialize()?;
        Ok(store)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Restore the saved snapshot, or create, seed and save a fresh database
    ///
    /// Calling this again after a successful initialization is a no-op.
    /// Failures are fatal: the slot is unreadable or the snapshot is corrupt.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let mut guard = self.state.lock();
        if guard.is_some() {
            return Ok(());
        }

        let key = &self.options.snapshot_key;
        let saved = self
            .slot
            .load(key)
            .map_err(|e| StoreError::Unavailable(format!("Failed to read snapshot '{}': {}", key, e)))?;

        let state = match saved {
            Some(bytes) => {
                let db = DatabaseConnection::restore(&bytes)?;
                StoreState {
                    db,
                    last_saved: bytes,
                }
            }
            None => {
                info!("No snapshot under '{}', creating a new database", key);
                let mut db = DatabaseConnection::open_fresh()?;
                let seed_samples = self.options.seed_sample_songs;
                db.transaction(|tx| {
                    let created_at = now();
                    schema::seed_languages(tx, &created_at)?;
                    if seed_samples {
                        schema::seed_sample_songs(tx, &created_at)?;
                    }
                    Ok(())
                })?;

                let bytes = db
                    .snapshot()
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
                self.slot.save(key, &bytes).map_err(|e| {
                    StoreError::Unavailable(format!("Failed to save initial snapshot: {}", e))
                })?;
                StoreState {
                    db,
                    last_saved: bytes,
                }
            }
        };

        *guard = Some(state);
        Ok(())
    }

    /// Whether `initialize()` has completed and `close()` has not been called
    pub fn is_initialized(&self) -> bool {
        self.state.lock().is_some()
    }

    /// Save a final snapshot and release the database
    ///
    /// Every later call reports [`StoreError::NotInitialized`] until the store
    /// is initialized again.
    pub fn close(&self) -> Result<(), StoreError> {
        let mut guard = self.state.lock();
        let Some(state) = guard.take() else {
            return Ok(());
        };

        let bytes = state.db.snapshot()?;
        if bytes != state.last_saved {
            self.save_snapshot(&bytes)?;
        }
        info!("Closed learning store");
        Ok(())
    }

    /// Serialize the current database into a snapshot blob
    pub fn snapshot(&self) -> Result<Vec<u8>, StoreError> {
        let guard = self.state.lock();
        let state = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        state.db.snapshot()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Insert a song and return its id
    pub fn add_song(
        &self,
        title: &str,
        artist: &str,
        language_id: i64,
        lyrics: &str,
    ) -> Result<i64, StoreError> {
        let song_id = self.apply(|conn| insert_song(conn, title, artist, language_id, lyrics))?;

        debug!("Added song {} '{}' by {}", song_id, title, artist);
        Ok(song_id)
    }

    /// Insert a song together with its vocabulary as one command
    ///
    /// Either the song and every upsert are saved, or nothing is. Returns the
    /// song id and how many words were new.
    pub fn add_song_with_vocabulary(
        &self,
        title: &str,
        artist: &str,
        language_id: i64,
        lyrics: &str,
        entries: &[VocabularyUpsert],
    ) -> Result<(i64, usize), StoreError> {
        let (song_id, new_words) = self.apply(|conn| {
            let song_id = insert_song(conn, title, artist, language_id, lyrics)?;
            let new_words = upsert_words(conn, entries, language_id, Some(song_id))?;
            Ok((song_id, new_words))
        })?;

        debug!(
            "Added song {} '{}' by {} with {} vocabulary entries",
            song_id,
            title,
            artist,
            entries.len()
        );
        Ok((song_id, new_words))
    }

    /// Count one observation of a word
    ///
    /// A new (word, language) pair is inserted with count 1, the given
    /// translation and the first-seen song. An existing pair only has its count
    /// incremented; its translation and first-seen song stay as they were.
    pub fn upsert_vocabulary(
        &self,
        word: &str,
        translation: &str,
        language_id: i64,
        song_id: Option<i64>,
    ) -> Result<VocabularyRecord, StoreError> {
        self.apply(|conn| {
            ensure_language(conn, language_id)?;
            if let Some(song_id) = song_id {
                ensure_song(conn, song_id)?;
            }
            upsert_word(conn, &VocabularyUpsert::once(word, translation), language_id, song_id)?;
            conn.query_row(
                "SELECT * FROM vocabulary WHERE word = ?1 AND language_id = ?2",
                params![word, language_id],
                VocabularyRecord::from_row,
            )
            .map_err(StoreError::from)
        })
    }

    /// Apply many upserts in one transaction with a single snapshot save
    ///
    /// Equivalent to calling [`LearningStore::upsert_vocabulary`] once per
    /// occurrence of every entry. Returns how many words were new.
    pub fn upsert_vocabulary_batch(
        &self,
        language_id: i64,
        song_id: Option<i64>,
        entries: &[VocabularyUpsert],
    ) -> Result<usize, StoreError> {
        if entries.is_empty() {
            return Ok(0);
        }

        self.apply(|conn| {
            ensure_language(conn, language_id)?;
            if let Some(song_id) = song_id {
                ensure_song(conn, song_id)?;
            }
            upsert_words(conn, entries, language_id, song_id)
        })
    }

    /// Back-fill the translation of an existing vocabulary entry
    ///
    /// Frequency is left untouched. Returns false when no entry has that id.
    pub fn set_vocabulary_translation(
        &self,
        vocabulary_id: i64,
        translation: &str,
    ) -> Result<bool, StoreError> {
        self.apply(|conn| {
            let updated = conn.execute(
                "UPDATE vocabulary SET translation = ?1 WHERE id = ?2",
                params![translation, vocabulary_id],
            )?;
            Ok(updated > 0)
        })
    }

    /// Record a reading position for a song
    ///
    /// The first call for a song creates its record with one session; every
    /// later call overwrites line and completion and adds one session.
    pub fn upsert_progress(
        &self,
        song_id: i64,
        current_line: i64,
        completed: bool,
    ) -> Result<ProgressRecord, StoreError> {
        self.apply(|conn| {
            ensure_song(conn, song_id)?;
            conn.execute(
                r#"
                INSERT INTO user_progress (song_id, current_line, completed, practice_sessions, last_accessed)
                VALUES (?1, ?2, ?3, 1, ?4)
                ON CONFLICT(song_id) DO UPDATE SET
                    current_line = excluded.current_line,
                    completed = excluded.completed,
                    practice_sessions = user_progress.practice_sessions + 1,
                    last_accessed = excluded.last_accessed
                "#,
                params![song_id, current_line, completed, now()],
            )?;
            conn.query_row(
                "SELECT * FROM user_progress WHERE song_id = ?1",
                [song_id],
                ProgressRecord::from_row,
            )
            .map_err(StoreError::from)
        })
    }

    /// Log a finished study session and return its id
    pub fn record_learning_session(
        &self,
        song_id: i64,
        vocabulary_learned: &[String],
        duration_minutes: i64,
    ) -> Result<i64, StoreError> {
        self.apply(|conn| {
            ensure_song(conn, song_id)?;
            conn.execute(
                r#"
                INSERT INTO learning_sessions (song_id, vocabulary_learned, session_date, duration_minutes)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![song_id, vocabulary_learned.join(","), now(), duration_minutes.max(0)],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All languages ordered by display name
    pub fn list_languages(&self) -> Result<Vec<LanguageRecord>, StoreError> {
        self.read(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM languages ORDER BY name")?;
            let rows = stmt.query_map([], LanguageRecord::from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    }

    /// A language by id
    pub fn language(&self, language_id: i64) -> Result<Option<LanguageRecord>, StoreError> {
        self.read(|conn| {
            Ok(conn
                .query_row(
                    "SELECT * FROM languages WHERE id = ?1",
                    [language_id],
                    LanguageRecord::from_row,
                )
                .optional()?)
        })
    }

    /// A language by its short code, case-insensitively
    pub fn language_by_code(&self, code: &str) -> Result<Option<LanguageRecord>, StoreError> {
        let code = code.trim().to_lowercase();
        self.read(|conn| {
            Ok(conn
                .query_row(
                    "SELECT * FROM languages WHERE code = ?1",
                    [&code],
                    LanguageRecord::from_row,
                )
                .optional()?)
        })
    }

    /// Songs of a language, newest first
    pub fn songs_by_language(&self, language_id: i64) -> Result<Vec<SongRecord>, StoreError> {
        self.read(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM songs WHERE language_id = ?1 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt.query_map([language_id], SongRecord::from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    }

    /// A song by id
    pub fn get_song(&self, song_id: i64) -> Result<Option<SongRecord>, StoreError> {
        self.read(|conn| {
            Ok(conn
                .query_row("SELECT * FROM songs WHERE id = ?1", [song_id], SongRecord::from_row)
                .optional()?)
        })
    }

    /// Vocabulary of a language, most frequent first, then alphabetically
    pub fn vocabulary_by_language(
        &self,
        language_id: i64,
    ) -> Result<Vec<VocabularyRecord>, StoreError> {
        self.read(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM vocabulary WHERE language_id = ?1 ORDER BY frequency_count DESC, word ASC",
            )?;
            let rows = stmt.query_map([language_id], VocabularyRecord::from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    }

    /// Progress record of a song, if any progress was recorded
    pub fn progress_for_song(&self, song_id: i64) -> Result<Option<ProgressRecord>, StoreError> {
        self.read(|conn| {
            Ok(conn
                .query_row(
                    "SELECT * FROM user_progress WHERE song_id = ?1",
                    [song_id],
                    ProgressRecord::from_row,
                )
                .optional()?)
        })
    }

    /// Study sessions of a song, newest first
    pub fn learning_sessions_for_song(
        &self,
        song_id: i64,
    ) -> Result<Vec<LearningSessionRecord>, StoreError> {
        self.read(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM learning_sessions WHERE song_id = ?1 ORDER BY session_date DESC, id DESC",
            )?;
            let rows = stmt.query_map([song_id], LearningSessionRecord::from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    }

    /// Row counts and the size of the last saved snapshot
    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        let guard = self.state.lock();
        let state = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        let conn = state.db.conn();

        let count = |table: &str| -> Result<i64, StoreError> {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?)
        };

        Ok(StoreStats {
            language_count: count("languages")?,
            song_count: count("songs")?,
            vocabulary_count: count("vocabulary")?,
            progress_count: count("user_progress")?,
            snapshot_bytes: state.last_saved.len(),
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn read<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let guard = self.state.lock();
        let state = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        f(state.db.conn())
    }

    /// Run a command transaction, then durably save the result
    fn apply<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<T, StoreError>,
    {
        let mut guard = self.state.lock();
        let state = guard.as_mut().ok_or(StoreError::NotInitialized)?;

        let result = state.db.transaction(f)?;

        let saved = state
            .db
            .snapshot()
            .and_then(|bytes| self.save_snapshot(&bytes).map(|_| bytes));

        match saved {
            Ok(bytes) => {
                state.last_saved = bytes;
                Ok(result)
            }
            Err(save_error) => {
                warn!("Reverting command after failed save: {}", save_error);
                match DatabaseConnection::restore(&state.last_saved) {
                    Ok(db) => state.db = db,
                    Err(restore_error) => {
                        error!(
                            "Could not revert to last snapshot ({}); store must be re-initialized",
                            restore_error
                        );
                        *guard = None;
                    }
                }
                Err(save_error)
            }
        }
    }

    fn save_snapshot(&self, bytes: &[u8]) -> Result<(), StoreError> {
        self.slot
            .save(&self.options.snapshot_key, bytes)
            .map_err(|e| {
                error!("Failed to save snapshot: {}", e);
                StoreError::Snapshot(e.to_string())
            })
    }
}

fn ensure_language(conn: &Connection, language_id: i64) -> Result<(), StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM languages WHERE id = ?1)",
        [language_id],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(StoreError::UnknownLanguage(language_id))
    }
}

fn ensure_song(conn: &Connection, song_id: i64) -> Result<(), StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM songs WHERE id = ?1)",
        [song_id],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(StoreError::UnknownSong(song_id))
    }
}

fn insert_song(
    conn: &Connection,
    title: &str,
    artist: &str,
    language_id: i64,
    lyrics: &str,
) -> Result<i64, StoreError> {
    ensure_language(conn, language_id)?;
    conn.execute(
        "INSERT INTO songs (title, artist, language_id, lyrics, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![title, artist, language_id, lyrics, now()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Apply a batch of upserts; returns how many words were new
fn upsert_words(
    conn: &Connection,
    entries: &[VocabularyUpsert],
    language_id: i64,
    song_id: Option<i64>,
) -> Result<usize, StoreError> {
    let mut inserted = 0;
    for entry in entries.iter().filter(|e| e.occurrences > 0) {
        if upsert_word(conn, entry, language_id, song_id)? {
            inserted += 1;
        }
    }
    Ok(inserted)
}

/// Insert or count up one word; returns true when the word was new
fn upsert_word(
    conn: &Connection,
    entry: &VocabularyUpsert,
    language_id: i64,
    song_id: Option<i64>,
) -> Result<bool, StoreError> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM vocabulary WHERE word = ?1 AND language_id = ?2",
            params![entry.word, language_id],
            |row| row.get(0),
        )
        .optional()?;

    match existing {
        Some(id) => {
            conn.execute(
                "UPDATE vocabulary SET frequency_count = frequency_count + ?1 WHERE id = ?2",
                params![entry.occurrences, id],
            )?;
            Ok(false)
        }
        None => {
            conn.execute(
                r#"
                INSERT INTO vocabulary (word, translation, language_id, frequency_count, first_song_id, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    entry.word,
                    entry.translation,
                    language_id,
                    entry.occurrences,
                    song_id,
                    now()
                ],
            )?;
            Ok(true)
        }
    }
}
