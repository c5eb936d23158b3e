/*!
 * Database entity models.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A supported study language, seeded once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    pub id: i64,
    /// Display name, e.g. "Korean"
    pub name: String,
    /// Short tag, e.g. "ko"
    pub code: String,
    pub created_at: String,
}

impl LanguageRecord {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            code: row.get("code")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// An uploaded song; never mutated after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub language_id: i64,
    /// Full lyrics text, one lyric line per text line
    pub lyrics: String,
    pub created_at: String,
}

impl SongRecord {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            artist: row.get("artist")?,
            language_id: row.get("language_id")?,
            lyrics: row.get("lyrics")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// A tracked (word, language) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    pub id: i64,
    pub word: String,
    /// Empty until a translation is known
    pub translation: String,
    pub language_id: i64,
    /// Number of observations across ingested songs, always >= 1
    pub frequency_count: i64,
    /// Song in which the word was first observed
    pub first_song_id: Option<i64>,
    pub created_at: String,
}

impl VocabularyRecord {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            word: row.get("word")?,
            translation: row.get("translation")?,
            language_id: row.get("language_id")?,
            frequency_count: row.get("frequency_count")?,
            first_song_id: row.get("first_song_id")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Reading position and completion state for one song
///
/// `completed` implies `current_line` is the song's last line index; callers
/// are responsible for keeping the two consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: i64,
    pub song_id: i64,
    pub current_line: i64,
    pub completed: bool,
    /// Incremented by one on every progress update
    pub practice_sessions: i64,
    pub last_accessed: String,
}

impl ProgressRecord {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            song_id: row.get("song_id")?,
            current_line: row.get("current_line")?,
            completed: row.get("completed")?,
            practice_sessions: row.get("practice_sessions")?,
            last_accessed: row.get("last_accessed")?,
        })
    }
}

/// A finished study session on a song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningSessionRecord {
    pub id: i64,
    pub song_id: i64,
    /// Comma-separated words studied during the session
    pub vocabulary_learned: String,
    pub session_date: String,
    pub duration_minutes: i64,
}

impl LearningSessionRecord {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            song_id: row.get("song_id")?,
            vocabulary_learned: row.get("vocabulary_learned")?,
            session_date: row.get("session_date")?,
            duration_minutes: row.get("duration_minutes")?,
        })
    }
}

/// Input for a single vocabulary upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyUpsert {
    pub word: String,
    /// Initial translation used only when the word is new
    pub translation: String,
    /// How many observations to add; 1 for a plain upsert
    pub occurrences: i64,
}

impl VocabularyUpsert {
    /// A single observation of a word
    pub fn once(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            occurrences: 1,
        }
    }
}

/// Row counts and snapshot size
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub language_count: i64,
    pub song_count: i64,
    pub vocabulary_count: i64,
    pub progress_count: i64,
    pub snapshot_bytes: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Languages: {}, Songs: {}, Vocabulary: {}, Progress records: {}, Snapshot: {} KB",
            self.language_count,
            self.song_count,
            self.vocabulary_count,
            self.progress_count,
            self.snapshot_bytes / 1024
        )
    }
}
