/*!
 * Database module for persistent storage of learning data.
 *
 * This module provides SQLite-based persistence for:
 * - Languages, songs and per-language vocabulary frequencies
 * - Per-song reading progress and study sessions
 * - Whole-database snapshots saved to a durable key-value slot
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;
pub mod snapshot;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::{
    LanguageRecord, LearningSessionRecord, ProgressRecord, SongRecord, StoreStats,
    VocabularyRecord, VocabularyUpsert,
};
pub use repository::{DEFAULT_SNAPSHOT_KEY, LearningStore, StoreOptions};
pub use snapshot::{FileSlot, MemorySlot, SnapshotSlot};
