/*!
 * Database schema definitions and migrations.
 *
 * This module contains the SQL schema for the learning-data tables, the fixed
 * list of seeded languages, and handles schema migrations for version upgrades.
 */

use log::{debug, info};
use rusqlite::{Connection, params};

use crate::errors::StoreError;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Languages seeded on first run as (display name, code)
pub const SEED_LANGUAGES: &[(&str, &str)] = &[
    ("Korean", "ko"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("Japanese", "ja"),
    ("German", "de"),
    ("Italian", "it"),
    ("Portuguese", "pt"),
    ("Chinese", "zh"),
    ("Hindi", "hi"),
    ("Hausa", "ha"),
    ("Arabic", "ar"),
    ("Swahili", "sw"),
];

/// Sample songs offered on first run as (title, artist, language code, lyrics)
pub const SAMPLE_SONGS: &[(&str, &str, &str, &str)] = &[
    (
        "Hello My Love",
        "Sample Artist",
        "ko",
        "안녕 내 사랑 (Hello my love)\n\
         너를 만나서 기뻐 (Happy to meet you)\n\
         우리 함께 해 (Let's be together)\n\
         사랑해 사랑해 (I love you, I love you)\n\
         언제까지나 (Forever and ever)\n\
         너와 함께 할게 (I'll be with you)",
    ),
    (
        "Mi Amor",
        "Artista Ejemplo",
        "es",
        "Hola mi amor (Hello my love)\n\
         Te quiero mucho (I love you so much)\n\
         Eres mi vida (You are my life)\n\
         Mi corazón (My heart)\n\
         Siempre contigo (Always with you)\n\
         Para siempre (Forever)",
    ),
];

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating database schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(StoreError::Corrupt(format!(
            "schema v{} is newer than supported v{}",
            current_version, SCHEMA_VERSION
        )));
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database, 0 when absent
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i32> {
    let table_exists: bool = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

fn create_all_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS languages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            code TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            language_id INTEGER NOT NULL REFERENCES languages(id),
            lyrics TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_songs_language ON songs(language_id);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS vocabulary (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            word TEXT NOT NULL,
            translation TEXT NOT NULL DEFAULT '',
            language_id INTEGER NOT NULL REFERENCES languages(id),
            frequency_count INTEGER NOT NULL DEFAULT 1 CHECK (frequency_count >= 1),
            first_song_id INTEGER REFERENCES songs(id),
            created_at TEXT NOT NULL,
            UNIQUE(word, language_id)
        );

        CREATE INDEX IF NOT EXISTS idx_vocabulary_language ON vocabulary(language_id);
        CREATE INDEX IF NOT EXISTS idx_vocabulary_word ON vocabulary(word);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS user_progress (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            song_id INTEGER NOT NULL UNIQUE REFERENCES songs(id),
            current_line INTEGER NOT NULL DEFAULT 0,
            completed INTEGER NOT NULL DEFAULT 0,
            practice_sessions INTEGER NOT NULL DEFAULT 0,
            last_accessed TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS learning_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            song_id INTEGER NOT NULL REFERENCES songs(id),
            vocabulary_learned TEXT NOT NULL DEFAULT '',
            session_date TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_learning_sessions_song ON learning_sessions(song_id);
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}

/// Insert the fixed language list; existing rows are left alone
pub fn seed_languages(conn: &Connection, created_at: &str) -> rusqlite::Result<usize> {
    let mut inserted = 0;
    for (name, code) in SEED_LANGUAGES {
        inserted += conn.execute(
            "INSERT OR IGNORE INTO languages (name, code, created_at) VALUES (?1, ?2, ?3)",
            params![name, code, created_at],
        )?;
    }
    debug!("Seeded {} languages", inserted);
    Ok(inserted)
}

/// Insert the sample songs unless the songs table already has rows
pub fn seed_sample_songs(conn: &Connection, created_at: &str) -> rusqlite::Result<usize> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))?;
    if existing > 0 {
        return Ok(0);
    }

    let mut inserted = 0;
    for (title, artist, code, lyrics) in SAMPLE_SONGS {
        inserted += conn.execute(
            r#"
            INSERT INTO songs (title, artist, language_id, lyrics, created_at)
            SELECT ?1, ?2, id, ?3, ?4 FROM languages WHERE code = ?5
            "#,
            params![title, artist, lyrics, created_at, code],
        )?;
    }
    debug!("Seeded {} sample songs", inserted);
    Ok(inserted)
}

fn migrate_schema(conn: &Connection, from_version: i32) -> Result<(), StoreError> {
    // Each schema version gets a step here as the schema evolves
    if let Some(version) = (from_version..SCHEMA_VERSION).next() {
        return Err(StoreError::Corrupt(format!(
            "Unknown schema version: {}. Cannot migrate.",
            version
        )));
    }

    set_schema_version(conn, SCHEMA_VERSION)?;
    info!("Schema migration completed to v{}", SCHEMA_VERSION);
    Ok(())
}
