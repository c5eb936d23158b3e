/*!
 * Database connection management.
 *
 * The learning data lives in an in-memory SQLite database. This module opens
 * fresh databases, restores them from a snapshot blob, and serializes them
 * back into a blob using SQLite's online backup API.
 */

use log::{debug, info};
use rusqlite::backup::Progress;
use rusqlite::{Connection, DatabaseName};

use super::schema;
use crate::errors::StoreError;

/// File name used while staging a snapshot on disk
const STAGING_FILENAME: &str = "snapshot.db";

/// Owned connection to the in-memory learning database
pub struct DatabaseConnection {
    conn: Connection,
}

impl DatabaseConnection {
    /// Create an empty database with the current schema
    pub fn open_fresh() -> Result<Self, StoreError> {
        debug!("Creating in-memory database");

        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Unavailable(format!("Failed to open database: {}", e)))?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Rebuild a database from a blob produced by [`DatabaseConnection::snapshot`]
    pub fn restore(bytes: &[u8]) -> Result<Self, StoreError> {
        if bytes.is_empty() {
            return Err(StoreError::Corrupt("snapshot is empty".to_string()));
        }

        let staging = tempfile::tempdir()
            .map_err(|e| StoreError::Unavailable(format!("Failed to create staging dir: {}", e)))?;
        let path = staging.path().join(STAGING_FILENAME);
        std::fs::write(&path, bytes)
            .map_err(|e| StoreError::Unavailable(format!("Failed to stage snapshot: {}", e)))?;

        let mut conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Unavailable(format!("Failed to open database: {}", e)))?;
        conn.restore(DatabaseName::Main, &path, None::<fn(Progress)>)
            .map_err(|e| StoreError::Corrupt(format!("Failed to restore snapshot: {}", e)))?;

        let check: String = conn
            .query_row("PRAGMA quick_check", [], |row| row.get(0))
            .map_err(|e| StoreError::Corrupt(format!("Snapshot integrity check failed: {}", e)))?;
        if check != "ok" {
            return Err(StoreError::Corrupt(format!(
                "Snapshot integrity check failed: {}",
                check
            )));
        }

        let version = schema::get_schema_version(&conn)
            .map_err(|e| StoreError::Corrupt(format!("Failed to read snapshot schema: {}", e)))?;
        if version == 0 {
            return Err(StoreError::Corrupt("snapshot has no schema".to_string()));
        }

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::initialize_schema(&conn)?;

        info!("Restored database from {} byte snapshot (schema v{})", bytes.len(), version);
        Ok(Self { conn })
    }

    /// Serialize the whole database into a blob
    pub fn snapshot(&self) -> Result<Vec<u8>, StoreError> {
        let staging = tempfile::tempdir()
            .map_err(|e| StoreError::Snapshot(format!("Failed to create staging dir: {}", e)))?;
        let path = staging.path().join(STAGING_FILENAME);

        self.conn
            .backup(DatabaseName::Main, &path, None)
            .map_err(|e| StoreError::Snapshot(format!("Backup failed: {}", e)))?;

        std::fs::read(&path)
            .map_err(|e| StoreError::Snapshot(format!("Failed to read staged snapshot: {}", e)))
    }

    /// Borrow the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Run `f` inside a transaction, committing only when it succeeds
    pub fn transaction<F, T>(&mut self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<T, StoreError>,
    {
        let tx = self.conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}
