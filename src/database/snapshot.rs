/*!
 * Durable key-value slots for database snapshots.
 *
 * The store serializes the whole database into one byte blob and hands it to a
 * slot under a single well-known key, replacing the previous value wholesale.
 */

use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Debug;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Durable storage for snapshot blobs
pub trait SnapshotSlot: Send + Sync + Debug {
    /// Read the blob stored under `key`, `None` when nothing was saved yet
    fn load(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Replace the blob stored under `key`
    ///
    /// Must not return before the bytes are durable.
    fn save(&self, key: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Slot that keeps one file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Default location under the user's local data directory
    pub fn default_dir() -> io::Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory"))?;

        Ok(base_dir.join("songlingo"))
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.snapshot", key))
    }
}

impl SnapshotSlot for FileSlot {
    fn load(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => {
                debug!("Loaded {} snapshot bytes from {:?}", bytes.len(), path);
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so readers never see a torn blob
        let mut staged = tempfile::NamedTempFile::new_in(&self.dir)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;

        let path = self.path_for(key);
        staged.persist(&path).map_err(|e| e.error)?;
        debug!("Saved {} snapshot bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}

/// In-process slot, shared between clones; used by tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. with a corrupt blob
    pub fn insert(&self, key: &str, bytes: Vec<u8>) {
        self.blobs.lock().insert(key.to_string(), bytes);
    }

    /// Current bytes under a key
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.lock().get(key).cloned()
    }

    /// Make every following `save` fail, simulating a full or read-only disk
    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.lock() = fail;
    }
}

impl SnapshotSlot for MemorySlot {
    fn load(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        if *self.fail_saves.lock() {
            return Err(io::Error::other("simulated save failure"));
        }
        self.insert(key, bytes.to_vec());
        Ok(())
    }
}
