//! Device-local key-value storage.
//!
//! The session token lives in a small string key-value store. [`FileStorage`]
//! keeps every entry in one JSON object on disk, the same shape a mobile
//! key-value store would have; [`MemoryStorage`] keeps them in process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::client::error::{StorageError, StorageResult};

/// Persistent string key-value storage.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a value. Returns whether something was removed.
    fn remove(&self, key: &str) -> StorageResult<bool>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let data = self.data.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut data = self.data.lock().map_err(|_| StorageError::Poisoned)?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let mut data = self.data.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(data.remove(key).is_some())
    }
}

/// JSON file backed storage.
///
/// The file holds a single JSON object mapping keys to string values. A missing
/// file is an empty store. Writes replace the whole file atomically through a
/// temporary file in the same directory; the mutex only serializes writers
/// within this process.
///
/// Reading a corrupt file is an error. Writing over one discards its content
/// so the store can recover.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<HashMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(HashMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current entries for a read-modify-write cycle. The flag is set when a
    /// corrupt file was replaced by an empty map.
    fn load_for_write(&self) -> StorageResult<(HashMap<String, String>, bool)> {
        match self.load() {
            Ok(entries) => Ok((entries, false)),
            Err(StorageError::Corrupt(e)) => {
                warn!(path = %self.path.display(), "Discarding corrupt storage file: {}", e);
                Ok((HashMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, entries: &HashMap<String, String>) -> StorageResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, entries)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        debug!(path = %self.path.display(), key = %key, "Writing storage entry");
        let (mut entries, _) = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let (mut entries, discarded) = self.load_for_write()?;
        let removed = entries.remove(key).is_some();
        if !removed && !discarded {
            return Ok(false);
        }
        debug!(path = %self.path.display(), key = %key, "Removed storage entry");
        self.save(&entries)?;
        Ok(true)
    }
}
