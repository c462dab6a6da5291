use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Async string-keyed storage.
///
/// `multi_get` returns one entry per requested key, in request order, with
/// `None` for absent keys. `multi_set` is applied as a single write.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    fn multi_get(
        &self,
        keys: &[&str],
    ) -> impl Future<Output = Result<Vec<(String, Option<String>)>>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    fn multi_set(&self, pairs: &[(&str, String)]) -> impl Future<Output = Result<()>> + Send;

    /// Remove every key.
    fn clear(&self) -> impl Future<Output = Result<()>> + Send;
}

type Entries = BTreeMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> Result<MutexGuard<'_, Entries>> {
    entries
        .lock()
        .map_err(|_| Error::KeyValue("store lock poisoned".to_string()))
}

fn read_keys(entries: &Entries, keys: &[&str]) -> Vec<(String, Option<String>)> {
    keys.iter()
        .map(|k| (k.to_string(), entries.get(*k).cloned()))
        .collect()
}

// ============================================================================
// In-memory store
// ============================================================================

/// Volatile store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<Entries>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    async fn multi_get(&self, keys: &[&str]) -> Result<Vec<(String, Option<String>)>> {
        Ok(read_keys(&*lock(&self.entries)?, keys))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn multi_set(&self, pairs: &[(&str, String)]) -> Result<()> {
        let mut entries = lock(&self.entries)?;
        for (key, value) in pairs {
            entries.insert(key.to_string(), value.clone());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        lock(&self.entries)?.clear();
        Ok(())
    }
}

// ============================================================================
// File-backed store
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntries {
    entries: Entries,
    updated_at: DateTime<Utc>,
}

fn read_stored(path: &Path) -> Result<StoredEntries> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::KeyValue(format!("Failed to read store file: {}", e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| Error::KeyValue(format!("Failed to parse store file: {}", e)))
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

/// Store persisted as a single JSON document. Every write rewrites the file
/// through a temporary sibling and a rename.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileKvStore {
    /// Open the store at `path`, creating parent directories. A missing file
    /// is an empty store. An unreadable file is moved aside to
    /// `<path>.corrupt` and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::KeyValue(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let entries = if path.exists() {
            match read_stored(&path) {
                Ok(stored) => {
                    debug!(count = stored.entries.len(), updated_at = %stored.updated_at, "Key-value store loaded");
                    stored.entries
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Discarding unreadable key-value store");
                    let aside = corrupt_path(&path);
                    if let Err(e) = std::fs::rename(&path, &aside) {
                        warn!(error = %e, "Failed to move unreadable store aside");
                    }
                    Entries::new()
                }
            }
        } else {
            Entries::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &Entries) -> Result<()> {
        let stored = StoredEntries {
            entries: entries.clone(),
            updated_at: Utc::now(),
        };
        let contents = serde_json::to_string_pretty(&stored)
            .map_err(|e| Error::KeyValue(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)
            .and_then(|_| std::fs::rename(&tmp, &self.path))
            .map_err(|e| Error::KeyValue(format!("Failed to write store file: {}", e)))
    }

    /// Apply `change` to a copy of the entries; commit only if the file write
    /// succeeds.
    fn write_with(&self, change: impl FnOnce(&mut Entries)) -> Result<()> {
        let mut entries = lock(&self.entries)?;
        let mut next = entries.clone();
        change(&mut next);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    async fn multi_get(&self, keys: &[&str]) -> Result<Vec<(String, Option<String>)>> {
        Ok(read_keys(&*lock(&self.entries)?, keys))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write_with(|e| {
            e.insert(key.to_string(), value.to_string());
        })
    }

    async fn multi_set(&self, pairs: &[(&str, String)]) -> Result<()> {
        self.write_with(|e| {
            for (key, value) in pairs {
                e.insert(key.to_string(), value.clone());
            }
        })
    }

    async fn clear(&self) -> Result<()> {
        self.write_with(|e| e.clear())
    }
}
