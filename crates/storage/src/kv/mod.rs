//! Local key-value backend.
//!
//! Every collection is one JSON blob under a fixed key, the layout the
//! browser build kept in `localStorage`. [`FileKv`] keeps the blobs in a
//! single `store.json` file; [`MemoryKv`] is for tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::repository::{Storage, StorageError};

mod local_repo;

pub use local_repo::LocalRepository;

/// Key of the record collection.
pub const RECORDS_KEY: &str = "study-progress-lessons";
/// Where an unreadable record collection is moved before being replaced.
pub const RECORDS_BACKUP_KEY: &str = "study-progress-lessons.unreadable";
/// Key of the lesson → total pages map.
pub const CATALOG_KEY: &str = "lesson-total-pages";
/// Key of the lesson last picked in the entry form.
pub const LAST_LESSON_KEY: &str = "lastSelectedLesson";

/// File name used by [`FileKv`] inside the data directory.
pub const STORE_FILE: &str = "store.json";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

#[derive(Clone, Default)]
pub struct MemoryKv {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryKv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// Key-value pairs persisted as one JSON object on disk.
///
/// Writes go to a sibling temp file that is then renamed over the store, so
/// a crash never leaves a half-written file behind.
#[derive(Clone)]
pub struct FileKv {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
    file_path: PathBuf,
}

impl FileKv {
    /// Open `<dir>/store.json`, starting empty if it does not exist.
    ///
    /// A file that is not a JSON object of strings is treated as empty and
    /// replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the file exists but cannot be read.
    pub async fn open(dir: &Path) -> Result<Self, StorageError> {
        let file_path = dir.join(STORE_FILE);
        let entries = match fs::read_to_string(&file_path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "store file is not valid JSON, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %file_path.display(), "no store file yet");
                BTreeMap::new()
            }
            Err(e) => {
                return Err(StorageError::Connection(format!(
                    "failed to read {}: {e}",
                    file_path.display()
                )));
            }
        };
        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            file_path,
        })
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::Connection(format!("failed to create data dir: {e}"))
            })?;
        }
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let temp_path = self.file_path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .await
            .map_err(|e| StorageError::Connection(format!("failed to write store: {e}")))?;
        fs::rename(&temp_path, &self.file_path)
            .await
            .map_err(|e| StorageError::Connection(format!("failed to replace store: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        self.persist(&entries).await
    }
}

impl Storage {
    /// Build a `Storage` backed by a JSON file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if an existing store file cannot be read.
    pub async fn local(dir: &Path) -> Result<Self, StorageError> {
        let kv = FileKv::open(dir).await?;
        Ok(Self::from_repo(LocalRepository::new(Arc::new(kv))))
    }
}
