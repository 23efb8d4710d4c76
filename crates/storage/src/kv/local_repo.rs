use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use study_core::model::{
    Lesson, LessonCatalog, NewStudyRecord, RecordId, StudyRecord, parse_total_pages,
};
use tokio::sync::Mutex;
use tracing::warn;

use super::{CATALOG_KEY, KeyValueStore, LAST_LESSON_KEY, RECORDS_BACKUP_KEY, RECORDS_KEY};
use crate::repository::{
    CatalogRepository, PreferenceRepository, RecordRepository, StorageError, StoredRecord,
    clamp_u32,
};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Repositories laid out as JSON blobs in a [`KeyValueStore`].
///
/// Records get client-generated UUIDs. Read-modify-write cycles are
/// serialised by an internal lock.
#[derive(Clone)]
pub struct LocalRepository {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl LocalRepository {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The raw documents of the record collection.
    ///
    /// Documents are kept as JSON values so that a rewrite preserves
    /// entries this version cannot decode.
    async fn read_documents(&self) -> Result<Vec<Value>, StorageError> {
        let Some(raw) = self.kv.get(RECORDS_KEY).await? else {
            return Ok(Vec::new());
        };
        if let Some(documents) = parse_documents(&raw) {
            return Ok(documents);
        }
        // keep the unreadable blob around before it is overwritten
        warn!(backup = RECORDS_BACKUP_KEY, "replacing unreadable record collection");
        self.kv.set(RECORDS_BACKUP_KEY, raw).await?;
        Ok(Vec::new())
    }

    async fn write_documents(&self, documents: &[Value]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(documents).map_err(ser)?;
        self.kv.set(RECORDS_KEY, raw).await
    }
}

fn parse_documents(raw: &str) -> Option<Vec<Value>> {
    match serde_json::from_str(raw) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// Decode one document, or `None` (logged) if it is not a usable record.
fn decode_record(document: &Value) -> Option<StudyRecord> {
    let stored = match StoredRecord::deserialize(document) {
        Ok(stored) => stored,
        Err(e) => {
            warn!(error = %e, "skipping malformed record");
            return None;
        }
    };
    match stored.into_record() {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(error = %e, "skipping unreadable record");
            None
        }
    }
}

fn document_id(document: &Value) -> Option<String> {
    match document.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Decode `{ "<lesson title>": <pages> }`; numbers may also be numeric strings.
fn decode_catalog(raw: &str) -> LessonCatalog {
    let map: serde_json::Map<String, Value> = match serde_json::from_str(raw) {
        Ok(map) => map,
        Err(e) => {
            warn!(error = %e, "lesson catalog is not a JSON object, treating as empty");
            return LessonCatalog::new();
        }
    };
    map.into_iter()
        .filter_map(|(title, value)| {
            let lesson = match title.parse::<Lesson>() {
                Ok(lesson) => lesson,
                Err(e) => {
                    warn!(%e, "skipping catalog entry");
                    return None;
                }
            };
            let pages = match &value {
                Value::Number(n) => n.as_i64().map_or(1, |n| clamp_u32(n, 1)),
                Value::String(s) => parse_total_pages(s),
                _ => 1,
            };
            Some((lesson, pages))
        })
        .collect()
}

#[async_trait]
impl RecordRepository for LocalRepository {
    async fn list_records(&self) -> Result<Vec<StudyRecord>, StorageError> {
        let Some(raw) = self.kv.get(RECORDS_KEY).await? else {
            return Ok(Vec::new());
        };
        let Some(documents) = parse_documents(&raw) else {
            warn!("record collection is not a JSON array, treating as empty");
            return Ok(Vec::new());
        };
        Ok(documents.iter().filter_map(decode_record).collect())
    }

    async fn append_record(&self, record: NewStudyRecord) -> Result<StudyRecord, StorageError> {
        let record = record.validate().map_err(ser)?.assign_id(RecordId::generate());
        let document = serde_json::to_value(StoredRecord::from_record(&record)).map_err(ser)?;
        let _guard = self.write_lock.lock().await;
        let mut documents = self.read_documents().await?;
        documents.push(document);
        self.write_documents(&documents).await?;
        Ok(record)
    }

    async fn delete_record(&self, id: &RecordId) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut documents = self.read_documents().await?;
        let before = documents.len();
        documents.retain(|document| document_id(document).as_deref() != Some(id.as_str()));
        if documents.len() == before {
            return Err(StorageError::NotFound);
        }
        self.write_documents(&documents).await
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn load_catalog(&self) -> Result<LessonCatalog, StorageError> {
        Ok(self
            .kv
            .get(CATALOG_KEY)
            .await?
            .map(|raw| decode_catalog(&raw))
            .unwrap_or_default())
    }

    async fn save_catalog(&self, catalog: &LessonCatalog) -> Result<(), StorageError> {
        let map: serde_json::Map<String, Value> = catalog
            .filled()
            .into_iter()
            .map(|(lesson, pages)| (lesson.title().to_string(), Value::from(pages)))
            .collect();
        let raw = serde_json::to_string(&map).map_err(ser)?;
        let _guard = self.write_lock.lock().await;
        self.kv.set(CATALOG_KEY, raw).await
    }
}

#[async_trait]
impl PreferenceRepository for LocalRepository {
    async fn last_lesson(&self) -> Result<Option<Lesson>, StorageError> {
        Ok(self
            .kv
            .get(LAST_LESSON_KEY)
            .await?
            .and_then(|title| title.parse::<Lesson>().ok()))
    }

    async fn set_last_lesson(&self, lesson: Lesson) -> Result<(), StorageError> {
        self.kv
            .set(LAST_LESSON_KEY, lesson.title().to_string())
            .await
    }
}
