use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use study_core::model::{
    Lesson, LessonCatalog, NewStudyRecord, RecordId, StudyRecord,
};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of a study record.
///
/// Field names match the JSON documents written by earlier versions of the
/// app, so existing local data keeps loading. Missing, null or mistyped
/// numbers fall back to safe defaults; fractional counts are truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(rename = "pageStudied", default, deserialize_with = "int_or_zero")]
    pub page_studied: i64,
    #[serde(rename = "totalPages", default = "one", deserialize_with = "int_or_one")]
    pub total_pages: i64,
    #[serde(rename = "repeatTimes", default = "one", deserialize_with = "int_or_one")]
    pub repeat_times: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(rename = "hoursStudied", default, deserialize_with = "hours_or_zero")]
    pub hours_studied: f64,
    #[serde(rename = "questionsSolved", default, deserialize_with = "int_or_zero")]
    pub questions_solved: i64,
}

fn one() -> i64 {
    1
}

/// A number, or a string holding one.
fn loose_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

#[allow(clippy::cast_possible_truncation)]
fn loose_int(value: &Value, fallback: i64) -> i64 {
    match value {
        Value::Number(n) if n.is_i64() => n.as_i64().unwrap_or(fallback),
        // float to int casts saturate
        other => loose_number(other).map_or(fallback, |n| n.trunc() as i64),
    }
}

fn int_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(loose_int(&Value::deserialize(d)?, 0))
}

fn int_or_one<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(loose_int(&Value::deserialize(d)?, 1))
}

fn hours_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(loose_number(&Value::deserialize(d)?).unwrap_or(0.0))
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

impl StoredRecord {
    #[must_use]
    pub fn from_record(record: &StudyRecord) -> Self {
        Self {
            id: Some(record.id().to_string()),
            title: record.lesson().title().to_string(),
            page_studied: i64::from(record.pages_studied()),
            total_pages: i64::from(record.total_pages()),
            repeat_times: i64::from(record.repeat_cycle()),
            date: record.date().format("%Y-%m-%d").to_string(),
            hours_studied: record.hours_studied(),
            questions_solved: i64::from(record.questions_solved()),
        }
    }

    /// Normalise into a domain record.
    ///
    /// Non-positive page counts and cycles read as 1, negative counts as 0.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the title is not a known
    /// lesson, the date is not `YYYY-MM-DD`, or the id is missing.
    pub fn into_record(self) -> Result<StudyRecord, StorageError> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .map(RecordId::new)
            .ok_or_else(|| StorageError::Serialization("record without id".into()))?;
        let lesson = self
            .title
            .parse::<Lesson>()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| StorageError::Serialization(format!("invalid date: {:?}", self.date)))?;

        let record = NewStudyRecord {
            lesson,
            date,
            pages_studied: clamp_u32(self.page_studied, 0),
            total_pages: clamp_u32(self.total_pages, 1),
            repeat_cycle: clamp_u32(self.repeat_times, 1),
            hours_studied: if self.hours_studied.is_finite() && self.hours_studied > 0.0 {
                self.hours_studied
            } else {
                0.0
            },
            questions_solved: clamp_u32(self.questions_solved, 0),
        };
        StudyRecord::from_persisted(id, record)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Clamp a stored integer into `min..=u32::MAX`.
pub(crate) fn clamp_u32(value: i64, min: u32) -> u32 {
    u32::try_from(value).unwrap_or(if value < 0 { min } else { u32::MAX }).max(min)
}

/// The record collection.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Every record, in store order (oldest insert first).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read.
    async fn list_records(&self) -> Result<Vec<StudyRecord>, StorageError>;

    /// Append a record and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append_record(&self, record: NewStudyRecord) -> Result<StudyRecord, StorageError>;

    /// Remove a record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no record has this id.
    async fn delete_record(&self, id: &RecordId) -> Result<(), StorageError>;
}

/// Lesson → total pages configuration.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Load the catalog; an empty store yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn load_catalog(&self) -> Result<LessonCatalog, StorageError>;

    /// Write the page count of every lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be stored.
    async fn save_catalog(&self, catalog: &LessonCatalog) -> Result<(), StorageError>;
}

/// Small UI conveniences that are not study data.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Lesson last picked in the entry form.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if preferences cannot be read.
    async fn last_lesson(&self) -> Result<Option<Lesson>, StorageError>;

    /// Remember the lesson picked in the entry form.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if preferences cannot be stored.
    async fn set_last_lesson(&self, lesson: Lesson) -> Result<(), StorageError>;
}

#[derive(Default)]
struct MemoryState {
    records: Vec<StudyRecord>,
    catalog: LessonCatalog,
    last_lesson: Option<Lesson>,
    next_id: i64,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl RecordRepository for InMemoryRepository {
    async fn list_records(&self) -> Result<Vec<StudyRecord>, StorageError> {
        Ok(self.lock()?.records.clone())
    }

    async fn append_record(&self, record: NewStudyRecord) -> Result<StudyRecord, StorageError> {
        let record = record
            .validate()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut guard = self.lock()?;
        guard.next_id += 1;
        let stored = record.assign_id(RecordId::from_row(guard.next_id));
        guard.records.push(stored.clone());
        Ok(stored)
    }

    async fn delete_record(&self, id: &RecordId) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        let before = guard.records.len();
        guard.records.retain(|record| record.id() != id);
        if guard.records.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn load_catalog(&self) -> Result<LessonCatalog, StorageError> {
        Ok(self.lock()?.catalog.clone())
    }

    async fn save_catalog(&self, catalog: &LessonCatalog) -> Result<(), StorageError> {
        self.lock()?.catalog = catalog.filled().into_iter().collect();
        Ok(())
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryRepository {
    async fn last_lesson(&self) -> Result<Option<Lesson>, StorageError> {
        Ok(self.lock()?.last_lesson)
    }

    async fn set_last_lesson(&self, lesson: Lesson) -> Result<(), StorageError> {
        self.lock()?.last_lesson = Some(lesson);
        Ok(())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub records: Arc<dyn RecordRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub preferences: Arc<dyn PreferenceRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repo(InMemoryRepository::new())
    }

    /// Use one value that implements every repository.
    #[must_use]
    pub fn from_repo<R>(repo: R) -> Self
    where
        R: RecordRepository + CatalogRepository + PreferenceRepository + Clone + 'static,
    {
        let records: Arc<dyn RecordRepository> = Arc::new(repo.clone());
        let catalog: Arc<dyn CatalogRepository> = Arc::new(repo.clone());
        let preferences: Arc<dyn PreferenceRepository> = Arc::new(repo);
        Self {
            records,
            catalog,
            preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::time::fixed_today;

    fn new_record(lesson: Lesson, pages: u32) -> NewStudyRecord {
        NewStudyRecord {
            lesson,
            date: fixed_today(),
            pages_studied: pages,
            total_pages: 100,
            repeat_cycle: 1,
            hours_studied: 1.25,
            questions_solved: 30,
        }
    }

    #[tokio::test]
    async fn append_assigns_ids_and_keeps_order() {
        let repo = InMemoryRepository::new();
        let a = repo.append_record(new_record(Lesson::Anatomy, 10)).await.unwrap();
        let b = repo.append_record(new_record(Lesson::Pathology, 20)).await.unwrap();
        assert_ne!(a.id(), b.id());

        let all = repo.list_records().await.unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn delete_removes_only_that_record() {
        let repo = InMemoryRepository::new();
        let a = repo.append_record(new_record(Lesson::Anatomy, 10)).await.unwrap();
        let b = repo.append_record(new_record(Lesson::Anatomy, 20)).await.unwrap();
        repo.delete_record(a.id()).await.unwrap();
        assert_eq!(repo.list_records().await.unwrap(), vec![b]);
        assert!(matches!(
            repo.delete_record(a.id()).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn catalog_save_fills_every_lesson() {
        let repo = InMemoryRepository::new();
        let catalog = LessonCatalog::new().with(Lesson::Pediatrics, 420);
        repo.save_catalog(&catalog).await.unwrap();
        let loaded = repo.load_catalog().await.unwrap();
        assert_eq!(loaded.get(Lesson::Pediatrics), 420);
        assert!(loaded.is_configured(Lesson::Pediatrics));
        assert!(!loaded.is_configured(Lesson::Anatomy));
        assert_eq!(loaded.get(Lesson::Anatomy), 1);
    }

    #[test]
    fn stored_record_defaults_missing_numbers() {
        let stored: StoredRecord =
            serde_json::from_str(r#"{"id":"x","title":"Anatomi","date":"2024-01-02"}"#).unwrap();
        let record = stored.into_record().unwrap();
        assert_eq!(record.pages_studied(), 0);
        assert_eq!(record.total_pages(), 1);
        assert_eq!(record.repeat_cycle(), 1);
        assert_eq!(record.questions_solved(), 0);
    }

    #[test]
    fn stored_record_normalises_non_positive_totals() {
        let stored: StoredRecord = serde_json::from_str(
            r#"{"id":"x","title":"Patoloji","date":"2024-01-02","totalPages":0,"repeatTimes":-2,"pageStudied":-4}"#,
        )
        .unwrap();
        let record = stored.into_record().unwrap();
        assert_eq!(record.total_pages(), 1);
        assert_eq!(record.repeat_cycle(), 1);
        assert_eq!(record.pages_studied(), 0);
    }

    #[test]
    fn stored_record_tolerates_null_fractional_and_string_numbers() {
        let stored: StoredRecord = serde_json::from_str(
            r#"{"id":7,"title":"Anatomi","date":"2024-01-02","totalPages":null,
                "pageStudied":2.5,"repeatTimes":"3","hoursStudied":"1.5",
                "questionsSolved":"many"}"#,
        )
        .unwrap();
        let record = stored.into_record().unwrap();
        assert_eq!(record.id().as_str(), "7");
        assert_eq!(record.total_pages(), 1);
        assert_eq!(record.pages_studied(), 2);
        assert_eq!(record.repeat_cycle(), 3);
        assert_eq!(record.hours_studied(), 1.5);
        assert_eq!(record.questions_solved(), 0);
    }

    #[test]
    fn stored_record_rejects_unknown_lesson() {
        let stored: StoredRecord =
            serde_json::from_str(r#"{"id":"x","title":"Kardiyoloji","date":"2024-01-02"}"#)
                .unwrap();
        assert!(matches!(
            stored.into_record(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn stored_record_uses_legacy_field_names() {
        let record = new_record(Lesson::Anatomy, 12).assign_id(RecordId::new("abc"));
        let json = serde_json::to_value(StoredRecord::from_record(&record)).unwrap();
        assert_eq!(json["pageStudied"], 12);
        assert_eq!(json["repeatTimes"], 1);
        assert_eq!(json["title"], "Anatomi");
        assert_eq!(json["date"], "2023-11-14");
    }
}
