use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use study_core::model::StudyRecord;

use crate::repository::{StorageError, StoredRecord};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Read a `lessons` row through the same normalisation as the JSON store.
pub(crate) fn map_record_row(row: &SqliteRow) -> Result<StudyRecord, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    StoredRecord {
        id: Some(id.to_string()),
        title: row.try_get("title").map_err(ser)?,
        page_studied: row.try_get("page_studied").map_err(ser)?,
        total_pages: row.try_get("total_pages").map_err(ser)?,
        repeat_times: row.try_get("repeat_times").map_err(ser)?,
        date: row.try_get("date").map_err(ser)?,
        hours_studied: row.try_get("hours_studied").map_err(ser)?,
        questions_solved: row.try_get("questions_solved").map_err(ser)?,
    }
    .into_record()
}
