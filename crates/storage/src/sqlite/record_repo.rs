use study_core::model::{NewStudyRecord, RecordId, StudyRecord};

use super::SqliteRepository;
use super::mapping::{conn, map_record_row, ser};
use crate::repository::{RecordRepository, StorageError};

#[async_trait::async_trait]
impl RecordRepository for SqliteRepository {
    async fn list_records(&self) -> Result<Vec<StudyRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, page_studied, total_pages, repeat_times, date, hours_studied, questions_solved
            FROM lessons
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        Ok(rows
            .iter()
            .filter_map(|row| match map_record_row(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable lessons row");
                    None
                }
            })
            .collect())
    }

    async fn append_record(&self, record: NewStudyRecord) -> Result<StudyRecord, StorageError> {
        let record = record.validate().map_err(ser)?;
        let res = sqlx::query(
            r"
            INSERT INTO lessons (title, page_studied, total_pages, repeat_times, date, hours_studied, questions_solved)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(record.lesson.title())
        .bind(i64::from(record.pages_studied))
        .bind(i64::from(record.total_pages))
        .bind(i64::from(record.repeat_cycle))
        .bind(record.date.format("%Y-%m-%d").to_string())
        .bind(record.hours_studied)
        .bind(i64::from(record.questions_solved))
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(record.assign_id(RecordId::from_row(res.last_insert_rowid())))
    }

    async fn delete_record(&self, id: &RecordId) -> Result<(), StorageError> {
        let row_id = id.as_row().ok_or(StorageError::NotFound)?;
        let res = sqlx::query("DELETE FROM lessons WHERE id = ?1")
            .bind(row_id)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
