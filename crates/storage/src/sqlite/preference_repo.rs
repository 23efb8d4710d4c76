use sqlx::Row;
use study_core::model::Lesson;

use super::SqliteRepository;
use super::mapping::{conn, ser};
use crate::kv::LAST_LESSON_KEY;
use crate::repository::{PreferenceRepository, StorageError};

#[async_trait::async_trait]
impl PreferenceRepository for SqliteRepository {
    async fn last_lesson(&self) -> Result<Option<Lesson>, StorageError> {
        let row = sqlx::query("SELECT value FROM preferences WHERE key = ?1")
            .bind(LAST_LESSON_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let title: String = row.try_get("value").map_err(ser)?;
        Ok(title.parse::<Lesson>().ok())
    }

    async fn set_last_lesson(&self, lesson: Lesson) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO preferences (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
        )
        .bind(LAST_LESSON_KEY)
        .bind(lesson.title())
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }
}
