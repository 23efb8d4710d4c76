use sqlx::Row;
use study_core::model::{Lesson, LessonCatalog};

use super::SqliteRepository;
use super::mapping::{conn, ser};
use crate::repository::{CatalogRepository, StorageError, clamp_u32};

#[async_trait::async_trait]
impl CatalogRepository for SqliteRepository {
    async fn load_catalog(&self) -> Result<LessonCatalog, StorageError> {
        let rows = sqlx::query("SELECT title, total_pages FROM lesson_pages")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        let mut catalog = LessonCatalog::new();
        for row in &rows {
            let title: String = row.try_get("title").map_err(ser)?;
            let pages: i64 = row.try_get("total_pages").map_err(ser)?;
            match title.parse::<Lesson>() {
                Ok(lesson) => catalog.set(lesson, clamp_u32(pages, 1)),
                Err(e) => tracing::warn!(%e, "skipping lesson_pages row"),
            }
        }
        Ok(catalog)
    }

    async fn save_catalog(&self, catalog: &LessonCatalog) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;
        for (lesson, pages) in catalog.filled() {
            sqlx::query(
                r"
                INSERT INTO lesson_pages (title, total_pages)
                VALUES (?1, ?2)
                ON CONFLICT(title) DO UPDATE SET total_pages = excluded.total_pages
                ",
            )
            .bind(lesson.title())
            .bind(i64::from(pages))
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }
        tx.commit().await.map_err(conn)?;
        Ok(())
    }
}
