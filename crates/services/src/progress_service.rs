use std::sync::Arc;

use storage::repository::{CatalogRepository, RecordRepository};
use study_core::aggregate::{ProgressReport, newest_first};
use study_core::model::{LessonCatalog, StudyRecord};
use tracing::debug;

use crate::error::ProgressError;

/// Records, catalog and the report derived from them, read together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSnapshot {
    pub records: Vec<StudyRecord>,
    pub catalog: LessonCatalog,
    pub report: ProgressReport,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn from_parts(records: Vec<StudyRecord>, catalog: LessonCatalog) -> Self {
        let report = ProgressReport::from_records(&records, &catalog);
        Self {
            records,
            catalog,
            report,
        }
    }

    #[must_use]
    pub fn records_newest_first(&self) -> Vec<&StudyRecord> {
        newest_first(&self.records)
    }
}

/// Read side: rebuilds the progress report from the full record set.
#[derive(Clone)]
pub struct ProgressService {
    records: Arc<dyn RecordRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(records: Arc<dyn RecordRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { records, catalog }
    }

    /// Fetch everything and aggregate from scratch.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn snapshot(&self) -> Result<ProgressSnapshot, ProgressError> {
        let records = self.records.list_records().await?;
        let catalog = self.catalog.load_catalog().await?;
        debug!(records = records.len(), "rebuilding progress report");
        Ok(ProgressSnapshot::from_parts(records, catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use study_core::model::{Lesson, NewStudyRecord};
    use study_core::time::fixed_today;

    #[tokio::test]
    async fn snapshot_aggregates_store_contents() {
        let repo = InMemoryRepository::new();
        for (days_ago, pages) in [(2, 10_u32), (0, 25)] {
            repo.append_record(NewStudyRecord {
                lesson: Lesson::Microbiology,
                date: fixed_today() - chrono::Duration::days(days_ago),
                pages_studied: pages,
                total_pages: 200,
                repeat_cycle: 1,
                hours_studied: 1.0,
                questions_solved: 5,
            })
            .await
            .unwrap();
        }

        let svc = ProgressService::new(Arc::new(repo.clone()), Arc::new(repo));
        let snapshot = svc.snapshot().await.unwrap();
        let totals = snapshot.report.lesson(Lesson::Microbiology).unwrap();
        assert_eq!(totals.pages, 35);
        assert_eq!(totals.days, 2);
        assert_eq!(snapshot.report.days().len(), 2);
        assert_eq!(snapshot.records_newest_first()[0].pages_studied(), 25);
    }
}
