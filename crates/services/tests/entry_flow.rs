use std::sync::Arc;

use async_trait::async_trait;
use services::{AppServices, EntryService, EntryServiceError};
use storage::repository::{InMemoryRepository, RecordRepository, StorageError};
use study_core::entry::EntryForm;
use study_core::model::{Lesson, LessonCatalog, NewStudyRecord, RecordId, StudyRecord};
use study_core::time::fixed_clock;

fn form(lesson: Lesson, date: &str, pages: &str) -> EntryForm {
    EntryForm {
        date: date.into(),
        lesson: lesson.title().into(),
        pages: pages.into(),
        hours: "2".into(),
        minutes: "0".into(),
        questions: "40".into(),
    }
}

#[tokio::test]
async fn entry_to_report_flow() {
    let app = AppServices::in_memory(fixed_clock());
    app.catalog()
        .save(&LessonCatalog::new().with(Lesson::Anatomy, 100))
        .await
        .unwrap();

    let entries = app.entries();
    entries
        .submit(&form(Lesson::Anatomy, "2024-03-01", "40"))
        .await
        .unwrap();
    let second = entries
        .submit(&form(Lesson::Anatomy, "2024-03-02", "70"))
        .await
        .unwrap();
    assert_eq!(second.repeat_cycle(), 2);

    let snapshot = app.progress().snapshot().await.unwrap();
    let anatomy = snapshot.report.lesson(Lesson::Anatomy).unwrap();
    assert_eq!(anatomy.pages, 50);
    assert_eq!(anatomy.repeat_cycle, 2);
    assert_eq!(anatomy.cycle_pages, 10);
    assert_eq!(anatomy.days, 2);
    assert_eq!(anatomy.percent(), 50);
    assert_eq!(snapshot.report.days()[0].pages, 40);

    entries.delete(second.id()).await.unwrap();
    let snapshot = app.progress().snapshot().await.unwrap();
    assert_eq!(snapshot.records.len(), 1);
    assert_eq!(snapshot.report.lesson(Lesson::Anatomy).unwrap().pages, 40);
}

#[tokio::test]
async fn last_lesson_preference_preselects_form() {
    let app = AppServices::in_memory(fixed_clock());
    assert_eq!(app.preferences().last_lesson().await, None);
    assert!(
        app.preferences()
            .remember_lesson(Lesson::GeneralSurgery)
            .await
    );

    let lesson = app.preferences().last_lesson().await;
    let blank = app.entries().blank_form(lesson);
    assert_eq!(blank.lesson, "Genel Cerrahi");
    assert!(blank.pages.is_empty());
}

struct ReadOnlyRecords;

#[async_trait]
impl RecordRepository for ReadOnlyRecords {
    async fn list_records(&self) -> Result<Vec<StudyRecord>, StorageError> {
        Ok(Vec::new())
    }

    async fn append_record(&self, _record: NewStudyRecord) -> Result<StudyRecord, StorageError> {
        Err(StorageError::Connection("disk full".into()))
    }

    async fn delete_record(&self, _id: &RecordId) -> Result<(), StorageError> {
        Err(StorageError::NotFound)
    }
}

#[tokio::test]
async fn write_failures_reach_the_caller() {
    let svc = EntryService::new(
        fixed_clock(),
        Arc::new(ReadOnlyRecords),
        Arc::new(InMemoryRepository::new()),
    );
    let err = svc
        .submit(&form(Lesson::Pathology, "2024-03-01", "12"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EntryServiceError::Storage(StorageError::Connection(_))
    ));
}
