use std::sync::Arc;

use chrono::NaiveDate;
use storage::repository::{InMemoryRepository, RecordRepository, Storage, StorageError};
use study_core::model::{Lesson, LessonCatalog, NewStudyRecord, RecordId, StudyRecord};
use study_core::time::fixed_today;

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

fn record(lesson: Lesson, pages: u32) -> NewStudyRecord {
    NewStudyRecord {
        lesson,
        date: fixed_today(),
        pages_studied: pages,
        total_pages: 200,
        repeat_cycle: 1,
        hours_studied: 2.0,
        questions_solved: 30,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_countdown_and_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.rebuild().await;
    let html = harness.render();

    // fixed today is 2023-11-14, default exam is 2025-03-15
    assert!(html.contains("Sınava Kalan Gün: 487"), "missing countdown in {html}");
    assert!(html.contains("Kaydet"), "missing entry form in {html}");
    assert!(html.contains("Henüz kayıt yok."), "missing empty state in {html}");
    assert!(!html.contains("<svg"), "line chart should be hidden in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_lesson_cards_and_records() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness
        .storage
        .catalog
        .save_catalog(&LessonCatalog::new().with(Lesson::Pathology, 200))
        .await
        .expect("save catalog");
    harness
        .storage
        .records
        .append_record(record(Lesson::Pathology, 50))
        .await
        .expect("append record");

    harness.rebuild().await;
    let html = harness.render();
    assert!(html.contains("Temel Bilimler"), "missing group in {html}");
    assert!(html.contains("Çalışılan Sayfa: 50 / 200"), "missing card totals in {html}");
    assert!(html.contains("İlerleme: %25"), "missing percent in {html}");
    assert!(html.contains("Saatte Ortalama Sayfa: 25.00"), "missing daily rate in {html}");
    assert!(html.contains("14 Kasım 2023"), "missing Turkish date in {html}");
    assert!(html.contains("<svg"), "missing line chart in {html}");
    assert!(html.contains("Sil"), "missing delete button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_shows_passed_exam() {
    let exam = NaiveDate::from_ymd_opt(2023, 11, 10).unwrap();
    let mut harness =
        setup_view_harness_with_storage(ViewKind::Home, Storage::in_memory(), exam);
    harness.rebuild().await;
    let html = harness.render();
    assert!(html.contains("Sınav Geçeli Gün: 4"), "missing passed headline in {html}");
    assert!(
        html.contains("Bir Sonraki Sınava Kalan Gün: 362"),
        "missing next occurrence in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn catalog_view_smoke_renders_toggle() {
    let mut harness = setup_view_harness(ViewKind::Catalog);
    harness.rebuild().await;
    let html = harness.render();
    assert!(
        html.contains("Derslerin Toplam Sayfa Sayısını Göster"),
        "missing toggle in {html}"
    );
    assert!(html.contains("Ana Sayfaya Dön"), "missing back link in {html}");
}

struct FailingRecords;

#[async_trait::async_trait]
impl RecordRepository for FailingRecords {
    async fn list_records(&self) -> Result<Vec<StudyRecord>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn append_record(&self, _record: NewStudyRecord) -> Result<StudyRecord, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn delete_record(&self, _id: &RecordId) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let repo = InMemoryRepository::new();
    let storage = Storage {
        records: Arc::new(FailingRecords),
        catalog: Arc::new(repo.clone()),
        preferences: Arc::new(repo),
    };
    let mut harness =
        setup_view_harness_with_storage(ViewKind::Home, storage, fixed_today());
    harness.rebuild().await;
    let html = harness.render();
    assert!(
        html.contains("Veriler yüklenemedi. Lütfen tekrar deneyin."),
        "missing error message in {html}"
    );
}
