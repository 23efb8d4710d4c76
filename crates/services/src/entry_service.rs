use std::sync::Arc;

use storage::repository::{CatalogRepository, RecordRepository};
use study_core::entry::EntryForm;
use study_core::model::{Lesson, RecordId, StudyRecord};
use study_core::repeat::RepeatCounter;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::Clock;
use crate::error::EntryServiceError;

/// Validates submitted sessions and appends them to the record store.
#[derive(Clone)]
pub struct EntryService {
    clock: Clock,
    records: Arc<dyn RecordRepository>,
    catalog: Arc<dyn CatalogRepository>,
    // Cycle resolution reads every record, so submits must not interleave.
    submit_lock: Arc<Mutex<()>>,
}

impl EntryService {
    #[must_use]
    pub fn new(
        clock: Clock,
        records: Arc<dyn RecordRepository>,
        catalog: Arc<dyn CatalogRepository>,
    ) -> Self {
        Self {
            clock,
            records,
            catalog,
            submit_lock: Arc::new(Mutex::new(())),
        }
    }

    /// An empty form dated today, preselecting `lesson`.
    #[must_use]
    pub fn blank_form(&self, lesson: Option<Lesson>) -> EntryForm {
        EntryForm::blank(self.clock.today(), lesson)
    }

    /// The form to show after `form` was accepted.
    #[must_use]
    pub fn cleared_form(&self, form: &EntryForm) -> EntryForm {
        form.cleared(self.clock.today())
    }

    /// Validate `form`, resolve its repeat cycle and append the record.
    ///
    /// Nothing is stored when validation fails.
    ///
    /// # Errors
    ///
    /// Returns `EntryServiceError::Entry` for invalid input.
    /// Returns `EntryServiceError::Storage` if the store cannot be read or written.
    pub async fn submit(&self, form: &EntryForm) -> Result<StudyRecord, EntryServiceError> {
        let entry = form.validate().map_err(|e| {
            debug!(error = %e, "rejected study entry");
            e
        })?;

        let _guard = self.submit_lock.lock().await;
        let catalog = self.catalog.load_catalog().await?;
        let existing = self.records.list_records().await?;
        let mut counter = RepeatCounter::from_records(&existing);
        let (record, outcome) = entry.into_record(&catalog, &mut counter);
        let record = record.validate()?;

        let stored = self.records.append_record(record).await.map_err(|e| {
            error!(error = %e, lesson = %entry.lesson, "failed to store study record");
            e
        })?;

        if outcome.completed() {
            info!(
                lesson = %entry.lesson,
                cycle = outcome.repeat_cycle,
                "lesson repeat cycle completed"
            );
        }
        info!(id = %stored.id(), lesson = %entry.lesson, pages = entry.pages, "stored study record");
        Ok(stored)
    }

    /// Every record in store order.
    ///
    /// # Errors
    ///
    /// Returns `EntryServiceError::Storage` if repository access fails.
    pub async fn list_records(&self) -> Result<Vec<StudyRecord>, EntryServiceError> {
        let records = self.records.list_records().await?;
        debug!(count = records.len(), "listed study records");
        Ok(records)
    }

    /// Delete one record.
    ///
    /// # Errors
    ///
    /// Returns `EntryServiceError::Storage` if the record does not exist or
    /// the store cannot be written.
    pub async fn delete(&self, id: &RecordId) -> Result<(), EntryServiceError> {
        self.records.delete_record(id).await.map_err(|e| {
            error!(error = %e, %id, "failed to delete study record");
            e
        })?;
        info!(%id, "deleted study record");
        Ok(())
    }
}
