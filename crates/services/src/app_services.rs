use std::path::Path;
use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::catalog_service::CatalogService;
use crate::entry_service::EntryService;
use crate::error::AppServicesError;
use crate::preference_service::PreferenceService;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    entries: Arc<EntryService>,
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
    preferences: Arc<PreferenceService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services backed by the local JSON store in `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if an existing store file cannot be read.
    pub async fn new_local(data_dir: &Path, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::local(data_dir).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        Self {
            clock,
            entries: Arc::new(EntryService::new(
                clock,
                Arc::clone(&storage.records),
                Arc::clone(&storage.catalog),
            )),
            catalog: Arc::new(CatalogService::new(Arc::clone(&storage.catalog))),
            progress: Arc::new(ProgressService::new(
                Arc::clone(&storage.records),
                Arc::clone(&storage.catalog),
            )),
            preferences: Arc::new(PreferenceService::new(Arc::clone(&storage.preferences))),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn entries(&self) -> Arc<EntryService> {
        Arc::clone(&self.entries)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferenceService> {
        Arc::clone(&self.preferences)
    }
}
