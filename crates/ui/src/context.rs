use std::sync::Arc;

use chrono::NaiveDate;
use services::{CatalogService, Clock, EntryService, PreferenceService, ProgressService};

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn exam_date(&self) -> NaiveDate;

    fn entries(&self) -> Arc<EntryService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn preferences(&self) -> Arc<PreferenceService>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    exam_date: NaiveDate,

    entries: Arc<EntryService>,
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
    preferences: Arc<PreferenceService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            exam_date: app.exam_date(),
            entries: app.entries(),
            catalog: app.catalog(),
            progress: app.progress(),
            preferences: app.preferences(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn exam_date(&self) -> NaiveDate {
        self.exam_date
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

// Provided by the composition root (`crates/app`) via `use_context_provider`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
