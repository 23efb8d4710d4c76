#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod entry_service;
pub mod error;
pub mod preference_service;
pub mod progress_service;

pub use study_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use entry_service::EntryService;
pub use error::{AppServicesError, CatalogServiceError, EntryServiceError, ProgressError};
pub use preference_service::PreferenceService;
pub use progress_service::{ProgressService, ProgressSnapshot};
