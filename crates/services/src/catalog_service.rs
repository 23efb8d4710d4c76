use std::sync::Arc;

use storage::repository::CatalogRepository;
use study_core::model::{CatalogForm, LessonCatalog};
use tracing::{debug, error, info};

use crate::error::CatalogServiceError;

/// Loads and batch-saves the lesson → total pages configuration.
#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    /// Load the stored catalog; lessons never saved read as the default.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError` on storage failures.
    pub async fn load(&self) -> Result<LessonCatalog, CatalogServiceError> {
        let catalog = self.repo.load_catalog().await?;
        debug!(configured = catalog.iter().count(), "loaded lesson catalog");
        Ok(catalog)
    }

    /// Editable form prefilled from the stored catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError` on storage failures.
    pub async fn form(&self) -> Result<CatalogForm, CatalogServiceError> {
        Ok(CatalogForm::from_catalog(&self.load().await?))
    }

    /// Write the page count of every lesson.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError` if persistence fails.
    pub async fn save(&self, catalog: &LessonCatalog) -> Result<(), CatalogServiceError> {
        self.repo.save_catalog(catalog).await.map_err(|e| {
            error!(error = %e, "failed to save lesson catalog");
            e
        })?;
        info!("saved lesson catalog");
        Ok(())
    }

    /// Save the form, mapping empty or invalid fields to the default.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError` if persistence fails.
    pub async fn save_form(&self, form: &CatalogForm) -> Result<LessonCatalog, CatalogServiceError> {
        let catalog = form.to_catalog();
        self.save(&catalog).await?;
        Ok(catalog)
    }
}
