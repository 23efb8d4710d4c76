use std::sync::Arc;

use storage::repository::PreferenceRepository;
use study_core::model::Lesson;
use tracing::{debug, error, warn};

/// Remembers the lesson last picked in the entry form.
///
/// The preference only saves a click, so failures are logged and never
/// reach the form.
#[derive(Clone)]
pub struct PreferenceService {
    repo: Arc<dyn PreferenceRepository>,
}

impl PreferenceService {
    #[must_use]
    pub fn new(repo: Arc<dyn PreferenceRepository>) -> Self {
        Self { repo }
    }

    /// The remembered lesson, or `None` if unset or unreadable.
    pub async fn last_lesson(&self) -> Option<Lesson> {
        match self.repo.last_lesson().await {
            Ok(lesson) => lesson,
            Err(e) => {
                warn!(error = %e, "could not read last selected lesson");
                None
            }
        }
    }

    /// Persist the picked lesson.
    ///
    /// Returns whether the write succeeded.
    pub async fn remember_lesson(&self, lesson: Lesson) -> bool {
        match self.repo.set_last_lesson(lesson).await {
            Ok(()) => {
                debug!(%lesson, "remembered selected lesson");
                true
            }
            Err(e) => {
                error!(error = %e, %lesson, "failed to store selected lesson");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use storage::repository::{InMemoryRepository, StorageError};

    use super::*;

    struct BrokenPreferences;

    #[async_trait]
    impl PreferenceRepository for BrokenPreferences {
        async fn last_lesson(&self) -> Result<Option<Lesson>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn set_last_lesson(&self, _lesson: Lesson) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".into()))
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn remembered_lesson_is_read_back() {
        let svc = PreferenceService::new(Arc::new(InMemoryRepository::new()));
        assert_eq!(svc.last_lesson().await, None);
        assert!(svc.remember_lesson(Lesson::Pharmacology).await);
        assert_eq!(svc.last_lesson().await, Some(Lesson::Pharmacology));
    }

    #[tokio::test]
    async fn failed_write_is_logged_as_error() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let svc = PreferenceService::new(Arc::new(BrokenPreferences));
        assert!(!svc.remember_lesson(Lesson::Anatomy).await);
        assert_eq!(svc.last_lesson().await, None);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("ERROR"));
        assert!(output.contains("failed to store selected lesson"));
    }
}
