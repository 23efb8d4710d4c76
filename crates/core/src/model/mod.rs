mod catalog;
mod ids;
mod lesson;
mod record;

pub use catalog::{
    CatalogForm, DEFAULT_TOTAL_PAGES, LessonCatalog, accept_pages_input, parse_total_pages,
};
pub use ids::{ParseIdError, RecordId};
pub use lesson::{Lesson, LessonGroup, UnknownLesson};
pub use record::{NewStudyRecord, RecordError, StudyRecord};
