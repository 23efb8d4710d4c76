//! Session entry: raw form input → validated study session.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{Lesson, LessonCatalog, NewStudyRecord};
use crate::repeat::{CycleOutcome, RepeatCounter};

/// Date format accepted by the entry form (`<input type="date">`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("date is missing or not YYYY-MM-DD: {0:?}")]
    InvalidDate(String),

    #[error("no lesson selected")]
    MissingLesson,

    #[error("unknown lesson: {0}")]
    UnknownLesson(String),

    #[error("pages studied must be a whole number >= 1")]
    InvalidPages,

    #[error("hours must be a whole number >= 0")]
    InvalidHours,

    #[error("minutes must be a whole number between 0 and 59")]
    InvalidMinutes,

    #[error("questions solved must be a whole number >= 0")]
    InvalidQuestions,
}

/// Raw, string-typed fields as submitted by the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub date: String,
    pub lesson: String,
    pub pages: String,
    pub hours: String,
    pub minutes: String,
    pub questions: String,
}

impl EntryForm {
    /// An empty form dated `today`, with an optional preselected lesson.
    #[must_use]
    pub fn blank(today: NaiveDate, lesson: Option<Lesson>) -> Self {
        Self {
            date: today.format(DATE_FORMAT).to_string(),
            lesson: lesson.map(|l| l.title().to_string()).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// The form after a successful submit: numbers cleared, lesson kept, date reset.
    #[must_use]
    pub fn cleared(&self, today: NaiveDate) -> Self {
        Self {
            date: today.format(DATE_FORMAT).to_string(),
            lesson: self.lesson.clone(),
            ..Self::default()
        }
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns the first `EntryError` found, checking lesson, pages, hours,
    /// minutes, questions and date in that order.
    pub fn validate(&self) -> Result<ValidEntry, EntryError> {
        let lesson = parse_lesson(&self.lesson)?;
        let pages = parse_whole(&self.pages)
            .filter(|pages| *pages >= 1)
            .ok_or(EntryError::InvalidPages)?;
        let hours = parse_whole(&self.hours).ok_or(EntryError::InvalidHours)?;
        let minutes = parse_whole(&self.minutes)
            .filter(|minutes| *minutes <= 59)
            .ok_or(EntryError::InvalidMinutes)?;
        let questions = parse_whole(&self.questions).ok_or(EntryError::InvalidQuestions)?;
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| EntryError::InvalidDate(self.date.clone()))?;

        Ok(ValidEntry {
            lesson,
            date,
            pages,
            hours,
            minutes,
            questions,
        })
    }
}

fn parse_lesson(value: &str) -> Result<Lesson, EntryError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EntryError::MissingLesson);
    }
    value
        .parse::<Lesson>()
        .map_err(|err| EntryError::UnknownLesson(err.title))
}

fn parse_whole(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<u32>().ok()
}

/// A session that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidEntry {
    pub lesson: Lesson,
    pub date: NaiveDate,
    pub pages: u32,
    pub hours: u32,
    pub minutes: u32,
    pub questions: u32,
}

impl ValidEntry {
    /// Hours and minutes folded into fractional hours.
    #[must_use]
    pub fn hours_studied(&self) -> f64 {
        f64::from(self.hours) + f64::from(self.minutes) / 60.0
    }

    /// Build the record to store: snapshot catalog pages and resolve the cycle.
    ///
    /// `counter` is updated as if the record had been stored.
    #[must_use]
    pub fn into_record(
        self,
        catalog: &LessonCatalog,
        counter: &mut RepeatCounter,
    ) -> (NewStudyRecord, CycleOutcome) {
        let total_pages = catalog.get(self.lesson);
        let outcome = counter.apply(self.lesson, self.pages, total_pages);
        let record = NewStudyRecord {
            lesson: self.lesson,
            date: self.date,
            pages_studied: outcome.pages_studied,
            total_pages,
            repeat_cycle: outcome.repeat_cycle,
            hours_studied: self.hours_studied(),
            questions_solved: self.questions,
        };
        (record, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EntryForm {
        EntryForm {
            date: "2024-03-01".into(),
            lesson: "Anatomi".into(),
            pages: "40".into(),
            hours: "1".into(),
            minutes: "30".into(),
            questions: "25".into(),
        }
    }

    #[test]
    fn valid_form_folds_minutes_into_hours() {
        let entry = form().validate().unwrap();
        assert_eq!(entry.lesson, Lesson::Anatomy);
        assert_eq!(entry.hours_studied(), 1.0 + 30.0 / 60.0);
    }

    #[test]
    fn hours_studied_is_exact_for_every_minute() {
        for minutes in 0..=59_u32 {
            let mut f = form();
            f.hours = "2".into();
            f.minutes = minutes.to_string();
            let entry = f.validate().unwrap();
            assert_eq!(entry.hours_studied(), 2.0 + f64::from(minutes) / 60.0);
        }
    }

    #[test]
    fn rejects_missing_and_unknown_lessons() {
        let mut f = form();
        f.lesson = String::new();
        assert_eq!(f.validate(), Err(EntryError::MissingLesson));
        f.lesson = "Dermatoloji".into();
        assert_eq!(
            f.validate(),
            Err(EntryError::UnknownLesson("Dermatoloji".into()))
        );
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        let cases = [
            ("pages", "0", EntryError::InvalidPages),
            ("pages", "", EntryError::InvalidPages),
            ("hours", "-1", EntryError::InvalidHours),
            ("hours", "", EntryError::InvalidHours),
            ("minutes", "60", EntryError::InvalidMinutes),
            ("minutes", "abc", EntryError::InvalidMinutes),
            ("questions", "-3", EntryError::InvalidQuestions),
            ("questions", "", EntryError::InvalidQuestions),
        ];
        for (field, value, expected) in cases {
            let mut f = form();
            match field {
                "pages" => f.pages = value.into(),
                "hours" => f.hours = value.into(),
                "minutes" => f.minutes = value.into(),
                _ => f.questions = value.into(),
            }
            assert_eq!(f.validate(), Err(expected), "{field}={value:?}");
        }
    }

    #[test]
    fn zero_hours_minutes_and_questions_are_accepted() {
        let mut f = form();
        f.hours = "0".into();
        f.minutes = "0".into();
        f.questions = "0".into();
        let entry = f.validate().unwrap();
        assert_eq!(entry.hours_studied(), 0.0);
    }

    #[test]
    fn rejects_bad_date() {
        let mut f = form();
        f.date = "01.03.2024".into();
        assert!(matches!(f.validate(), Err(EntryError::InvalidDate(_))));
    }

    #[test]
    fn record_snapshots_catalog_and_cycle() {
        let catalog = LessonCatalog::new().with(Lesson::Anatomy, 100);
        let mut counter = RepeatCounter::new();

        let (first, _) = form().validate().unwrap().into_record(&catalog, &mut counter);
        assert_eq!(first.total_pages, 100);
        assert_eq!(first.repeat_cycle, 1);
        assert_eq!(first.pages_studied, 40);

        let mut second_form = form();
        second_form.pages = "70".into();
        let (second, outcome) = second_form
            .validate()
            .unwrap()
            .into_record(&catalog, &mut counter);
        assert!(outcome.completed());
        assert_eq!(second.repeat_cycle, 2);
        assert_eq!(second.pages_studied, 10);
    }

    #[test]
    fn unconfigured_lesson_snapshots_default_pages() {
        let mut counter = RepeatCounter::new();
        let (record, _) = form()
            .validate()
            .unwrap()
            .into_record(&LessonCatalog::new(), &mut counter);
        assert_eq!(record.total_pages, 1);
        assert_eq!(record.repeat_cycle, 2);
        assert_eq!(record.pages_studied, 39);
    }

    #[test]
    fn cleared_form_keeps_lesson() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let cleared = form().cleared(today);
        assert_eq!(cleared.lesson, "Anatomi");
        assert_eq!(cleared.date, "2024-03-02");
        assert!(cleared.pages.is_empty());
        assert!(cleared.minutes.is_empty());
    }
}
