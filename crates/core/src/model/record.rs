use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{Lesson, RecordId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("total pages must be > 0")]
    InvalidTotalPages,

    #[error("repeat cycle must be > 0")]
    InvalidRepeatCycle,

    #[error("hours studied must be finite and >= 0, got {0}")]
    InvalidHours(f64),
}

//
// ─── NEW RECORD ────────────────────────────────────────────────────────────────
//

/// A validated study session that has not been given an identity yet.
///
/// Stores receive this and assign the id on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudyRecord {
    pub lesson: Lesson,
    pub date: NaiveDate,
    pub pages_studied: u32,
    pub total_pages: u32,
    pub repeat_cycle: u32,
    pub hours_studied: f64,
    pub questions_solved: u32,
}

impl NewStudyRecord {
    /// Check the record invariants.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if total pages or the repeat cycle are zero, or
    /// hours are negative or not finite.
    pub fn validate(self) -> Result<Self, RecordError> {
        if self.total_pages == 0 {
            return Err(RecordError::InvalidTotalPages);
        }
        if self.repeat_cycle == 0 {
            return Err(RecordError::InvalidRepeatCycle);
        }
        if !self.hours_studied.is_finite() || self.hours_studied < 0.0 {
            return Err(RecordError::InvalidHours(self.hours_studied));
        }
        Ok(self)
    }

    #[must_use]
    pub fn assign_id(self, id: RecordId) -> StudyRecord {
        StudyRecord {
            id,
            lesson: self.lesson,
            date: self.date,
            pages_studied: self.pages_studied,
            total_pages: self.total_pages,
            repeat_cycle: self.repeat_cycle,
            hours_studied: self.hours_studied,
            questions_solved: self.questions_solved,
        }
    }
}

//
// ─── STUDY RECORD ──────────────────────────────────────────────────────────────
//

/// One persisted study session. Immutable once stored; it can only be deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyRecord {
    id: RecordId,
    lesson: Lesson,
    date: NaiveDate,
    pages_studied: u32,
    total_pages: u32,
    repeat_cycle: u32,
    hours_studied: f64,
    questions_solved: u32,
}

impl StudyRecord {
    /// Rehydrate a record from storage.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if the persisted values break a record invariant.
    pub fn from_persisted(id: RecordId, record: NewStudyRecord) -> Result<Self, RecordError> {
        Ok(record.validate()?.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    #[must_use]
    pub fn lesson(&self) -> Lesson {
        self.lesson
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn pages_studied(&self) -> u32 {
        self.pages_studied
    }

    /// Catalog page count for the lesson at the time the session was entered.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub fn repeat_cycle(&self) -> u32 {
        self.repeat_cycle
    }

    #[must_use]
    pub fn hours_studied(&self) -> f64 {
        self.hours_studied
    }

    #[must_use]
    pub fn questions_solved(&self) -> u32 {
        self.questions_solved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewStudyRecord {
        NewStudyRecord {
            lesson: Lesson::Anatomy,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            pages_studied: 12,
            total_pages: 100,
            repeat_cycle: 1,
            hours_studied: 1.5,
            questions_solved: 40,
        }
    }

    #[test]
    fn assign_id_keeps_fields() {
        let record = draft().validate().unwrap().assign_id(RecordId::new("a"));
        assert_eq!(record.id(), &RecordId::new("a"));
        assert_eq!(record.lesson(), Lesson::Anatomy);
        assert_eq!(record.pages_studied(), 12);
        assert_eq!(record.total_pages(), 100);
        assert_eq!(record.hours_studied(), 1.5);
    }

    #[test]
    fn rejects_zero_total_pages() {
        let mut bad = draft();
        bad.total_pages = 0;
        assert_eq!(bad.validate(), Err(RecordError::InvalidTotalPages));
    }

    #[test]
    fn rejects_negative_hours() {
        let mut bad = draft();
        bad.hours_studied = -0.5;
        assert!(matches!(bad.validate(), Err(RecordError::InvalidHours(_))));
    }

    #[test]
    fn rejects_zero_cycle() {
        let mut bad = draft();
        bad.repeat_cycle = 0;
        assert!(StudyRecord::from_persisted(RecordId::new("x"), bad).is_err());
    }
}
