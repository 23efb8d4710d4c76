use study_core::aggregate::{DayTotals, LessonTotals};
use study_core::format::{format_date_tr, format_hours_tr, format_rate};
use study_core::model::{RecordId, StudyRecord};

#[derive(Clone, Debug, PartialEq)]
pub struct LessonCardVm {
    pub title: &'static str,
    pub pages: u64,
    pub total_pages: u32,
    pub questions: u64,
    pub hours_str: String,
    pub days: usize,
    pub remaining_pages: u64,
    pub repeat_cycle: u32,
    pub percent: u8,
    pub has_records: bool,
}

impl From<&LessonTotals> for LessonCardVm {
    fn from(totals: &LessonTotals) -> Self {
        Self {
            title: totals.lesson.title(),
            pages: totals.pages,
            total_pages: totals.total_pages,
            questions: totals.questions,
            hours_str: format_hours_tr(totals.hours),
            days: totals.days,
            remaining_pages: totals.remaining_pages(),
            repeat_cycle: totals.repeat_cycle,
            percent: totals.percent(),
            has_records: totals.has_records,
        }
    }
}

#[must_use]
pub fn map_lesson_cards(totals: &[LessonTotals]) -> Vec<LessonCardVm> {
    totals.iter().map(LessonCardVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayRowVm {
    pub date_str: String,
    pub pages: u64,
    pub questions: u64,
    pub hours_str: String,
    pub pages_per_hour: String,
    pub questions_per_hour: String,
}

impl From<&DayTotals> for DayRowVm {
    fn from(day: &DayTotals) -> Self {
        Self {
            date_str: format_date_tr(day.date),
            pages: day.pages,
            questions: day.questions,
            hours_str: format_hours_tr(day.hours),
            pages_per_hour: format_rate(day.pages_per_hour()),
            questions_per_hour: format_rate(day.questions_per_hour()),
        }
    }
}

/// Day rows, newest first.
#[must_use]
pub fn map_day_rows<'a>(days: impl Iterator<Item = &'a DayTotals>) -> Vec<DayRowVm> {
    days.map(DayRowVm::from).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordRowVm {
    pub id: RecordId,
    pub title: &'static str,
    pub date_str: String,
    pub pages: u32,
    pub total_pages: u32,
    pub repeat_cycle: u32,
    pub hours_str: String,
    pub questions: u32,
}

impl From<&StudyRecord> for RecordRowVm {
    fn from(record: &StudyRecord) -> Self {
        Self {
            id: record.id().clone(),
            title: record.lesson().title(),
            date_str: format_date_tr(record.date()),
            pages: record.pages_studied(),
            total_pages: record.total_pages(),
            repeat_cycle: record.repeat_cycle(),
            hours_str: format_hours_tr(record.hours_studied()),
            questions: record.questions_solved(),
        }
    }
}

#[must_use]
pub fn map_record_rows(records: &[&StudyRecord]) -> Vec<RecordRowVm> {
    records.iter().map(|record| RecordRowVm::from(*record)).collect()
}
