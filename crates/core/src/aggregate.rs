//! Per-lesson and per-day progress derived from the full record set.
//!
//! Everything here is recomputed from scratch on each change.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::model::{Lesson, LessonCatalog, LessonGroup, StudyRecord};
use crate::repeat::FIRST_CYCLE;

/// `min(100, round(100 * studied / total))`, and 0 for a non-positive total.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn completion_percent(studied: u64, total: i64) -> u8 {
    if total <= 0 {
        return 0;
    }
    let percent = (100.0 * studied as f64 / total as f64).round();
    percent.clamp(0.0, 100.0) as u8
}

//
// ─── LESSON TOTALS ─────────────────────────────────────────────────────────────
//

/// Running totals for one lesson.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonTotals {
    pub lesson: Lesson,
    /// Sum of recorded pages over every record of the lesson.
    pub pages: u64,
    pub questions: u64,
    pub hours: f64,
    /// Distinct calendar days the lesson was studied.
    pub days: usize,
    /// Total pages of the most recent record.
    pub total_pages: u32,
    /// Repeat cycle of the most recent record.
    pub repeat_cycle: u32,
    /// Pages recorded in the current repeat cycle.
    pub cycle_pages: u64,
    /// Whether any record exists for the lesson.
    pub has_records: bool,
}

impl LessonTotals {
    /// Totals for a lesson with no records, using the catalog's page count.
    #[must_use]
    pub fn empty(lesson: Lesson, catalog: &LessonCatalog) -> Self {
        Self {
            lesson,
            pages: 0,
            questions: 0,
            hours: 0.0,
            days: 0,
            total_pages: catalog.get(lesson),
            repeat_cycle: FIRST_CYCLE,
            cycle_pages: 0,
            has_records: false,
        }
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        completion_percent(self.pages, i64::from(self.total_pages))
    }

    #[must_use]
    pub fn remaining_pages(&self) -> u64 {
        u64::from(self.total_pages).saturating_sub(self.pages)
    }
}

//
// ─── DAY TOTALS ────────────────────────────────────────────────────────────────
//

/// Totals for one calendar day across all lessons.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub pages: u64,
    pub hours: f64,
    pub questions: u64,
}

impl DayTotals {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            pages: 0,
            hours: 0.0,
            questions: 0,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pages_per_hour(&self) -> Option<f64> {
        (self.hours > 0.0).then(|| self.pages as f64 / self.hours)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn questions_per_hour(&self) -> Option<f64> {
        (self.hours > 0.0).then(|| self.questions as f64 / self.hours)
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Both derived views over a snapshot of the record store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressReport {
    lessons: BTreeMap<Lesson, LessonTotals>,
    days: Vec<DayTotals>,
}

impl ProgressReport {
    /// Aggregate `records` (in store order) against `catalog`.
    #[must_use]
    pub fn from_records(records: &[StudyRecord], catalog: &LessonCatalog) -> Self {
        let mut lessons: BTreeMap<Lesson, LessonTotals> = BTreeMap::new();
        let mut lesson_days: BTreeMap<Lesson, BTreeSet<NaiveDate>> = BTreeMap::new();
        let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();

        for record in records {
            let lesson = record.lesson();
            let totals = lessons
                .entry(lesson)
                .or_insert_with(|| LessonTotals::empty(lesson, catalog));
            totals.has_records = true;
            totals.pages += u64::from(record.pages_studied());
            totals.questions += u64::from(record.questions_solved());
            totals.hours += record.hours_studied();
            if record.repeat_cycle() != totals.repeat_cycle {
                totals.cycle_pages = 0;
            }
            totals.cycle_pages += u64::from(record.pages_studied());
            totals.total_pages = record.total_pages();
            totals.repeat_cycle = record.repeat_cycle();
            lesson_days.entry(lesson).or_default().insert(record.date());

            let day = days
                .entry(record.date())
                .or_insert_with(|| DayTotals::new(record.date()));
            day.pages += u64::from(record.pages_studied());
            day.hours += record.hours_studied();
            day.questions += u64::from(record.questions_solved());
        }

        for (lesson, dates) in lesson_days {
            if let Some(totals) = lessons.get_mut(&lesson) {
                totals.days = dates.len();
            }
        }

        Self {
            lessons,
            days: days.into_values().collect(),
        }
    }

    /// Totals for lessons that have records, in fixed display order.
    pub fn lesson_totals(&self) -> impl Iterator<Item = &LessonTotals> {
        self.lessons.values()
    }

    #[must_use]
    pub fn lesson(&self, lesson: Lesson) -> Option<&LessonTotals> {
        self.lessons.get(&lesson)
    }

    /// Totals for `lesson`, or a catalog-driven placeholder if it has no records.
    #[must_use]
    pub fn lesson_card(&self, lesson: Lesson, catalog: &LessonCatalog) -> LessonTotals {
        self.lessons
            .get(&lesson)
            .cloned()
            .unwrap_or_else(|| LessonTotals::empty(lesson, catalog))
    }

    /// One card per lesson of `group`, with catalog placeholders for unstudied lessons.
    #[must_use]
    pub fn lesson_cards(&self, group: LessonGroup, catalog: &LessonCatalog) -> Vec<LessonTotals> {
        group
            .lessons()
            .map(|lesson| self.lesson_card(lesson, catalog))
            .collect()
    }

    /// Day totals, oldest first.
    #[must_use]
    pub fn days(&self) -> &[DayTotals] {
        &self.days
    }

    /// Day totals, newest first.
    pub fn days_newest_first(&self) -> impl Iterator<Item = &DayTotals> {
        self.days.iter().rev()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Records ordered newest day first; records of the same day keep store order.
#[must_use]
pub fn newest_first(records: &[StudyRecord]) -> Vec<&StudyRecord> {
    let mut sorted: Vec<&StudyRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date().cmp(&a.date()));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewStudyRecord, RecordId};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn record(lesson: Lesson, date: NaiveDate, pages: u32, total: u32, cycle: u32) -> StudyRecord {
        NewStudyRecord {
            lesson,
            date,
            pages_studied: pages,
            total_pages: total,
            repeat_cycle: cycle,
            hours_studied: 0.5,
            questions_solved: 10,
        }
        .assign_id(RecordId::generate())
    }

    #[test]
    fn percent_is_clamped_and_guarded() {
        assert_eq!(completion_percent(50, 100), 50);
        assert_eq!(completion_percent(250, 100), 100);
        assert_eq!(completion_percent(10, 0), 0);
        assert_eq!(completion_percent(10, -5), 0);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(1, 200), 1);
    }

    #[test]
    fn percent_stays_in_range_for_many_inputs() {
        for studied in [0_u64, 1, 7, 99, 100, 101, 10_000] {
            for total in [-1_i64, 0, 1, 3, 100, 999] {
                assert!(completion_percent(studied, total) <= 100);
            }
        }
    }

    #[test]
    fn lesson_pages_are_summed_and_latest_meta_carried() {
        let records = vec![
            record(Lesson::Anatomy, day(1), 40, 100, 1),
            record(Lesson::Pathology, day(1), 5, 300, 1),
            record(Lesson::Anatomy, day(2), 10, 120, 2),
        ];
        let report = ProgressReport::from_records(&records, &LessonCatalog::new());
        let anatomy = report.lesson(Lesson::Anatomy).unwrap();
        assert_eq!(anatomy.pages, 50);
        assert_eq!(anatomy.questions, 20);
        assert_eq!(anatomy.total_pages, 120);
        assert_eq!(anatomy.repeat_cycle, 2);
        assert_eq!(anatomy.cycle_pages, 10);
        assert_eq!(anatomy.days, 2);
        assert_eq!(anatomy.percent(), 42);
        assert_eq!(anatomy.remaining_pages(), 70);
    }

    #[test]
    fn lesson_order_follows_display_list() {
        let records = vec![
            record(Lesson::MinorInternships, day(1), 1, 10, 1),
            record(Lesson::Anatomy, day(1), 1, 10, 1),
            record(Lesson::InternalMedicine, day(1), 1, 10, 1),
        ];
        let report = ProgressReport::from_records(&records, &LessonCatalog::new());
        let order: Vec<Lesson> = report.lesson_totals().map(|t| t.lesson).collect();
        assert_eq!(
            order,
            vec![
                Lesson::Anatomy,
                Lesson::InternalMedicine,
                Lesson::MinorInternships
            ]
        );
    }

    #[test]
    fn day_totals_sorted_chronologically() {
        let records = vec![
            record(Lesson::Anatomy, day(9), 3, 10, 1),
            record(Lesson::Pathology, day(2), 4, 10, 1),
            record(Lesson::Anatomy, day(9), 5, 10, 1),
            record(Lesson::Anatomy, day(20), 1, 10, 1),
        ];
        let report = ProgressReport::from_records(&records, &LessonCatalog::new());
        let dates: Vec<NaiveDate> = report.days().iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![day(2), day(9), day(20)]);
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));

        let ninth = &report.days()[1];
        assert_eq!(ninth.pages, 8);
        assert_eq!(ninth.questions, 20);
        assert!((ninth.hours - 1.0).abs() < f64::EPSILON);
        assert_eq!(report.days_newest_first().next().unwrap().date, day(20));
    }

    #[test]
    fn per_hour_rates_need_hours() {
        let mut totals = DayTotals::new(day(1));
        assert_eq!(totals.pages_per_hour(), None);
        totals.pages = 30;
        totals.questions = 90;
        totals.hours = 1.5;
        assert_eq!(totals.pages_per_hour(), Some(20.0));
        assert_eq!(totals.questions_per_hour(), Some(60.0));
    }

    #[test]
    fn cards_fill_unstudied_lessons_from_catalog() {
        let catalog = LessonCatalog::new().with(Lesson::Pathology, 640);
        let records = vec![record(Lesson::Anatomy, day(1), 10, 100, 1)];
        let report = ProgressReport::from_records(&records, &catalog);
        let cards = report.lesson_cards(LessonGroup::Basic, &catalog);
        assert_eq!(cards.len(), 6);
        assert!(cards[0].has_records);
        assert_eq!(cards[1].lesson, Lesson::Pathology);
        assert!(!cards[1].has_records);
        assert_eq!(cards[1].total_pages, 640);
        assert_eq!(cards[1].percent(), 0);
    }

    #[test]
    fn empty_records_give_empty_report() {
        let report = ProgressReport::from_records(&[], &LessonCatalog::new());
        assert!(report.is_empty());
        assert_eq!(report.lesson_totals().count(), 0);
    }

    #[test]
    fn newest_first_orders_by_date_desc() {
        let records = vec![
            record(Lesson::Anatomy, day(1), 1, 10, 1),
            record(Lesson::Anatomy, day(3), 2, 10, 1),
            record(Lesson::Anatomy, day(2), 3, 10, 1),
        ];
        let pages: Vec<u32> = newest_first(&records)
            .iter()
            .map(|r| r.pages_studied())
            .collect();
        assert_eq!(pages, vec![2, 3, 1]);
    }
}
