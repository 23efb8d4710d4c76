//! Days-to-exam countdown.

use chrono::{Datelike, NaiveDate};

/// Exam day the countdown targets unless configured otherwise.
#[must_use]
pub fn default_exam_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap_or_default()
}

/// Snapshot of the countdown for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCountdown {
    /// Days until the target; negative once it has passed.
    pub days_left: i64,
    /// Days until the target's month/day next comes around (0 on the day itself).
    pub days_to_next: i64,
}

impl DayCountdown {
    #[must_use]
    pub fn compute(today: NaiveDate, target: NaiveDate) -> Self {
        let days_left = (target - today).num_days();
        let next = next_occurrence(today, target);
        Self {
            days_left,
            days_to_next: (next - today).num_days(),
        }
    }

    #[must_use]
    pub fn has_passed(&self) -> bool {
        self.days_left < 0
    }

    /// "Sınava Kalan Gün: N" or "Sınav Geçeli Gün: N".
    #[must_use]
    pub fn headline_tr(&self) -> String {
        if self.has_passed() {
            format!("Sınav Geçeli Gün: {}", self.days_left.unsigned_abs())
        } else {
            format!("Sınava Kalan Gün: {}", self.days_left)
        }
    }

    #[must_use]
    pub fn next_line_tr(&self) -> String {
        format!("Bir Sonraki Sınava Kalan Gün: {}", self.days_to_next)
    }
}

/// The target's month/day in `today`'s year, or the following year if already past.
#[must_use]
pub fn next_occurrence(today: NaiveDate, target: NaiveDate) -> NaiveDate {
    let this_year = anniversary(today.year(), target);
    if this_year < today {
        anniversary(today.year() + 1, target)
    } else {
        this_year
    }
}

// Feb 29 falls back to Feb 28 in common years.
fn anniversary(year: i32, target: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, target.month(), target.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, target.month(), target.day() - 1))
        .unwrap_or(target)
}
