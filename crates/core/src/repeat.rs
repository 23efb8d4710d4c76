//! Repeat-cycle bookkeeping.
//!
//! A lesson's repeat cycle counts how many times its full page count has
//! been covered. Pages recorded in a cycle accumulate until they reach the
//! catalog total; the session that gets there advances the cycle by one and
//! only the overflow is recorded against the new one.

use std::collections::HashMap;

use crate::model::{Lesson, StudyRecord};

/// Cycle number a lesson starts in.
pub const FIRST_CYCLE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct CycleState {
    cycle: u32,
    pages: u64,
}

/// Result of applying one session to the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Cycle the new record belongs to.
    pub repeat_cycle: u32,
    /// Pages to record for the session (the overflow when a cycle completed).
    pub pages_studied: u32,
    /// Whether this session reached the lesson's total.
    pub completed: bool,
}

impl CycleOutcome {
    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }
}

/// In-memory lesson → current cycle mapping, rebuilt from stored records.
#[derive(Debug, Clone, Default)]
pub struct RepeatCounter {
    lessons: HashMap<Lesson, CycleState>,
}

impl RepeatCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the counter from records in store order.
    ///
    /// A lesson's current cycle is the cycle of its most recent record; its
    /// cycle pages are the pages recorded in that cycle.
    #[must_use]
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a StudyRecord>,
    {
        let mut lessons: HashMap<Lesson, CycleState> = HashMap::new();
        for record in records {
            let state = lessons.entry(record.lesson()).or_default();
            if record.repeat_cycle() != state.cycle {
                state.cycle = record.repeat_cycle();
                state.pages = 0;
            }
            state.pages += u64::from(record.pages_studied());
        }
        Self { lessons }
    }

    #[must_use]
    pub fn current_cycle(&self, lesson: Lesson) -> u32 {
        self.lessons
            .get(&lesson)
            .map_or(FIRST_CYCLE, |state| state.cycle.max(FIRST_CYCLE))
    }

    /// Pages recorded so far in the lesson's current cycle.
    #[must_use]
    pub fn cycle_pages(&self, lesson: Lesson) -> u64 {
        self.lessons.get(&lesson).map_or(0, |state| state.pages)
    }

    /// Account for a new session of `pages` against a lesson of `total_pages`.
    ///
    /// Reaching the total advances the cycle by one; the pages beyond the
    /// total are recorded against the new cycle.
    pub fn apply(&mut self, lesson: Lesson, pages: u32, total_pages: u32) -> CycleOutcome {
        let total = u64::from(total_pages.max(1));
        let current = self.current_cycle(lesson);
        let cumulative = self.cycle_pages(lesson) + u64::from(pages);

        if cumulative >= total {
            let overflow = cumulative - total;
            self.lessons.insert(
                lesson,
                CycleState {
                    cycle: current.saturating_add(1),
                    pages: overflow,
                },
            );
            CycleOutcome {
                repeat_cycle: current.saturating_add(1),
                pages_studied: u32::try_from(overflow).unwrap_or(u32::MAX),
                completed: true,
            }
        } else {
            self.lessons.insert(
                lesson,
                CycleState {
                    cycle: current,
                    pages: cumulative,
                },
            );
            CycleOutcome {
                repeat_cycle: current,
                pages_studied: pages,
                completed: false,
            }
        }
    }
}
