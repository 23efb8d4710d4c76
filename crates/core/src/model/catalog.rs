use std::collections::BTreeMap;

use crate::model::Lesson;

/// Page count used for a lesson that has never been configured.
pub const DEFAULT_TOTAL_PAGES: u32 = 1;

/// Per-lesson "total pages" configuration.
///
/// Every lesson always has a positive page count; unset lessons read as
/// [`DEFAULT_TOTAL_PAGES`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonCatalog {
    pages: BTreeMap<Lesson, u32>,
}

impl LessonCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total pages configured for `lesson`, or the default.
    #[must_use]
    pub fn get(&self, lesson: Lesson) -> u32 {
        self.pages
            .get(&lesson)
            .copied()
            .unwrap_or(DEFAULT_TOTAL_PAGES)
    }

    /// Whether `lesson` has a real page count.
    ///
    /// Batch saves store every lesson, so an entry holding the default still
    /// counts as unconfigured.
    #[must_use]
    pub fn is_configured(&self, lesson: Lesson) -> bool {
        self.get(lesson) != DEFAULT_TOTAL_PAGES
    }

    /// Sets the page count; zero is stored as the default.
    pub fn set(&mut self, lesson: Lesson, total_pages: u32) {
        self.pages.insert(lesson, total_pages.max(DEFAULT_TOTAL_PAGES));
    }

    #[must_use]
    pub fn with(mut self, lesson: Lesson, total_pages: u32) -> Self {
        self.set(lesson, total_pages);
        self
    }

    /// Configured entries only, in lesson order.
    pub fn iter(&self) -> impl Iterator<Item = (Lesson, u32)> + '_ {
        self.pages.iter().map(|(lesson, pages)| (*lesson, *pages))
    }

    /// Every lesson with its effective page count, as written by a batch save.
    #[must_use]
    pub fn filled(&self) -> Vec<(Lesson, u32)> {
        Lesson::ALL
            .into_iter()
            .map(|lesson| (lesson, self.get(lesson)))
            .collect()
    }
}

impl FromIterator<(Lesson, u32)> for LessonCatalog {
    fn from_iter<I: IntoIterator<Item = (Lesson, u32)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (lesson, pages) in iter {
            catalog.set(lesson, pages);
        }
        catalog
    }
}

/// Keystroke filter for page-count inputs.
///
/// Returns the candidate when it is digits only (or empty), otherwise keeps
/// `current`. Non-matching input is ignored rather than reported.
#[must_use]
pub fn accept_pages_input(current: &str, candidate: &str) -> String {
    if candidate.chars().all(|ch| ch.is_ascii_digit()) {
        candidate.to_string()
    } else {
        current.to_string()
    }
}

/// Parse a page-count input, treating empty, zero and garbage as the default.
#[must_use]
pub fn parse_total_pages(value: &str) -> u32 {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|pages| *pages > 0)
        .unwrap_or(DEFAULT_TOTAL_PAGES)
}

/// Editable string fields of the catalog page, one per lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogForm {
    fields: BTreeMap<Lesson, String>,
}

impl CatalogForm {
    /// Prefill from stored values; unconfigured lessons start empty.
    #[must_use]
    pub fn from_catalog(catalog: &LessonCatalog) -> Self {
        Self {
            fields: catalog
                .iter()
                .map(|(lesson, pages)| (lesson, pages.to_string()))
                .collect(),
        }
    }

    #[must_use]
    pub fn field(&self, lesson: Lesson) -> &str {
        self.fields.get(&lesson).map_or("", String::as_str)
    }

    /// Apply one keystroke through [`accept_pages_input`].
    ///
    /// Returns `false` when the candidate was rejected and the field kept
    /// its previous value.
    pub fn input(&mut self, lesson: Lesson, candidate: &str) -> bool {
        let next = accept_pages_input(self.field(lesson), candidate);
        let accepted = next == candidate;
        self.fields.insert(lesson, next);
        accepted
    }

    /// Every lesson mapped; empty, zero or garbage fields become the default.
    #[must_use]
    pub fn to_catalog(&self) -> LessonCatalog {
        Lesson::ALL
            .into_iter()
            .map(|lesson| (lesson, parse_total_pages(self.field(lesson))))
            .collect()
    }
}
