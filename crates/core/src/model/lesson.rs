use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── LESSON GROUPS ─────────────────────────────────────────────────────────────
//

/// The two halves of the exam syllabus. Report views lay cards out one row per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonGroup {
    /// Temel bilimler.
    Basic,
    /// Klinik bilimler.
    Clinical,
}

impl LessonGroup {
    pub const ALL: [LessonGroup; 2] = [LessonGroup::Basic, LessonGroup::Clinical];

    /// Lessons of this group, in display order.
    #[must_use]
    pub fn lessons(self) -> impl Iterator<Item = Lesson> {
        Lesson::ALL
            .into_iter()
            .filter(move |lesson| lesson.group() == self)
    }
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// One of the eleven fixed exam subjects.
///
/// Serialized as its Turkish title so persisted documents stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lesson {
    #[serde(rename = "Anatomi")]
    Anatomy,
    #[serde(rename = "Patoloji")]
    Pathology,
    #[serde(rename = "Farmakoloji")]
    Pharmacology,
    #[serde(rename = "Mikrobiyoloji")]
    Microbiology,
    #[serde(rename = "Biyokimya")]
    Biochemistry,
    #[serde(rename = "Fizyoloji – Histoloji – Embriyoloji")]
    PhysiologyHistologyEmbryology,
    #[serde(rename = "Dahiliye")]
    InternalMedicine,
    #[serde(rename = "Pediatri")]
    Pediatrics,
    #[serde(rename = "Kadın Doğum ve Hastalıklar")]
    ObstetricsGynecology,
    #[serde(rename = "Genel Cerrahi")]
    GeneralSurgery,
    #[serde(rename = "Küçük Stajlar")]
    MinorInternships,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown lesson: {title}")]
pub struct UnknownLesson {
    pub title: String,
}

impl Lesson {
    /// Every lesson in fixed display order: basic sciences first, then clinical.
    pub const ALL: [Lesson; 11] = [
        Lesson::Anatomy,
        Lesson::Pathology,
        Lesson::Pharmacology,
        Lesson::Microbiology,
        Lesson::Biochemistry,
        Lesson::PhysiologyHistologyEmbryology,
        Lesson::InternalMedicine,
        Lesson::Pediatrics,
        Lesson::ObstetricsGynecology,
        Lesson::GeneralSurgery,
        Lesson::MinorInternships,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Lesson::Anatomy => "Anatomi",
            Lesson::Pathology => "Patoloji",
            Lesson::Pharmacology => "Farmakoloji",
            Lesson::Microbiology => "Mikrobiyoloji",
            Lesson::Biochemistry => "Biyokimya",
            Lesson::PhysiologyHistologyEmbryology => "Fizyoloji – Histoloji – Embriyoloji",
            Lesson::InternalMedicine => "Dahiliye",
            Lesson::Pediatrics => "Pediatri",
            Lesson::ObstetricsGynecology => "Kadın Doğum ve Hastalıklar",
            Lesson::GeneralSurgery => "Genel Cerrahi",
            Lesson::MinorInternships => "Küçük Stajlar",
        }
    }

    #[must_use]
    pub fn group(self) -> LessonGroup {
        match self {
            Lesson::Anatomy
            | Lesson::Pathology
            | Lesson::Pharmacology
            | Lesson::Microbiology
            | Lesson::Biochemistry
            | Lesson::PhysiologyHistologyEmbryology => LessonGroup::Basic,
            Lesson::InternalMedicine
            | Lesson::Pediatrics
            | Lesson::ObstetricsGynecology
            | Lesson::GeneralSurgery
            | Lesson::MinorInternships => LessonGroup::Clinical,
        }
    }

    /// Position in [`Lesson::ALL`].
    #[must_use]
    pub fn display_index(self) -> usize {
        Lesson::ALL
            .iter()
            .position(|lesson| *lesson == self)
            .unwrap_or(Lesson::ALL.len())
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Lesson {
    type Err = UnknownLesson;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lesson::ALL
            .into_iter()
            .find(|lesson| lesson.title() == s)
            .ok_or_else(|| UnknownLesson {
                title: s.to_string(),
            })
    }
}
