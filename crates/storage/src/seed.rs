//! Sample data for demos and manual testing.

use chrono::{Duration, NaiveDate};
use study_core::entry::ValidEntry;
use study_core::model::Lesson;
use study_core::repeat::RepeatCounter;
use tracing::info;

use crate::repository::{Storage, StorageError};

const SAMPLE_PAGES: [(Lesson, u32); 11] = [
    (Lesson::Anatomy, 620),
    (Lesson::Pathology, 880),
    (Lesson::Pharmacology, 540),
    (Lesson::Microbiology, 610),
    (Lesson::Biochemistry, 470),
    (Lesson::PhysiologyHistologyEmbryology, 720),
    (Lesson::InternalMedicine, 1150),
    (Lesson::Pediatrics, 830),
    (Lesson::ObstetricsGynecology, 560),
    (Lesson::GeneralSurgery, 690),
    (Lesson::MinorInternships, 900),
];

/// Fill unconfigured catalog entries and append two sessions per day for the
/// `days` days ending at `today`.
///
/// Existing records are kept; new ones continue their repeat cycles.
/// Returns the number of appended records.
///
/// # Errors
///
/// Returns `StorageError` if the store cannot be read or written.
pub async fn seed_sample(
    storage: &Storage,
    today: NaiveDate,
    days: u32,
) -> Result<u32, StorageError> {
    let mut catalog = storage.catalog.load_catalog().await?;
    for (lesson, pages) in SAMPLE_PAGES {
        if !catalog.is_configured(lesson) {
            catalog.set(lesson, pages);
        }
    }
    storage.catalog.save_catalog(&catalog).await?;

    let existing = storage.records.list_records().await?;
    let mut counter = RepeatCounter::from_records(&existing);
    let mut appended = 0_u32;

    for i in 0..days {
        let date = today - Duration::days(i64::from(days - 1 - i));
        for (step, lesson) in (0_u32..).zip(lessons_for_day(i)) {
            let entry = ValidEntry {
                lesson,
                date,
                pages: 15 + (i * 7 + step * 11) % 40,
                hours: 1 + (i + step) % 3,
                minutes: (i * 20 + step * 15) % 60,
                questions: 20 + (i * 13 + step * 9) % 80,
            };
            let (record, _) = entry.into_record(&catalog, &mut counter);
            storage.records.append_record(record).await?;
            appended += 1;
        }
    }

    info!(appended, days, "seeded sample study records");
    Ok(appended)
}

fn lessons_for_day(day: u32) -> [Lesson; 2] {
    let len = Lesson::ALL.len();
    let first = usize::try_from(day).unwrap_or(0) % len;
    [Lesson::ALL[first], Lesson::ALL[(first + 4) % len]]
}
