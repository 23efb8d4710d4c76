use study_core::entry::EntryError;
use study_core::model::Lesson;

/// User-facing text for a rejected entry.
#[must_use]
pub fn entry_error_message(err: &EntryError) -> &'static str {
    match err {
        EntryError::InvalidDate(_) => "Geçerli bir tarih seçin.",
        EntryError::MissingLesson => "Lütfen bir ders seçin.",
        EntryError::UnknownLesson(_) => "Seçilen ders listede yok.",
        EntryError::InvalidPages => "Çalışılan sayfa en az 1 olmalı.",
        EntryError::InvalidHours => "Saat 0 veya daha büyük bir tam sayı olmalı.",
        EntryError::InvalidMinutes => "Dakika 0 ile 59 arasında olmalı.",
        EntryError::InvalidQuestions => "Çözülen soru 0 veya daha büyük bir tam sayı olmalı.",
        _ => "Girdi geçersiz.",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonOptionVm {
    pub value: &'static str,
    pub label: String,
}

/// Entry form `<option>`s, numbered in display order.
#[must_use]
pub fn lesson_options() -> Vec<LessonOptionVm> {
    Lesson::ALL
        .into_iter()
        .map(|lesson| LessonOptionVm {
            value: lesson.title(),
            label: format!("{}. {}", lesson.display_index() + 1, lesson.title()),
        })
        .collect()
}
