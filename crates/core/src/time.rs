use chrono::{Local, NaiveDate};

/// Where "today" comes from.
///
/// Services and views never read the system clock directly so tests can pin
/// the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// The local calendar day of the machine.
    #[default]
    Default,
    Fixed(NaiveDate),
}

impl Clock {
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    #[must_use]
    pub fn fixed(day: NaiveDate) -> Self {
        Self::Fixed(day)
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::Default => Local::now().date_naive(),
            Clock::Fixed(day) => *day,
        }
    }
}

/// Deterministic day used across tests (2023-11-14).
#[must_use]
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 11, 14).unwrap_or_default()
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_today())
}
