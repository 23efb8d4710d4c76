//! Turkish display strings for durations and dates.

use chrono::{Datelike, NaiveDate};

const MONTHS_TR: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

/// Fractional hours split into whole hours and rounded minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoursMinutes {
    pub hours: u64,
    pub minutes: u32,
}

impl HoursMinutes {
    /// Decompose `total` hours. Minutes are rounded; a round-up to 60 carries.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn from_hours(total: f64) -> Self {
        if !total.is_finite() || total <= 0.0 {
            return Self::default();
        }
        let whole = total.floor();
        let minutes = ((total - whole) * 60.0).round() as u32;
        let hours = whole as u64;
        if minutes >= 60 {
            Self {
                hours: hours + 1,
                minutes: 0,
            }
        } else {
            Self { hours, minutes }
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }
}

/// "2 saat 15 dakika", "2 saat", "45 dakika", or "0 saat" for nothing.
#[must_use]
pub fn format_hours_tr(total: f64) -> String {
    let hm = HoursMinutes::from_hours(total);
    match (hm.hours, hm.minutes) {
        (0, 0) => "0 saat".to_string(),
        (h, 0) => format!("{h} saat"),
        (0, m) => format!("{m} dakika"),
        (h, m) => format!("{h} saat {m} dakika"),
    }
}

#[must_use]
pub fn month_name_tr(date: NaiveDate) -> &'static str {
    MONTHS_TR[date.month0() as usize]
}

/// "15 Mart 2025".
#[must_use]
pub fn format_date_tr(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name_tr(date), date.year())
}

/// Two-decimal rate, `-` when the divisor is zero.
#[must_use]
pub fn format_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "-".to_string(), |value| format!("{value:.2}"))
}
