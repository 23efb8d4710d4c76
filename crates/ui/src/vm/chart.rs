//! Geometry for the daily charts.
//!
//! Every series is scaled against its own maximum over the visible days,
//! floored at 1 so an all-zero series draws flat instead of dividing by zero.

use study_core::aggregate::DayTotals;
use study_core::format::{format_date_tr, format_hours_tr};

pub const LINE_MIN_WIDTH: f64 = 400.0;
pub const LINE_STEP_WIDTH: f64 = 70.0;
pub const LINE_HEIGHT: f64 = 220.0;
pub const LINE_PADDING: f64 = 44.0;

pub const PAGES_COLOR: &str = "#4caf50";
pub const QUESTIONS_COLOR: &str = "#2196f3";
pub const HOURS_COLOR: &str = "#ffb300";

/// Fractions of the plot height where horizontal grid lines go.
pub const GRID_FRACTIONS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

fn series_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0_f64, f64::max).max(1.0)
}

#[allow(clippy::cast_precision_loss)]
fn pages(day: &DayTotals) -> f64 {
    day.pages as f64
}

#[allow(clippy::cast_precision_loss)]
fn questions(day: &DayTotals) -> f64 {
    day.questions as f64
}

fn hours(day: &DayTotals) -> f64 {
    day.hours
}

/// `value / max * 100`, in percent of the bar track.
#[must_use]
pub fn bar_width(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

/// Bar lengths for one day, each metric relative to its own maximum.
#[derive(Clone, Debug, PartialEq)]
pub struct DayBars {
    pub date_str: String,
    pub pages: u64,
    pub pages_pct: f64,
    pub questions: u64,
    pub questions_pct: f64,
    pub hours: f64,
    pub hours_pct: f64,
}

/// Daily bar chart rows, in the order of `days`.
#[must_use]
pub fn bar_widths(days: &[DayTotals]) -> Vec<DayBars> {
    let max_pages = series_max(days.iter().map(pages));
    let max_questions = series_max(days.iter().map(questions));
    let max_hours = series_max(days.iter().map(hours));

    days.iter()
        .map(|day| DayBars {
            date_str: format_date_tr(day.date),
            pages: day.pages,
            pages_pct: bar_width(pages(day), max_pages),
            questions: day.questions,
            questions_pct: bar_width(questions(day), max_questions),
            hours: day.hours,
            hours_pct: bar_width(day.hours, max_hours),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
    /// Baseline of the value label, just above the point.
    pub label_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineSeries {
    pub name: &'static str,
    pub color: &'static str,
    pub points: Vec<ChartPoint>,
    /// SVG path data: `M x,y L x,y ...`.
    pub path: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineChartVm {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Right edge of the plot area.
    pub plot_right: f64,
    /// Baseline of the date labels under the plot.
    pub axis_label_y: f64,
    /// `(x, label)` for each day along the bottom axis.
    pub x_labels: Vec<(f64, String)>,
    /// y coordinate of each grid line.
    pub grid_ys: Vec<f64>,
    pub series: Vec<LineSeries>,
}

/// `max(400, 70 * n)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn line_chart_width(days: usize) -> f64 {
    (LINE_STEP_WIDTH * days as f64).max(LINE_MIN_WIDTH)
}

/// Horizontal distance between consecutive points.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn step_x(width: f64, days: usize) -> f64 {
    let gaps = days.saturating_sub(1).max(1);
    (width - 2.0 * LINE_PADDING) / gaps as f64
}

/// Position of value `value` at index `index` on a series normalised to `max`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn point_at(index: usize, value: f64, max: f64, step: f64) -> (f64, f64) {
    let plot_height = LINE_HEIGHT - 2.0 * LINE_PADDING;
    let x = LINE_PADDING + index as f64 * step;
    let y = LINE_HEIGHT - LINE_PADDING - (value / max) * plot_height;
    (x, y)
}

/// `M x,y L x,y ...` through the given points.
#[must_use]
pub fn svg_path(points: &[ChartPoint]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let cmd = if i == 0 { 'M' } else { 'L' };
            format!("{cmd} {:.2},{:.2}", p.x, p.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn series(
    name: &'static str,
    color: &'static str,
    days: &[DayTotals],
    step: f64,
    value: fn(&DayTotals) -> f64,
    label: fn(&DayTotals) -> String,
) -> LineSeries {
    let max = series_max(days.iter().map(value));
    let points: Vec<ChartPoint> = days
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let (x, y) = point_at(i, value(day), max, step);
            ChartPoint {
                x,
                y,
                label: label(day),
                label_y: y - 6.0,
            }
        })
        .collect();
    let path = svg_path(&points);
    LineSeries {
        name,
        color,
        points,
        path,
    }
}

impl LineChartVm {
    /// Chart over `days` (oldest first); `None` when there is nothing to draw.
    #[must_use]
    pub fn from_days(days: &[DayTotals]) -> Option<Self> {
        if days.is_empty() {
            return None;
        }
        let width = line_chart_width(days.len());
        let step = step_x(width, days.len());
        let plot_height = LINE_HEIGHT - 2.0 * LINE_PADDING;

        let x_labels = days
            .iter()
            .enumerate()
            .map(|(i, day)| (point_at(i, 0.0, 1.0, step).0, day.date.format("%d.%m").to_string()))
            .collect();
        let grid_ys = GRID_FRACTIONS
            .iter()
            .map(|fraction| LINE_HEIGHT - LINE_PADDING - fraction * plot_height)
            .collect();

        Some(Self {
            width,
            height: LINE_HEIGHT,
            padding: LINE_PADDING,
            plot_right: width - LINE_PADDING,
            axis_label_y: LINE_HEIGHT - LINE_PADDING + 18.0,
            x_labels,
            grid_ys,
            series: vec![
                series("Sayfa", PAGES_COLOR, days, step, pages, |d| d.pages.to_string()),
                series("Soru", QUESTIONS_COLOR, days, step, questions, |d| {
                    d.questions.to_string()
                }),
                series("Saat", HOURS_COLOR, days, step, hours, |d| format_hours_tr(d.hours)),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, pages: u64, hours: f64, questions: u64) -> DayTotals {
        DayTotals {
            date: NaiveDate::from_ymd_opt(2024, 5, d).unwrap(),
            pages,
            hours,
            questions,
        }
    }

    #[test]
    fn bars_scale_each_metric_to_its_own_max() {
        let bars = bar_widths(&[day(1, 50, 2.0, 10), day(2, 100, 1.0, 40)]);
        assert_eq!(bars[0].pages_pct, 50.0);
        assert_eq!(bars[0].hours_pct, 100.0);
        assert_eq!(bars[0].questions_pct, 25.0);
        assert_eq!(bars[1].pages_pct, 100.0);
        assert_eq!(bars[1].hours_pct, 50.0);
        assert_eq!(bars[0].date_str, "1 Mayıs 2024");
    }

    #[test]
    fn zero_series_floors_max_at_one() {
        let bars = bar_widths(&[day(1, 0, 0.0, 0)]);
        assert_eq!(bars[0].pages_pct, 0.0);
        assert_eq!(bars[0].hours_pct, 0.0);
    }

    #[test]
    fn width_has_a_floor_and_grows_per_day() {
        assert_eq!(line_chart_width(1), 400.0);
        assert_eq!(line_chart_width(5), 400.0);
        assert_eq!(line_chart_width(10), 700.0);
    }

    #[test]
    fn single_point_sits_at_left_padding() {
        let step = step_x(400.0, 1);
        assert_eq!(step, 312.0);
        assert_eq!(point_at(0, 5.0, 5.0, step), (44.0, 44.0));
        assert_eq!(point_at(0, 0.0, 5.0, step), (44.0, 176.0));
    }

    #[test]
    fn chart_points_and_path() {
        let chart = LineChartVm::from_days(&[day(1, 10, 1.0, 0), day(2, 20, 2.0, 0)]).unwrap();
        assert_eq!(chart.width, 400.0);
        assert_eq!(chart.series.len(), 3);

        let pages = &chart.series[0];
        assert_eq!(pages.color, PAGES_COLOR);
        assert_eq!(pages.points[0].x, 44.0);
        assert_eq!(pages.points[1].x, 356.0);
        assert_eq!(pages.points[0].y, 110.0);
        assert_eq!(pages.points[1].y, 44.0);
        assert_eq!(pages.path, "M 44.00,110.00 L 356.00,44.00");

        let questions = &chart.series[1];
        assert!(questions.points.iter().all(|p| p.y == 176.0));
        assert_eq!(chart.grid_ys, vec![143.0, 110.0, 77.0, 44.0]);
        assert_eq!(chart.x_labels[1].1, "02.05");
        assert_eq!(chart.plot_right, 356.0);
        assert_eq!(pages.points[1].label_y, 38.0);
    }

    #[test]
    fn hours_labels_use_turkish_durations() {
        let chart = LineChartVm::from_days(&[day(1, 10, 1.5, 0), day(2, 20, 0.0, 0)]).unwrap();
        let hours = &chart.series[2];
        assert_eq!(hours.name, "Saat");
        assert_eq!(hours.points[0].label, "1 saat 30 dakika");
        assert_eq!(hours.points[1].label, "0 saat");
    }

    #[test]
    fn no_days_no_chart() {
        assert!(LineChartVm::from_days(&[]).is_none());
    }
}
