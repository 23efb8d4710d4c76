pub mod chart;
mod entry_vm;
mod progress_vm;

pub use chart::{DayBars, LineChartVm, LineSeries, bar_widths};
pub use entry_vm::{LessonOptionVm, entry_error_message, lesson_options};
pub use progress_vm::{
    DayRowVm, LessonCardVm, RecordRowVm, map_day_rows, map_lesson_cards, map_record_rows,
};
