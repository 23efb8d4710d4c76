use std::time::Duration;

use dioxus::prelude::*;
use study_core::countdown::DayCountdown;
use study_core::format::format_date_tr;

use crate::context::AppContext;

const REFRESH_EVERY: Duration = Duration::from_secs(60);

/// Days to the exam. The ticking task belongs to this component and is
/// dropped with it.
#[component]
pub fn CountdownWidget() -> Element {
    let ctx = use_context::<AppContext>();
    let clock = ctx.clock();
    let exam_date = ctx.exam_date();
    let mut today = use_signal(|| clock.today());

    use_future(move || async move {
        let mut ticker = tokio::time::interval(REFRESH_EVERY);
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let now = clock.today();
            if *today.peek() != now {
                today.set(now);
            }
        }
    });

    let countdown = DayCountdown::compute(today(), exam_date);
    let headline = countdown.headline_tr();
    let next_line = countdown.next_line_tr();
    let exam_str = format_date_tr(exam_date);

    rsx! {
        section { class: "countdown",
            p { class: "countdown-headline", "{headline}" }
            p { class: "countdown-next", "{next_line}" }
            p { class: "countdown-date", "Sınav tarihi: {exam_str}" }
        }
    }
}
