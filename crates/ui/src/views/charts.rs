use dioxus::prelude::*;
use study_core::aggregate::DayTotals;
use study_core::format::format_hours_tr;

use crate::vm::chart::{HOURS_COLOR, PAGES_COLOR, QUESTIONS_COLOR};
use crate::vm::{DayBars, LineChartVm};

#[component]
pub fn DailyLineChart(days: Vec<DayTotals>) -> Element {
    let Some(chart) = LineChartVm::from_days(&days) else {
        return rsx! {};
    };

    rsx! {
        section { class: "line-chart",
            h3 { "Günlük Grafik" }
            div { class: "chart-legend",
                for series in chart.series.iter() {
                    span { key: "{series.name}", class: "legend-item",
                        span { class: "legend-swatch", style: "background: {series.color};" }
                        "{series.name}"
                    }
                }
            }
            div { class: "chart-scroll",
                svg {
                    width: "{chart.width}",
                    height: "{chart.height}",
                    view_box: "0 0 {chart.width} {chart.height}",
                    for y in chart.grid_ys.iter() {
                        line {
                            x1: "{chart.padding}",
                            y1: "{y}",
                            x2: "{chart.plot_right}",
                            y2: "{y}",
                            stroke: "#e0e0e0",
                        }
                    }
                    for series in chart.series.iter() {
                        g { key: "{series.name}",
                            path {
                                d: "{series.path}",
                                fill: "none",
                                stroke: "{series.color}",
                                stroke_width: "2",
                            }
                            for point in series.points.iter() {
                                circle {
                                    cx: "{point.x}",
                                    cy: "{point.y}",
                                    r: "3",
                                    fill: "{series.color}",
                                }
                                text {
                                    x: "{point.x}",
                                    y: "{point.label_y}",
                                    font_size: "10",
                                    text_anchor: "middle",
                                    "{point.label}"
                                }
                            }
                        }
                    }
                    for (x, label) in chart.x_labels.iter() {
                        text {
                            x: "{x}",
                            y: "{chart.axis_label_y}",
                            font_size: "11",
                            text_anchor: "middle",
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn DailyBarChart(bars: Vec<DayBars>) -> Element {
    if bars.is_empty() {
        return rsx! {};
    }

    rsx! {
        section { class: "bar-chart",
            h3 { "Günlük Çalışma" }
            for bar in bars {
                div { key: "{bar.date_str}", class: "bar-row",
                    span { class: "bar-date", "{bar.date_str}" }
                    BarLine { label: "Sayfa", value: bar.pages.to_string(), pct: bar.pages_pct, color: PAGES_COLOR }
                    BarLine { label: "Soru", value: bar.questions.to_string(), pct: bar.questions_pct, color: QUESTIONS_COLOR }
                    BarLine { label: "Saat", value: format_hours_tr(bar.hours), pct: bar.hours_pct, color: HOURS_COLOR }
                }
            }
        }
    }
}

#[component]
fn BarLine(label: &'static str, value: String, pct: f64, color: &'static str) -> Element {
    rsx! {
        div { class: "bar-line",
            span { class: "bar-label", "{label}" }
            div { class: "bar-track",
                div { class: "bar-fill", style: "width: {pct}%; background: {color};" }
            }
            span { class: "bar-value", "{value}" }
        }
    }
}
