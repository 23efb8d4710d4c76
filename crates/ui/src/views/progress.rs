use dioxus::prelude::*;
use services::ProgressSnapshot;
use study_core::model::{LessonGroup, RecordId};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::views::charts::{DailyBarChart, DailyLineChart};
use crate::vm::{
    DayRowVm, LessonCardVm, RecordRowVm, bar_widths, map_day_rows, map_lesson_cards,
    map_record_rows,
};

fn group_title(group: LessonGroup) -> &'static str {
    match group {
        LessonGroup::Basic => "Temel Bilimler",
        LessonGroup::Clinical => "Klinik Bilimler",
    }
}

/// Everything derived from one progress snapshot.
#[component]
pub fn ProgressSection(snapshot: ProgressSnapshot, on_changed: EventHandler<()>) -> Element {
    let report = &snapshot.report;
    let groups: Vec<(&'static str, Vec<LessonCardVm>)> = LessonGroup::ALL
        .into_iter()
        .map(|group| {
            let cards = map_lesson_cards(&report.lesson_cards(group, &snapshot.catalog));
            (group_title(group), cards)
        })
        .collect();
    let days = report.days().to_vec();
    let bars = bar_widths(report.days());
    let day_rows = map_day_rows(report.days_newest_first());
    let record_rows = map_record_rows(&snapshot.records_newest_first());

    rsx! {
        DailyLineChart { days }
        for (title, cards) in groups {
            section { key: "{title}", class: "lesson-group",
                h3 { "{title}" }
                div { class: "lesson-cards",
                    for card in cards {
                        LessonCard { key: "{card.title}", card }
                    }
                }
            }
        }
        DailyBarChart { bars }
        DailyList { rows: day_rows }
        RecordList { rows: record_rows, on_changed }
    }
}

#[component]
fn LessonCard(card: LessonCardVm) -> Element {
    rsx! {
        article { class: if card.has_records { "lesson-card" } else { "lesson-card lesson-card-empty" },
            h4 { "{card.title}" }
            p { "Çalışılan Sayfa: {card.pages} / {card.total_pages}" }
            p { "Çözülen Soru: {card.questions}" }
            p { "Çalışılan Saat: {card.hours_str}" }
            p { "Gün: {card.days}" }
            p { "Toplam Sayfa: {card.total_pages}" }
            p { "Kalan Sayfa: {card.remaining_pages}" }
            p { "Kaçıncı Tekrar: {card.repeat_cycle}" }
            p { "İlerleme: %{card.percent}" }
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {card.percent}%;" }
            }
        }
    }
}

#[component]
fn DailyList(rows: Vec<DayRowVm>) -> Element {
    rsx! {
        section { class: "daily-list",
            h3 { "Günlük Toplamlar" }
            if rows.is_empty() {
                p { "Henüz kayıt yok." }
            } else {
                ul {
                    for row in rows {
                        li { key: "{row.date_str}",
                            strong { "{row.date_str}" }
                            span { " Sayfa: {row.pages}" }
                            span { " Soru: {row.questions}" }
                            span { " Süre: {row.hours_str}" }
                            span { " Saatte Ortalama Sayfa: {row.pages_per_hour}" }
                            span { " Saatte Ortalama Soru: {row.questions_per_hour}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RecordList(rows: Vec<RecordRowVm>, on_changed: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut pending_delete = use_signal(|| None::<RecordId>);
    let mut delete_error = use_signal(|| None::<ViewError>);

    let on_confirm = {
        let entries = ctx.entries();
        use_callback(move |()| {
            let Some(id) = pending_delete() else {
                return;
            };
            let entries = entries.clone();
            spawn(async move {
                match entries.delete(&id).await {
                    Ok(()) => {
                        delete_error.set(None);
                        on_changed.call(());
                    }
                    Err(_) => delete_error.set(Some(ViewError::Delete)),
                }
                pending_delete.set(None);
            });
        })
    };

    rsx! {
        section { class: "record-list",
            h3 { "Kayıtlar" }
            if let Some(err) = delete_error() {
                p { class: "error", "{err.message()}" }
            }
            if rows.is_empty() {
                p { "Henüz kayıt yok." }
            } else {
                ul {
                    for row in rows {
                        RecordRow {
                            key: "{row.id}",
                            row: row.clone(),
                            on_delete: move |id| pending_delete.set(Some(id)),
                        }
                    }
                }
            }
            if pending_delete().is_some() {
                div { class: "modal-backdrop",
                    div { class: "modal",
                        p { "Silmek istediğinize emin misiniz?" }
                        div { class: "modal-actions",
                            button {
                                class: "btn btn-danger",
                                r#type: "button",
                                onclick: move |_| on_confirm.call(()),
                                "Evet"
                            }
                            button {
                                class: "btn",
                                r#type: "button",
                                onclick: move |_| pending_delete.set(None),
                                "Hayır"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RecordRow(row: RecordRowVm, on_delete: EventHandler<RecordId>) -> Element {
    let id = row.id.clone();
    rsx! {
        li { class: "record-row",
            span { class: "record-date", "{row.date_str}" }
            span { class: "record-title", " {row.title}" }
            span { " Sayfa: {row.pages} / {row.total_pages}" }
            span { " Tekrar: {row.repeat_cycle}" }
            span { " Süre: {row.hours_str}" }
            span { " Soru: {row.questions}" }
            button {
                class: "btn btn-small",
                r#type: "button",
                onclick: move |_| on_delete.call(id.clone()),
                "Sil"
            }
        }
    }
}
