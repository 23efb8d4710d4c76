use dioxus::prelude::*;
use services::EntryServiceError;
use study_core::model::Lesson;

use crate::context::AppContext;
use crate::views::{SaveState, ViewError};
use crate::vm::{entry_error_message, lesson_options};

/// Session entry form. Calls `on_saved` after a record was stored.
#[component]
pub fn EntryFormView(on_saved: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let entries = ctx.entries();
    let preferences = ctx.preferences();

    let mut form = use_signal({
        let entries = entries.clone();
        move || entries.blank_form(None)
    });
    let mut error = use_signal(|| None::<String>);
    let mut save_state = use_signal(|| SaveState::Idle);

    let last_lesson = use_resource({
        let preferences = preferences.clone();
        move || {
            let preferences = preferences.clone();
            async move { preferences.last_lesson().await }
        }
    });

    use_effect(move || {
        if let Some(Some(lesson)) = *last_lesson.read() {
            if form.peek().lesson.is_empty() {
                form.write().lesson = lesson.title().to_string();
            }
        }
    });

    let on_lesson_change = {
        let preferences = preferences.clone();
        use_callback(move |value: String| {
            form.write().lesson.clone_from(&value);
            if let Ok(lesson) = value.parse::<Lesson>() {
                let preferences = preferences.clone();
                spawn(async move {
                    preferences.remember_lesson(lesson).await;
                });
            }
        })
    };

    let on_submit = {
        let entries = entries.clone();
        use_callback(move |()| {
            let value = form();
            let entries = entries.clone();
            spawn(async move {
                save_state.set(SaveState::Saving);
                match entries.submit(&value).await {
                    Ok(_) => {
                        form.set(entries.cleared_form(&value));
                        error.set(None);
                        save_state.set(SaveState::Saved);
                        on_saved.call(());
                    }
                    Err(EntryServiceError::Entry(err)) => {
                        error.set(Some(entry_error_message(&err).to_string()));
                        save_state.set(SaveState::Idle);
                    }
                    Err(_) => {
                        error.set(Some(ViewError::Save.message().to_string()));
                        save_state.set(SaveState::Error(ViewError::Save));
                    }
                }
            });
        })
    };

    let form_value = form();
    let options = lesson_options();
    let saving = save_state() == SaveState::Saving;
    let status_label = match save_state() {
        SaveState::Saving => Some("Kaydediliyor..."),
        SaveState::Saved => Some("Kaydedildi"),
        SaveState::Error(_) | SaveState::Idle => None,
    };

    rsx! {
        section { class: "entry-form",
            h3 { "Çalışma Ekle" }
            div { class: "form-row",
                label { "Tarih" }
                input {
                    r#type: "date",
                    value: "{form_value.date}",
                    oninput: move |evt| form.write().date = evt.value(),
                }
            }
            div { class: "form-row",
                label { "Ders" }
                select {
                    value: "{form_value.lesson}",
                    onchange: move |evt| on_lesson_change.call(evt.value()),
                    option { value: "", disabled: true, "Ders seçin" }
                    for opt in options {
                        option {
                            key: "{opt.value}",
                            value: "{opt.value}",
                            selected: opt.value == form_value.lesson,
                            "{opt.label}"
                        }
                    }
                }
            }
            div { class: "form-row",
                label { "Çalışılan Sayfa" }
                input {
                    r#type: "number",
                    min: "1",
                    value: "{form_value.pages}",
                    oninput: move |evt| form.write().pages = evt.value(),
                }
            }
            div { class: "form-row",
                label { "Saat" }
                input {
                    r#type: "number",
                    min: "0",
                    value: "{form_value.hours}",
                    oninput: move |evt| form.write().hours = evt.value(),
                }
                label { "Dakika" }
                input {
                    r#type: "number",
                    min: "0",
                    max: "59",
                    value: "{form_value.minutes}",
                    oninput: move |evt| form.write().minutes = evt.value(),
                }
            }
            div { class: "form-row",
                label { "Çözülen Soru" }
                input {
                    r#type: "number",
                    min: "0",
                    value: "{form_value.questions}",
                    oninput: move |evt| form.write().questions = evt.value(),
                }
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            div { class: "form-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: saving,
                    onclick: move |_| on_submit.call(()),
                    "Kaydet"
                }
                if let Some(label) = status_label {
                    span { class: "save-status", "{label}" }
                }
            }
        }
    }
}
