use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::Link;
use study_core::model::{CatalogForm, Lesson};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{SaveState, ViewError, ViewState, view_state_from_resource};

const RESTORE_VALUE_SCRIPT_TEMPLATE: &str = r#"
    const el = document.getElementById("{element_id}");
    if (el) { el.value = "{value}"; }
"#;

fn pages_input_id(lesson: Lesson) -> String {
    format!("pages-{}", lesson.display_index())
}

fn restore_value_script(element_id: &str, value: &str) -> String {
    RESTORE_VALUE_SCRIPT_TEMPLATE
        .replace("{element_id}", element_id)
        .replace("{value}", value)
}

/// Put the kept value back after a rejected keystroke.
///
/// The field did not change, so the diff has nothing to patch and the
/// browser would keep showing the rejected text.
async fn restore_input_value(element_id: String, value: String) {
    let _ = eval(&restore_value_script(&element_id, &value)).await;
}

/// Per-lesson total pages, saved in one batch.
#[component]
pub fn CatalogView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let catalog_for_resource = catalog.clone();

    let mut form = use_signal(CatalogForm::default);
    let mut loaded = use_signal(|| false);
    let mut show_inputs = use_signal(|| false);
    let mut save_state = use_signal(|| SaveState::Idle);

    let resource = use_resource(move || {
        let catalog = catalog_for_resource.clone();
        async move { catalog.form().await.map_err(|_| ViewError::Load) }
    });
    let state = view_state_from_resource(&resource);

    use_effect(move || {
        let fetched = resource
            .value()
            .read()
            .as_ref()
            .and_then(|value| value.as_ref().ok())
            .cloned();
        if let Some(fetched) = fetched {
            if !*loaded.peek() {
                form.set(fetched);
                loaded.set(true);
            }
        }
    });

    let on_save = use_callback(move |()| {
        let catalog = catalog.clone();
        let value = form();
        spawn(async move {
            save_state.set(SaveState::Saving);
            match catalog.save_form(&value).await {
                Ok(saved) => {
                    form.set(CatalogForm::from_catalog(&saved));
                    save_state.set(SaveState::Saved);
                }
                Err(_) => save_state.set(SaveState::Error(ViewError::Save)),
            }
        });
    });

    let status = match save_state() {
        SaveState::Saving => Some("Kaydediliyor...".to_string()),
        SaveState::Saved => Some("Tüm değişiklikler kaydedildi!".to_string()),
        SaveState::Error(err) => Some(err.message().to_string()),
        SaveState::Idle => None,
    };
    let toggle_label = if show_inputs() {
        "Derslerin Toplam Sayfa Sayısını Gizle"
    } else {
        "Derslerin Toplam Sayfa Sayısını Göster"
    };
    let fields: Vec<(Lesson, &'static str, String)> = {
        let form_value = form();
        Lesson::ALL
            .into_iter()
            .map(|lesson| (lesson, lesson.title(), form_value.field(lesson).to_string()))
            .collect()
    };

    rsx! {
        div { class: "page",
            h2 { "Ders Sayfaları" }
            Link { class: "back-link", to: Route::Home {}, "Ana Sayfaya Dön" }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Yükleniyor..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(_) => rsx! {
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| show_inputs.toggle(),
                        "{toggle_label}"
                    }
                    if show_inputs() {
                        div { class: "catalog-form",
                            for (lesson, title, value) in fields.iter().cloned() {
                                div { key: "{title}", class: "form-row",
                                    label { "{title}" }
                                    input {
                                        id: pages_input_id(lesson),
                                        r#type: "text",
                                        inputmode: "numeric",
                                        placeholder: "1",
                                        value: "{value}",
                                        oninput: move |evt| {
                                            let mut current = form.write();
                                            if !current.input(lesson, &evt.value()) {
                                                let kept = current.field(lesson).to_string();
                                                spawn(restore_input_value(pages_input_id(lesson), kept));
                                            }
                                        },
                                    }
                                }
                            }
                            div { class: "form-actions",
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    disabled: save_state() == SaveState::Saving,
                                    onclick: move |_| on_save.call(()),
                                    "Kaydet"
                                }
                            }
                        }
                    }
                    if let Some(status) = status {
                        p { class: "save-status", "{status}" }
                    }
                },
            }
        }
    }
}
