use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::countdown::CountdownWidget;
use crate::views::entry::EntryFormView;
use crate::views::progress::ProgressSection;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();

    let mut resource = use_resource(move || {
        let progress = progress.clone();
        async move { progress.snapshot().await.map_err(|_| ViewError::Load) }
    });
    let state = view_state_from_resource(&resource);

    let on_changed = use_callback(move |()| resource.restart());

    rsx! {
        div { class: "page",
            h2 { "Ana Sayfa" }
            CountdownWidget {}
            EntryFormView { on_saved: on_changed }

            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Yükleniyor..." }
                },
                ViewState::Ready(snapshot) => rsx! {
                    ProgressSection { snapshot, on_changed }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}
