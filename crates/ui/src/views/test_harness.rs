use std::sync::Arc;

use chrono::NaiveDate;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AppServices, CatalogService, Clock, EntryService, PreferenceService, ProgressService,
};
use storage::repository::Storage;
use study_core::countdown::default_exam_date;
use study_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::{CatalogView, HomeView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
    exam_date: NaiveDate,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn exam_date(&self) -> NaiveDate {
        self.exam_date
    }

    fn entries(&self) -> Arc<EntryService> {
        self.services.entries()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn preferences(&self) -> Arc<PreferenceService> {
        self.services.preferences()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Catalog,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Catalog => rsx! { CatalogView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub async fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        self.drive_async().await;
        self.drive_async().await;
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory(), default_exam_date())
}

pub fn setup_view_harness_with_storage(
    view: ViewKind,
    storage: Storage,
    exam_date: NaiveDate,
) -> ViewHarness {
    let services = AppServices::from_storage(&storage, fixed_clock());
    let app = Arc::new(TestApp {
        services,
        exam_date,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, storage }
}
