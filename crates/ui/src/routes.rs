use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{CatalogView, HomeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/catalog", CatalogView)] Catalog {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let version = env!("CARGO_PKG_VERSION");
    rsx! {
        nav { class: "sidebar",
            h1 { "TUS Çalışma Takibi" }
            ul {
                li { Link { to: Route::Home {}, "Ana Sayfa" } }
                li { Link { to: Route::Catalog {}, "Ders Sayfaları" } }
            }
            p { class: "sidebar-version", "v{version}" }
        }
    }
}
