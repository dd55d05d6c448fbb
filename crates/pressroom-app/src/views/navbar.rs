use crate::Route;
use dioxus::prelude::*;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Top navigation shared by every route.
#[component]
pub fn Navbar() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }

        div { id: "navbar",
            span { class: "navbar-brand", "pressroom" }
            nav { class: "navbar-links",
                Link { to: Route::PostForm {}, class: "navbar-link", "New post" }
                Link { to: Route::MediaLibrary {}, class: "navbar-link", "Media" }
            }
        }

        main { class: "page", Outlet::<Route> {} }
    }
}
