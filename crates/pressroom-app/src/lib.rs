//! Pressroom web front-end: a post form with the rich editor, and the media
//! library page.

use dioxus::prelude::*;
use std::sync::LazyLock;

pub mod auth;
pub mod components;
pub mod config;
pub mod env;
pub mod upload;
pub mod views;

use config::Config;
use views::{MediaLibrary, Navbar, PostForm};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]
        #[route("/")]
        PostForm {},
        #[route("/media")]
        MediaLibrary {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_env);

#[component]
pub fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
