use dioxus::prelude::*;
use pressroom_common::{ModalMode, TypeFilter};

use crate::components::MediaLibraryPanel;

const MEDIA_CSS: Asset = asset!("/assets/styling/media.css");

/// Library management page: the panel in manage mode, outside any dialog.
#[component]
pub fn MediaLibrary() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MEDIA_CSS }
        section { class: "media-page",
            h1 { "Media library" }
            MediaLibraryPanel {
                mode: ModalMode::Manage,
                accept: TypeFilter::All,
                on_select: move |_| {},
            }
        }
    }
}
