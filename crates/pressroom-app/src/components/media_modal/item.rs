use dioxus::prelude::*;
use pressroom_common::{MediaId, MediaResource, Preview, ViewMode};

use crate::CONFIG;

/// One resource in the grid or list.
#[component]
pub fn MediaItem(
    resource: MediaResource,
    view: ViewMode,
    selected: bool,
    on_click: EventHandler<MediaId>,
) -> Element {
    // Broken previews are hidden rather than shown as a broken image.
    let mut broken = use_signal(|| false);

    let preview = Preview::for_resource(&resource, &CONFIG.server_base);
    let id = resource.id.clone();
    let name = resource.original_name.clone();
    let size = resource.display_size();
    let mime = resource.mime_type.clone();

    let mut class = match view {
        ViewMode::Grid => "media-item media-item-grid".to_string(),
        ViewMode::List => "media-item media-item-list".to_string(),
    };
    if selected {
        class.push_str(" media-item-selected");
    }

    rsx! {
        div {
            class,
            title: "{name}",
            "aria-selected": selected,
            onclick: move |_| on_click.call(id.clone()),
            div { class: "media-preview",
                match preview {
                    Preview::Image(src) => rsx! {
                        if !broken() {
                            img {
                                src,
                                alt: "{name}",
                                loading: "lazy",
                                onerror: move |_| broken.set(true),
                            }
                        }
                    },
                    Preview::Glyph(kind) => rsx! {
                        span { class: "media-glyph", {kind.glyph()} }
                    },
                }
            }
            div { class: "media-meta",
                span { class: "media-name", "{name}" }
                if view == ViewMode::List {
                    span { class: "media-type", "{mime}" }
                }
                span { class: "media-size", "{size}" }
            }
            if selected {
                span { class: "media-check", "✓" }
            }
        }
    }
}
