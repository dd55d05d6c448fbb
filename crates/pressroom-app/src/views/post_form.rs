use dioxus::prelude::*;
use pressroom_common::{MediaResource, ModalMode, TypeFilter};

use crate::CONFIG;
use crate::components::{MediaSelectionModal, RichEditor};

const EDITOR_CSS: Asset = asset!("/assets/styling/editor.css");
const MEDIA_CSS: Asset = asset!("/assets/styling/media.css");

/// Post authoring form: title, rich body and a featured image.
///
/// Saving belongs to the surrounding CMS; the form shows the Document it
/// would submit.
#[component]
pub fn PostForm() -> Element {
    let mut title = use_signal(String::new);
    let mut body = use_signal(String::new);
    let mut featured: Signal<Option<MediaResource>> = use_signal(|| None);
    let mut chooser_open = use_signal(|| false);

    let featured_preview = featured().map(|resource| {
        let src = CONFIG.server_base.resolve(
            resource
                .thumbnail_url
                .as_deref()
                .unwrap_or(&resource.url),
        );
        (src, resource.original_name)
    });

    rsx! {
        document::Link { rel: "stylesheet", href: EDITOR_CSS }
        document::Link { rel: "stylesheet", href: MEDIA_CSS }

        form {
            class: "post-form",
            onsubmit: move |evt| evt.prevent_default(),

            label { class: "form-field",
                span { "Title" }
                input {
                    r#type: "text",
                    value: "{title}",
                    placeholder: "Headline",
                    oninput: move |evt| title.set(evt.value()),
                }
            }

            div { class: "form-field",
                span { "Body" }
                RichEditor {
                    value: body,
                    on_change: move |html| body.set(html),
                    placeholder: "Write your story...",
                }
            }

            div { class: "form-field featured-image",
                span { "Featured image" }
                if let Some((src, name)) = featured_preview {
                    figure { class: "featured-preview",
                        img { src, alt: "{name}" }
                        figcaption { "{name}" }
                    }
                }
                div { class: "featured-actions",
                    button {
                        r#type: "button",
                        onclick: move |_| chooser_open.set(true),
                        if featured.read().is_some() { "Change" } else { "Choose image" }
                    }
                    if featured.read().is_some() {
                        button {
                            r#type: "button",
                            onclick: move |_| featured.set(None),
                            "Remove"
                        }
                    }
                }
            }

            div { class: "form-actions",
                button {
                    r#type: "button",
                    onclick: move |_| {
                        title.set(String::new());
                        body.set(String::new());
                        featured.set(None);
                    },
                    "Clear"
                }
            }

            details { class: "document-output",
                summary { "Document HTML" }
                pre { "{body}" }
            }
        }

        MediaSelectionModal {
            open: chooser_open(),
            mode: ModalMode::Select,
            accept: TypeFilter::Image,
            on_close: move |_| chooser_open.set(false),
            on_select: move |resource| featured.set(Some(resource)),
        }
    }
}
