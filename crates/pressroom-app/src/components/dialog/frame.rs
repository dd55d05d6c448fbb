use dioxus::prelude::*;
use dioxus_primitives::dialog;

const DIALOG_CSS: Asset = asset!("./dialog.css");

/// Backdrop, titled panel and close button around `children`.
///
/// Every way out (backdrop click, close button, Escape through the primitive)
/// ends in a single `on_close` call. Clicks inside the panel never reach the
/// backdrop.
#[component]
pub fn ModalFrame(
    open: bool,
    title: String,
    #[props(default)] description: Option<String>,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    let overlay_class = if open {
        "dialog-overlay dialog-overlay-open"
    } else {
        "dialog-overlay"
    };

    rsx! {
        document::Link { rel: "stylesheet", href: DIALOG_CSS }
        div {
            class: overlay_class,
            onclick: move |_| on_close.call(()),
            dialog::DialogRoot {
                class: "dialog-backdrop-inner",
                is_modal: true,
                open: Some(open),
                on_open_change: move |open: bool| {
                    if !open {
                        on_close.call(());
                    }
                },
                div {
                    onclick: move |e| e.stop_propagation(),
                    dialog::DialogContent { class: "dialog",
                        div { class: "dialog-header",
                            dialog::DialogTitle { class: "dialog-title", "{title}" }
                            button {
                                r#type: "button",
                                class: "dialog-close",
                                title: "Close",
                                onclick: move |_| on_close.call(()),
                                "×"
                            }
                        }
                        if let Some(description) = description {
                            dialog::DialogDescription { class: "dialog-description", "{description}" }
                        }
                        {children}
                    }
                }
            }
        }
    }
}
