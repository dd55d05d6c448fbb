//! Media Selection Modal: browse, filter, pick, upload and bulk-delete
//! resources from the remote media library.

mod item;
mod panel;

pub use item::MediaItem;
pub use panel::{MediaLibraryPanel, accept_attr};

use dioxus::prelude::*;
use pressroom_common::{MediaResource, ModalMode, TypeFilter};

use crate::components::dialog::ModalFrame;

/// Modal wrapper around [`MediaLibraryPanel`].
///
/// The panel is only rendered while open, so every open starts from a fresh
/// fetch. In select mode a chosen resource is reported and the modal closes.
#[component]
pub fn MediaSelectionModal(
    open: bool,
    #[props(default)] mode: ModalMode,
    #[props(default)] accept: TypeFilter,
    on_close: EventHandler<()>,
    on_select: EventHandler<MediaResource>,
) -> Element {
    let (title, hint) = match mode {
        ModalMode::Select => ("Select media", "Click a file to use it."),
        ModalMode::Manage => ("Media library", "Select files to delete them, or upload new ones."),
    };

    rsx! {
        ModalFrame {
            open,
            title: title.to_string(),
            description: hint.to_string(),
            on_close,
            if open {
                MediaLibraryPanel {
                    mode,
                    accept,
                    on_select: move |resource: MediaResource| {
                        on_select.call(resource);
                        on_close.call(());
                    },
                }
            }
        }
    }
}
