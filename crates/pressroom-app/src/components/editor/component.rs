//! The editor component: mounts a [`BrowserEditor`] on its editable div and
//! keeps it in step with the host's value.

use std::sync::atomic::{AtomicUsize, Ordering};

use dioxus::prelude::*;
use pressroom_common::{MediaResource, ModalMode, TypeFilter};
use pressroom_editor_browser::{BrowserEditor, EditorCommand};

use super::toolbar::EditorToolbar;
use crate::CONFIG;
use crate::components::media_modal::MediaSelectionModal;

static NEXT_EDITOR: AtomicUsize = AtomicUsize::new(0);

fn next_editor_id() -> String {
    format!("pressroom-editor-{}", NEXT_EDITOR.fetch_add(1, Ordering::Relaxed))
}

/// Rich text editor for a Document (HTML string).
///
/// `value` is applied whenever it differs from what the editor shows;
/// `on_change` receives the serialized Document after every edit.
#[component]
pub fn RichEditor(
    value: ReadSignal<String>,
    on_change: EventHandler<String>,
    #[props(default)] placeholder: Option<String>,
) -> Element {
    let editor_id = use_hook(next_editor_id);
    let mut editor: Signal<Option<BrowserEditor>> = use_signal(|| None);
    // Edits arrive from DOM listeners; routing them through a signal hands
    // them to `on_change` from inside the runtime.
    let mut edited: Signal<Option<String>> = use_signal(|| None);
    let mut picker_open = use_signal(|| false);

    {
        let editor_id = editor_id.clone();
        use_effect(move || {
            if editor.peek().is_some() {
                return;
            }
            let on_edit = move |html: String| edited.set(Some(html));
            match BrowserEditor::mount(&editor_id, CONFIG.server_base.clone(), on_edit) {
                Ok(mounted) => {
                    mounted.set_value(&value.peek());
                    editor.set(Some(mounted));
                }
                Err(e) => tracing::warn!(%editor_id, "editor mount failed: {e}"),
            }
        });
    }

    use_effect(move || {
        if let Some(html) = edited() {
            on_change.call(html);
        }
    });

    // External values (initial load, form reset).
    use_effect(move || {
        let value = value();
        if let Some(editor) = editor.peek().as_ref() {
            let outcome = editor.set_value(&value);
            tracing::trace!(?outcome, "external value applied");
        }
    });

    use_drop(move || {
        if let Some(editor) = editor.peek().as_ref() {
            editor.teardown();
        }
    });

    let on_command = move |command: EditorCommand| {
        if let Some(editor) = editor.peek().as_ref() {
            editor.dispatch(command);
        }
    };

    let on_select = move |resource: MediaResource| {
        let Some(editor) = editor.peek().clone() else {
            tracing::warn!("image chosen but editor is not mounted");
            return;
        };
        if let Err(e) = editor.insert_resource(&resource) {
            tracing::warn!(id = %resource.id, "image insert failed: {e}");
        }
    };

    let placeholder = placeholder.unwrap_or_default();

    rsx! {
        div { class: "rich-editor",
            EditorToolbar {
                on_command,
                on_image: move |_| picker_open.set(true),
            }
            div {
                id: "{editor_id}",
                class: "editor-content",
                contenteditable: "true",
                spellcheck: "true",
                "data-placeholder": "{placeholder}",
            }
            MediaSelectionModal {
                open: picker_open(),
                mode: ModalMode::Select,
                accept: TypeFilter::Image,
                on_close: move |_| picker_open.set(false),
                on_select,
            }
        }
    }
}
