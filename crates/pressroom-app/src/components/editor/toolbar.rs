//! Editor toolbar component with formatting buttons.

use dioxus::prelude::*;
use pressroom_editor_browser::{EditorCommand, platform};

/// Where the toolbar draws a separator (before these commands).
fn starts_group(command: EditorCommand) -> bool {
    matches!(
        command,
        EditorCommand::UnorderedList
            | EditorCommand::AlignLeft
            | EditorCommand::BlockQuote
            | EditorCommand::Undo
    )
}

/// Editor toolbar: every formatting command plus the image button.
///
/// Buttons swallow `mousedown` so the editable region keeps its selection.
#[component]
pub fn EditorToolbar(on_command: EventHandler<EditorCommand>, on_image: EventHandler<()>) -> Element {
    let modifier = platform().primary_label();

    rsx! {
        div { class: "editor-toolbar", role: "toolbar",
            for command in EditorCommand::TOOLBAR {
                if starts_group(command) {
                    span { class: "toolbar-separator" }
                }
                button {
                    key: "{command:?}",
                    r#type: "button",
                    class: "toolbar-button",
                    title: command.title().replace("Ctrl", modifier),
                    onmousedown: move |evt| evt.prevent_default(),
                    onclick: move |_| on_command.call(command),
                    {command.label()}
                }
            }

            span { class: "toolbar-separator" }

            button {
                r#type: "button",
                class: "toolbar-button",
                title: "Insert image",
                onmousedown: move |evt| evt.prevent_default(),
                onclick: move |_| on_image.call(()),
                "🖼"
            }
        }
    }
}
