//! `UserPrompt` over the window's blocking dialogs.

use pressroom_editor_core::UserPrompt;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPrompt;

impl UserPrompt for BrowserPrompt {
    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        let window = web_sys::window()?;
        match window.prompt_with_message_and_default(message, default) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(?e, "window.prompt failed");
                None
            }
        }
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
