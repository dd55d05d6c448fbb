//! Platform abstraction traits for the editing surface.
//!
//! These traits define the interface between the editor logic and the thing
//! that actually holds editable content (a contentEditable element in the
//! browser, an in-memory fake in tests).

use crate::image::ImageId;
use crate::overlay::{ImageView, Size};

/// Error type for platform operations.
#[derive(Debug, Clone)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// The editable region.
///
/// Serialization must leave out overlay chrome (handles, control bars,
/// selection classes and image ids) so the Document only ever carries content.
pub trait EditableSurface {
    /// Whether the editable root exists.
    fn is_mounted(&self) -> bool;

    /// Give the editable root keyboard focus.
    fn focus(&mut self);

    /// Apply a native rich-text command to the current selection.
    ///
    /// Returns whatever the platform reports; callers treat `false` as
    /// informational only.
    fn exec_command(&mut self, name: &str, value: Option<&str>) -> bool;

    /// Serialized markup of the current content.
    fn serialize(&self) -> String;

    /// Replace the entire content. Destroys any overlay chrome.
    fn replace_contents(&mut self, markup: &str);

    /// Native "insert HTML" at the current selection.
    fn insert_html_at_selection(&mut self, html: &str) -> bool;

    /// Manual range insertion: delete the selection, insert, caret after the node.
    fn insert_at_range(&mut self, html: &str) -> bool;

    /// Append to the end of the editable region.
    fn append(&mut self, html: &str) -> bool;

    /// Embedded images in document order. Images without an id get one from `mint`.
    fn collect_images(&mut self, mint: &mut dyn FnMut() -> ImageId) -> Vec<ImageId>;

    /// Ensure the image sits in a container with handles and a control bar.
    ///
    /// Must be idempotent: an image whose parent already is a container is not
    /// wrapped again, and an existing container does not get a second set of
    /// handles. Returns true if anything was created.
    fn wrap_image(&mut self, id: &ImageId) -> bool;

    /// Mirror overlay state onto the image and its container.
    ///
    /// `None` size or alignment leaves whatever the markup already carries,
    /// so dimensions saved in a loaded Document survive re-attachment.
    fn render_image(&mut self, id: &ImageId, view: &ImageView);

    /// Current rendered size of an image.
    fn image_size(&self, id: &ImageId) -> Option<Size>;

    /// Remove the image together with its container.
    fn remove_image(&mut self, id: &ImageId) -> bool;
}

/// Blocking user interaction: URL prompt and yes/no confirmation.
pub trait UserPrompt {
    /// Ask for a string. `None` when the user cancels.
    fn prompt(&self, message: &str, default: &str) -> Option<String>;

    /// Ask a yes/no question.
    fn confirm(&self, message: &str) -> bool;
}
