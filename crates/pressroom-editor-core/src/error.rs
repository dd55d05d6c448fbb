//! Editor error types.

use crate::image::ImageId;

/// Failures surfaced by [`EditorSession`](crate::EditorSession) operations.
///
/// None of these are fatal; callers log them and carry on.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// The editable root is not in the document.
    #[error("editable region is not mounted")]
    NotMounted,

    /// Every insertion strategy reported failure.
    #[error("no insertion strategy succeeded")]
    InsertFailed,

    /// Only image resources can be embedded.
    #[error("{name} is {mime_type}, not an image")]
    NotAnImage { name: String, mime_type: String },

    /// The image is not tracked by the overlay controller.
    #[error("unknown image {0}")]
    UnknownImage(ImageId),
}
