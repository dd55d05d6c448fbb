//! Shared components: the rich editor, the media selection modal and the
//! dialog primitives both of them sit on.

pub mod dialog;
pub mod editor;
pub mod media_modal;

pub use editor::{EditorToolbar, RichEditor};
pub use media_modal::{MediaLibraryPanel, MediaSelectionModal};
