//! pressroom-editor-core: rich editing surface logic without DOM dependencies.
//!
//! This crate provides:
//! - `EditorCommand` and the keybinding table that maps shortcuts onto it
//! - `EditableSurface` / `UserPrompt` traits implemented per platform
//! - `ContentSync` for keeping the host's Document string and the surface equal
//! - `EmbeddedImage` and the ordered `InsertStrategy` fallback chain
//! - `OverlayController`, the per-image Idle / Selected / Resizing state machine
//! - `EditorSession`, which wires the pieces together behind one change callback

pub mod actions;
pub mod error;
pub mod image;
pub mod insert;
pub mod overlay;
pub mod platform;
pub mod session;
pub mod sync;

#[cfg(test)]
mod mock;

pub use actions::{EditorCommand, Key, KeyCombo, KeybindingConfig, KeydownResult, Modifiers};
pub use error::EditorError;
pub use image::{DEFAULT_IMAGE_STYLE, EmbeddedImage, ImageId, image_style};
pub use insert::{InsertStrategy, insert_with_fallback};
pub use overlay::{
    Alignment, Corner, DragSession, ImageState, ImageView, MAX_IMAGE_SIZE, MIN_IMAGE_SIZE,
    OverlayController, Size, resize,
};
pub use platform::{EditableSurface, PlatformError, UserPrompt};
pub use pressroom_common::{MediaResource, ServerBase};
pub use session::EditorSession;
pub use smol_str::SmolStr;
pub use sync::{ContentSync, SyncOutcome};
