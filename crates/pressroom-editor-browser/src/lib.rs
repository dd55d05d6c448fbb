//! Browser DOM layer for the pressroom rich editing surface.
//!
//! Implements the `pressroom-editor-core` platform traits on top of a
//! contentEditable element. It assumes a `wasm32-unknown-unknown` target
//! environment.
//!
//! # Architecture
//!
//! - `surface`: `EditableSurface` over the editable root (native commands,
//!   range insertion, chrome-free serialization)
//! - `overlay`: image containers, resize handles and control bars
//! - `editor`: `BrowserEditor`, the shared handle owning listeners and drags
//! - `events`: keyboard/mouse event translation
//! - `prompt`: `UserPrompt` via window.prompt / window.confirm
//! - `schedule`: cancellable delayed callbacks
//! - `platform`: OS detection for shortcut modifiers
//!
//! # Re-exports
//!
//! This crate re-exports `pressroom-editor-core` for convenience, so consumers
//! only need to depend on `pressroom-editor-browser`.

// Re-export core crate
pub use pressroom_editor_core;
pub use pressroom_editor_core::*;

pub mod editor;
pub mod events;
pub mod overlay;
pub mod platform;
pub mod prompt;
pub mod schedule;
pub mod surface;

pub use editor::{BrowserEditor, DragGuard};
pub use events::keycombo_from_event;
pub use overlay::{CONTAINER_CLASS, OverlayEvent};
pub use platform::{Platform, platform};
pub use prompt::BrowserPrompt;
pub use schedule::{REATTACH_DELAY_MS, Scheduler};
pub use surface::BrowserSurface;
