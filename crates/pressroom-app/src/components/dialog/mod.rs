//! Modal chrome shared by every dialog in the app.

mod frame;
pub use frame::ModalFrame;
