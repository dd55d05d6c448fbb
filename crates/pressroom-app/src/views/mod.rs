//! Layouts and routes.

mod media_library;
mod navbar;
mod post_form;

pub use media_library::MediaLibrary;
pub use navbar::Navbar;
pub use post_form::PostForm;
