//! Shared media-library plumbing for the pressroom editor.
//!
//! - `media`: Media Resource records as the remote library returns them
//! - `config`: the configured server base prepended to relative resource URLs
//! - `client`: list / bulk delete / upload against the media endpoints
//! - `library`: selection modal state (search, type filter, select and manage modes)
//! - `error`: media API errors, split into authentication and generic failures

pub mod client;
pub mod config;
pub mod error;
pub mod library;
pub mod media;

pub use crate::client::{MediaClient, MediaListQuery, UploadFile};
pub use crate::config::ServerBase;
pub use crate::error::MediaError;
pub use crate::library::{
    ClickOutcome, LibraryState, LoadState, MediaQuery, ModalMode, Preview, TypeFilter, ViewMode,
};
pub use crate::media::{MediaId, MediaKind, MediaResource, Uploader};
