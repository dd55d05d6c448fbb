//! Session token lookup for the media API.
//!
//! The token is written to local storage by the surrounding CMS login flow;
//! this app only reads it.

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use gloo_storage::{LocalStorage, Storage};
use pressroom_common::MediaClient;

use crate::CONFIG;

/// Local storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub fn session_token() -> Option<String> {
    match LocalStorage::get::<String>(TOKEN_KEY) {
        Ok(token) => Some(token),
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => None,
        // Stored as a bare string rather than JSON.
        Err(gloo_storage::errors::StorageError::SerdeError(_)) => LocalStorage::raw()
            .get_item(TOKEN_KEY)
            .ok()
            .flatten(),
        Err(e) => {
            tracing::warn!("LocalStorage error: {e}");
            None
        }
    }
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub fn session_token() -> Option<String> {
    None
}

/// A media client carrying the current session token.
///
/// Built per request so a login in another tab is picked up.
pub fn media_client() -> MediaClient {
    MediaClient::new(&CONFIG.api_base).with_token(session_token())
}
