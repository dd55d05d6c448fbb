//! Browser event translation.

use pressroom_editor_core::{Key, KeyCombo, Modifiers};
use wasm_bindgen::JsCast;

use crate::overlay::CONTAINER_CLASS;

/// Create a KeyCombo from a DOM keyboard event.
pub fn keycombo_from_event(event: &web_sys::KeyboardEvent) -> KeyCombo {
    let modifiers = Modifiers {
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        shift: event.shift_key(),
        meta: event.meta_key(),
    };
    KeyCombo::with_modifiers(Key::from_dom(&event.key()), modifiers)
}

/// Whether the event target sits inside an image container (image, handle or
/// control bar), as opposed to plain editable content.
pub fn targets_image_container(event: &web_sys::Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(&format!(".{CONTAINER_CLASS}")).ok().flatten())
        .is_some()
}

/// Pointer position of a mouse event in client coordinates.
pub fn pointer(event: &web_sys::MouseEvent) -> (f64, f64) {
    (event.client_x() as f64, event.client_y() as f64)
}
