//! Overlay chrome for embedded images.
//!
//! Every `img[data-resizable]` gets a container holding the image, four
//! corner handles and a control bar (align left / center / right, delete).
//! Listeners are `gloo_events::EventListener`s owned by [`ContainerChrome`];
//! dropping the chrome removes them. Listeners never touch editor state
//! directly, they forward an [`OverlayEvent`] to the sink the editor installed.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use pressroom_editor_core::image::{IMAGE_ID_ATTR, NATURAL_HEIGHT_ATTR, NATURAL_WIDTH_ATTR};
use pressroom_editor_core::{Alignment, Corner, ImageId, ImageView, PlatformError, image_style};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use crate::events::pointer;

pub const CONTAINER_CLASS: &str = "pressroom-image-container";
pub const HANDLE_CLASS: &str = "pressroom-image-handle";
pub const CONTROLS_CLASS: &str = "pressroom-image-controls";
pub const SELECTED_CLASS: &str = "selected";
pub const RESIZING_CLASS: &str = "resizing";

const CONTAINER_STYLE: &str = "position: relative; display: table; margin: 8px 0;";
const HANDLE_STYLE: &str = "position: absolute; width: 10px; height: 10px; \
     background: #2563eb; border: 1px solid #fff; border-radius: 2px; \
     opacity: 0; pointer-events: none; z-index: 2;";
const CONTROLS_STYLE: &str = "position: absolute; top: -36px; left: 50%; \
     transform: translateX(-50%); display: flex; gap: 2px; padding: 2px; \
     background: #1f2937; border-radius: 6px; opacity: 0; pointer-events: none; \
     z-index: 3; white-space: nowrap;";
const BUTTON_STYLE: &str = "border: none; background: transparent; color: #fff; \
     cursor: pointer; padding: 2px 6px; font-size: 13px;";

/// Something happened on an image's chrome.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    ImageClicked(ImageId),
    HandlePressed {
        id: ImageId,
        corner: Corner,
        x: f64,
        y: f64,
    },
    Align(ImageId, Alignment),
    Delete(ImageId),
}

/// Receiver for overlay events, installed by the editor.
pub type OverlaySink = Rc<dyn Fn(OverlayEvent)>;

/// Listeners attached to one container's image, handles and buttons.
pub struct ContainerChrome {
    _listeners: Vec<EventListener>,
}

impl std::fmt::Debug for ContainerChrome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerChrome")
            .field("listeners", &self._listeners.len())
            .finish()
    }
}

fn selector_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// The image carrying `id`, if it is inside `root`.
pub fn find_image(root: &Element, id: &ImageId) -> Option<HtmlImageElement> {
    root.query_selector(&format!(r#"img[{IMAGE_ID_ATTR}="{}"]"#, id.as_str()))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
}

/// The image's container, when its immediate parent is one.
pub fn container_of(img: &Element) -> Option<Element> {
    img.parent_element()
        .filter(|parent| parent.class_list().contains(CONTAINER_CLASS))
}

/// Wrap `img` in a container unless its parent already is one. Returns the
/// container and whether it was created now.
pub fn ensure_container(
    document: &Document,
    img: &Element,
) -> Result<(Element, bool), PlatformError> {
    if let Some(container) = container_of(img) {
        return Ok((container, false));
    }

    let parent = img
        .parent_node()
        .ok_or_else(|| PlatformError::from("image has no parent"))?;
    let container = document
        .create_element("div")
        .map_err(|e| PlatformError(format!("create container: {e:?}")))?;
    container.set_class_name(CONTAINER_CLASS);
    container
        .set_attribute("style", CONTAINER_STYLE)
        .map_err(|e| PlatformError(format!("container style: {e:?}")))?;

    parent
        .insert_before(&container, Some(img))
        .map_err(|e| PlatformError(format!("insert container: {e:?}")))?;
    container
        .append_child(img)
        .map_err(|e| PlatformError(format!("move image: {e:?}")))?;
    Ok((container, true))
}

/// Whether the container already has handles or a control bar.
pub fn has_chrome(container: &Element) -> bool {
    container
        .query_selector(&format!(".{HANDLE_CLASS}, .{CONTROLS_CLASS}"))
        .ok()
        .flatten()
        .is_some()
}

/// Remove handles and control bar from one container.
pub fn remove_container_chrome(container: &Element) {
    for el in selector_all(container, &format!(".{HANDLE_CLASS}, .{CONTROLS_CLASS}")) {
        el.remove();
    }
}

/// Strip every UI affordance below `root` so only content remains.
///
/// Meant for a detached clone of the editable root; the live tree keeps its
/// chrome.
pub fn strip_chrome(root: &Element) {
    remove_container_chrome(root);
    for container in selector_all(root, &format!(".{CONTAINER_CLASS}")) {
        let classes = container.class_list();
        let _ = classes.remove_2(SELECTED_CLASS, RESIZING_CLASS);
    }
    for img in selector_all(root, &format!("img[{IMAGE_ID_ATTR}]")) {
        let _ = img.remove_attribute(IMAGE_ID_ATTR);
    }
}

fn handle_cursor(corner: Corner) -> &'static str {
    match corner {
        Corner::NorthWest | Corner::SouthEast => "nwse-resize",
        Corner::NorthEast | Corner::SouthWest => "nesw-resize",
    }
}

fn handle_position(corner: Corner) -> &'static str {
    match corner {
        Corner::NorthWest => "top: -5px; left: -5px;",
        Corner::NorthEast => "top: -5px; right: -5px;",
        Corner::SouthWest => "bottom: -5px; left: -5px;",
        Corner::SouthEast => "bottom: -5px; right: -5px;",
    }
}

fn create(document: &Document, tag: &str) -> Result<HtmlElement, PlatformError> {
    document
        .create_element(tag)
        .map_err(|e| PlatformError(format!("create {tag}: {e:?}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| PlatformError::from("created element is not an HtmlElement"))
}

fn set_attrs(el: &Element, attrs: &[(&str, &str)]) -> Result<(), PlatformError> {
    for (name, value) in attrs {
        el.set_attribute(name, value)
            .map_err(|e| PlatformError(format!("set {name}: {e:?}")))?;
    }
    Ok(())
}

/// Listener that may call `preventDefault` (gloo's default is passive).
fn active_listener(
    target: &web_sys::EventTarget,
    event_type: &'static str,
    callback: impl FnMut(&web_sys::Event) + 'static,
) -> EventListener {
    EventListener::new_with_options(
        target,
        event_type,
        EventListenerOptions::enable_prevent_default(),
        callback,
    )
}

/// Write the natural dimensions onto the image once the browser knows them.
pub fn record_natural_size(img: &HtmlImageElement) {
    let (w, h) = (img.natural_width(), img.natural_height());
    if w == 0 || h == 0 {
        return;
    }
    let _ = img.set_attribute(NATURAL_WIDTH_ATTR, &w.to_string());
    let _ = img.set_attribute(NATURAL_HEIGHT_ATTR, &h.to_string());
}

/// Build handles and control bar inside `container` and hook their listeners
/// up to `sink`.
pub fn build_chrome(
    document: &Document,
    container: &Element,
    img: &HtmlImageElement,
    id: &ImageId,
    sink: &OverlaySink,
) -> Result<ContainerChrome, PlatformError> {
    let mut listeners = Vec::new();

    let _ = img.set_attribute("draggable", "false");
    if img.complete() {
        record_natural_size(img);
    }
    {
        let img = img.clone();
        listeners.push(EventListener::new(&img.clone(), "load", move |_| {
            record_natural_size(&img)
        }));
    }
    {
        let sink = sink.clone();
        let id = id.clone();
        listeners.push(EventListener::new(img, "click", move |_| {
            sink(OverlayEvent::ImageClicked(id.clone()))
        }));
    }

    for corner in Corner::ALL {
        let handle = create(document, "span")?;
        handle.set_class_name(&format!("{HANDLE_CLASS} handle-{}", corner.as_str()));
        let style = format!(
            "{HANDLE_STYLE} {} cursor: {};",
            handle_position(corner),
            handle_cursor(corner)
        );
        set_attrs(
            &handle,
            &[
                ("contenteditable", "false"),
                ("data-corner", corner.as_str()),
                ("style", style.as_str()),
            ],
        )?;
        container
            .append_child(&handle)
            .map_err(|e| PlatformError(format!("append handle: {e:?}")))?;

        let sink = sink.clone();
        let id = id.clone();
        listeners.push(active_listener(&handle, "mousedown", move |event| {
            event.prevent_default();
            event.stop_propagation();
            let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() else {
                return;
            };
            let (x, y) = pointer(mouse);
            sink(OverlayEvent::HandlePressed {
                id: id.clone(),
                corner,
                x,
                y,
            });
        }));
    }

    let controls = create(document, "div")?;
    controls.set_class_name(CONTROLS_CLASS);
    set_attrs(
        &controls,
        &[("contenteditable", "false"), ("style", CONTROLS_STYLE)],
    )?;

    let buttons = [
        ("⇤", "Align left", Some(Alignment::Left)),
        ("↔", "Align center", Some(Alignment::Center)),
        ("⇥", "Align right", Some(Alignment::Right)),
        ("🗑", "Delete image", None),
    ];
    for (glyph, title, alignment) in buttons {
        let button = create(document, "button")?;
        set_attrs(
            &button,
            &[("type", "button"), ("title", title), ("style", BUTTON_STYLE)],
        )?;
        button.set_text_content(Some(glyph));
        controls
            .append_child(&button)
            .map_err(|e| PlatformError(format!("append button: {e:?}")))?;

        // Keep the editor's selection where it is.
        listeners.push(active_listener(&button, "mousedown", |event| {
            event.prevent_default();
            event.stop_propagation();
        }));

        let sink = sink.clone();
        let id = id.clone();
        listeners.push(active_listener(&button, "click", move |event| {
            event.prevent_default();
            event.stop_propagation();
            match alignment {
                Some(alignment) => sink(OverlayEvent::Align(id.clone(), alignment)),
                None => sink(OverlayEvent::Delete(id.clone())),
            }
        }));
    }
    container
        .append_child(&controls)
        .map_err(|e| PlatformError(format!("append controls: {e:?}")))?;

    tracing::trace!(%id, listeners = listeners.len(), "built image chrome");
    Ok(ContainerChrome {
        _listeners: listeners,
    })
}

fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

/// Mirror an image's overlay state onto the DOM.
pub fn apply_view(img: &HtmlImageElement, container: Option<&Element>, view: &ImageView) {
    if view.size.is_some() {
        let _ = img.set_attribute("style", &image_style(view.size));
    }

    let Some(container) = container else {
        return;
    };

    let classes = container.class_list();
    let _ = classes.toggle_with_force(SELECTED_CLASS, view.selected);
    let _ = classes.toggle_with_force(RESIZING_CLASS, view.resizing);

    if let Some(alignment) = view.alignment {
        for a in Alignment::ALL {
            let _ = classes.remove_1(a.css_class());
        }
        let _ = classes.add_1(alignment.css_class());
        set_style(container, "text-align", alignment.text_align());
        let (left, right) = match alignment {
            Alignment::Left => ("0", "auto"),
            Alignment::Center => ("auto", "auto"),
            Alignment::Right => ("auto", "0"),
        };
        set_style(container, "margin-left", left);
        set_style(container, "margin-right", right);
    }

    let (opacity, events) = if view.selected {
        ("1", "auto")
    } else {
        ("0", "none")
    };
    for el in selector_all(container, &format!(".{HANDLE_CLASS}, .{CONTROLS_CLASS}")) {
        set_style(&el, "opacity", opacity);
        set_style(&el, "pointer-events", events);
    }
}
