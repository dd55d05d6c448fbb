//! `EditableSurface` over a contentEditable element.

use std::collections::{HashMap, HashSet};

use pressroom_editor_core::image::{
    IMAGE_ID_ATTR, NATURAL_HEIGHT_ATTR, NATURAL_WIDTH_ATTR, RESIZABLE_ATTR,
};
use pressroom_editor_core::{EditableSurface, ImageId, ImageView, PlatformError, Size};
use smol_str::SmolStr;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlDocument, HtmlElement, Range};

use crate::overlay::{self, ContainerChrome, OverlaySink};

/// The editable root, looked up by element id on every call so a remount
/// is picked up without rebuilding the surface.
pub struct BrowserSurface {
    editor_id: SmolStr,
    sink: Option<OverlaySink>,
    chrome: HashMap<ImageId, ContainerChrome>,
}

impl std::fmt::Debug for BrowserSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserSurface")
            .field("editor_id", &self.editor_id)
            .field("chrome", &self.chrome.len())
            .finish()
    }
}

impl BrowserSurface {
    pub fn new(editor_id: impl Into<SmolStr>) -> Self {
        Self {
            editor_id: editor_id.into(),
            sink: None,
            chrome: HashMap::new(),
        }
    }

    pub fn editor_id(&self) -> &str {
        &self.editor_id
    }

    /// Where overlay chrome reports clicks, handle presses and button presses.
    pub fn set_sink(&mut self, sink: OverlaySink) {
        self.sink = Some(sink);
    }

    /// Drop every chrome listener. The DOM nodes stay until the content changes.
    pub fn clear_chrome(&mut self) {
        self.chrome.clear();
    }

    fn document(&self) -> Option<Document> {
        web_sys::window()?.document()
    }

    pub fn root(&self) -> Option<HtmlElement> {
        self.document()?
            .get_element_by_id(&self.editor_id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    /// The first selection range, if it lies inside the editable root.
    fn selection_range(&self, root: &Element) -> Option<Range> {
        let selection = web_sys::window()?.get_selection().ok()??;
        if selection.range_count() == 0 {
            return None;
        }
        let range = selection.get_range_at(0).ok()?;
        let ancestor = range.common_ancestor_container().ok()?;
        root.contains(Some(&ancestor)).then_some(range)
    }

    fn try_insert_at_range(&self, root: &Element, html: &str) -> Result<bool, JsValue> {
        let Some(range) = self.selection_range(root) else {
            return Ok(false);
        };
        range.delete_contents()?;
        let fragment = range.create_contextual_fragment(html)?;
        let last = fragment.last_child();
        range.insert_node(&fragment)?;

        if let Some(last) = last {
            range.set_start_after(&last)?;
            range.collapse_with_to_start(true);
            if let Some(selection) = web_sys::window().and_then(|w| w.get_selection().ok().flatten()) {
                selection.remove_all_ranges()?;
                selection.add_range(&range)?;
            }
        }
        Ok(true)
    }

    fn image_and_container(&self, id: &ImageId) -> Option<(web_sys::HtmlImageElement, Option<Element>)> {
        let root = self.root()?;
        let img = overlay::find_image(&root, id)?;
        let container = overlay::container_of(&img);
        Some((img, container))
    }

    fn wrap(&mut self, id: &ImageId) -> Result<bool, PlatformError> {
        let document = self
            .document()
            .ok_or_else(|| PlatformError::from("no document"))?;
        let root = self.root().ok_or_else(|| PlatformError::from("editor not mounted"))?;
        let img = overlay::find_image(&root, id)
            .ok_or_else(|| PlatformError(format!("image {id} not found")))?;

        let (container, created) = overlay::ensure_container(&document, &img)?;
        if overlay::has_chrome(&container) {
            if self.chrome.contains_key(id) {
                return Ok(created);
            }
            // Chrome without live listeners (e.g. an undo brought the nodes
            // back). Rebuild it so the buttons work.
            overlay::remove_container_chrome(&container);
        }

        let Some(sink) = self.sink.as_ref() else {
            return Ok(created);
        };
        let chrome = overlay::build_chrome(&document, &container, &img, id, sink)?;
        self.chrome.insert(id.clone(), chrome);
        Ok(true)
    }
}

impl EditableSurface for BrowserSurface {
    fn is_mounted(&self) -> bool {
        self.root().is_some_and(|root| root.is_connected())
    }

    fn focus(&mut self) {
        if let Some(root) = self.root() {
            let _ = root.focus();
        }
    }

    fn exec_command(&mut self, name: &str, value: Option<&str>) -> bool {
        let Some(document) = self
            .document()
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
        else {
            return false;
        };
        match document.exec_command_with_show_ui_and_value(name, false, value.unwrap_or("")) {
            Ok(applied) => applied,
            Err(e) => {
                tracing::warn!(name, ?e, "execCommand threw");
                false
            }
        }
    }

    fn serialize(&self) -> String {
        let Some(root) = self.root() else {
            return String::new();
        };
        let clone = match root
            .clone_node_with_deep(true)
            .map(|node| node.dyn_into::<Element>())
        {
            Ok(Ok(clone)) => clone,
            _ => return root.inner_html(),
        };
        overlay::strip_chrome(&clone);
        clone.inner_html()
    }

    fn replace_contents(&mut self, markup: &str) {
        if let Some(root) = self.root() {
            root.set_inner_html(markup);
        }
        self.chrome.clear();
    }

    fn insert_html_at_selection(&mut self, html: &str) -> bool {
        let Some(root) = self.root() else {
            return false;
        };
        // insertHTML acts on wherever the document selection is; outside the
        // editor that would be the wrong place.
        if self.selection_range(&root).is_none() {
            return false;
        }
        self.exec_command("insertHTML", Some(html))
    }

    fn insert_at_range(&mut self, html: &str) -> bool {
        let Some(root) = self.root() else {
            return false;
        };
        match self.try_insert_at_range(&root, html) {
            Ok(inserted) => inserted,
            Err(e) => {
                tracing::debug!(?e, "range insertion threw");
                false
            }
        }
    }

    fn append(&mut self, html: &str) -> bool {
        self.root()
            .is_some_and(|root| root.insert_adjacent_html("beforeend", html).is_ok())
    }

    fn collect_images(&mut self, mint: &mut dyn FnMut() -> ImageId) -> Vec<ImageId> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        let Ok(list) = root.query_selector_all(&format!("img[{RESIZABLE_ATTR}]")) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut ids = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            let Some(img) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let existing = img
                .get_attribute(IMAGE_ID_ATTR)
                .filter(|v| !v.is_empty())
                .map(ImageId::new);
            // Copy/paste can duplicate an id; the copy gets a fresh one.
            let id = match existing {
                Some(id) if !seen.contains(&id) => id,
                _ => {
                    let id = mint();
                    let _ = img.set_attribute(IMAGE_ID_ATTR, id.as_str());
                    id
                }
            };
            seen.insert(id.clone());
            ids.push(id);
        }
        tracing::trace!(count = ids.len(), "collected embedded images");
        ids
    }

    fn wrap_image(&mut self, id: &ImageId) -> bool {
        match self.wrap(id) {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!(%id, error = %e, "could not wrap image");
                false
            }
        }
    }

    fn render_image(&mut self, id: &ImageId, view: &ImageView) {
        if let Some((img, container)) = self.image_and_container(id) {
            overlay::apply_view(&img, container.as_ref(), view);
        }
    }

    fn image_size(&self, id: &ImageId) -> Option<Size> {
        let (img, _) = self.image_and_container(id)?;
        let rect = img.get_bounding_client_rect();
        if rect.width() > 0.0 && rect.height() > 0.0 {
            return Some(Size::new(rect.width(), rect.height()));
        }
        let natural = |attr| {
            img.get_attribute(attr)
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| *v > 0.0)
        };
        Some(Size::new(
            natural(NATURAL_WIDTH_ATTR)?,
            natural(NATURAL_HEIGHT_ATTR)?,
        ))
    }

    fn remove_image(&mut self, id: &ImageId) -> bool {
        self.chrome.remove(id);
        let Some((img, container)) = self.image_and_container(id) else {
            return false;
        };
        match container {
            Some(container) => container.remove(),
            None => img.remove(),
        }
        true
    }
}
