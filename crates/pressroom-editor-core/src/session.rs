//! The editing session: one editable surface plus everything attached to it.
//!
//! `EditorSession` is the single place where edits turn into change
//! notifications. Every mutating entry point (command dispatch, input,
//! insertion, end of a resize drag, alignment, deletion) finishes with exactly
//! one call to the change callback carrying the freshly serialized Document.

use pressroom_common::{MediaKind, MediaResource, ServerBase};

use crate::actions::{EditorCommand, KeyCombo, KeybindingConfig, KeydownResult};
use crate::error::EditorError;
use crate::image::{EmbeddedImage, ImageId};
use crate::insert::{InsertStrategy, insert_with_fallback};
use crate::overlay::{Alignment, Corner, OverlayController, Size};
use crate::platform::{EditableSurface, UserPrompt};
use crate::sync::{ContentSync, SyncOutcome};

pub const LINK_PROMPT: &str = "Enter URL:";
pub const LINK_PROMPT_DEFAULT: &str = "https://";
pub const DELETE_IMAGE_CONFIRM: &str = "Delete this image?";

pub struct EditorSession<S: EditableSurface> {
    surface: S,
    sync: ContentSync,
    overlay: OverlayController,
    keybindings: KeybindingConfig,
    server_base: ServerBase,
    insert_order: Vec<InsertStrategy>,
    on_change: Box<dyn FnMut(String)>,
}

impl<S: EditableSurface> EditorSession<S> {
    pub fn new(
        surface: S,
        server_base: ServerBase,
        keybindings: KeybindingConfig,
        on_change: impl FnMut(String) + 'static,
    ) -> Self {
        Self {
            surface,
            sync: ContentSync::new(),
            overlay: OverlayController::new(),
            keybindings,
            server_base,
            insert_order: InsertStrategy::DEFAULT_ORDER.to_vec(),
            on_change: Box::new(on_change),
        }
    }

    pub fn with_insert_order(mut self, order: impl Into<Vec<InsertStrategy>>) -> Self {
        self.insert_order = order.into();
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    pub fn server_base(&self) -> &ServerBase {
        &self.server_base
    }

    /// Replace the change callback, e.g. when the host re-renders with a new closure.
    pub fn set_on_change(&mut self, on_change: impl FnMut(String) + 'static) {
        self.on_change = Box::new(on_change);
    }

    fn emit(&mut self) {
        let markup = self.sync.capture(&self.surface);
        (self.on_change)(markup);
    }

    fn render(&mut self, id: &ImageId) {
        if let Some(view) = self.overlay.view(id) {
            self.surface.render_image(id, &view);
        }
    }

    fn render_all(&mut self) {
        let ids: Vec<ImageId> = self.overlay.ids().cloned().collect();
        for id in &ids {
            self.render(id);
        }
    }

    /// Apply a formatting command to the current selection.
    ///
    /// Returns false when nothing was issued: unmounted surface, or a link
    /// prompt that was cancelled or left empty.
    pub fn dispatch(&mut self, command: EditorCommand, prompt: &dyn UserPrompt) -> bool {
        if !self.surface.is_mounted() {
            tracing::warn!(?command, "dispatch on unmounted editor ignored");
            return false;
        }

        let value = match command {
            EditorCommand::CreateLink => {
                match prompt.prompt(LINK_PROMPT, LINK_PROMPT_DEFAULT) {
                    Some(url) if !url.trim().is_empty() => Some(url.trim().to_string()),
                    _ => {
                        tracing::debug!("link prompt cancelled");
                        return false;
                    }
                }
            }
            other => other.default_value().map(str::to_string),
        };

        self.surface.focus();
        let applied = self
            .surface
            .exec_command(command.native_name(), value.as_deref());
        if !applied {
            tracing::debug!(?command, "native command reported failure");
        }
        self.emit();
        true
    }

    /// Keyboard shortcuts. `Handled` means the caller must suppress the
    /// platform's default behavior.
    pub fn handle_keydown(&mut self, combo: &KeyCombo, prompt: &dyn UserPrompt) -> KeydownResult {
        match self.keybindings.lookup(combo) {
            Some(command) => {
                self.dispatch(command, prompt);
                KeydownResult::Handled
            }
            None => KeydownResult::NotHandled,
        }
    }

    /// The user typed, pasted or otherwise edited the region directly.
    pub fn on_input(&mut self) {
        if self.surface.is_mounted() {
            self.emit();
        }
    }

    /// The host supplied a Document value.
    ///
    /// On `Replaced` every overlay is gone; the caller re-runs
    /// [`attach_images`](Self::attach_images) once the new content is laid out.
    pub fn set_document(&mut self, value: &str) -> SyncOutcome {
        if !self.surface.is_mounted() {
            return SyncOutcome::Unchanged;
        }
        let outcome = self.sync.apply_external(&mut self.surface, value);
        if outcome == SyncOutcome::Replaced {
            self.overlay.clear();
        }
        outcome
    }

    /// Give every embedded image its overlay. Safe to call any number of
    /// times. Returns the images that were not tracked before.
    pub fn attach_images(&mut self) -> Vec<ImageId> {
        if !self.surface.is_mounted() {
            return Vec::new();
        }
        let overlay = &mut self.overlay;
        let ids = self
            .surface
            .collect_images(&mut || overlay.next_image_id());
        self.overlay.retain(&ids);
        let fresh = self.overlay.attach(ids.iter().cloned());
        for id in &ids {
            if self.surface.wrap_image(id) {
                tracing::trace!(%id, "image container created");
            }
        }
        self.render_all();
        fresh
    }

    /// Insert an image for `resource` at the caret. Non-image resources are
    /// refused without touching the document.
    pub fn insert_resource(&mut self, resource: &MediaResource) -> Result<ImageId, EditorError> {
        if !self.surface.is_mounted() {
            return Err(EditorError::NotMounted);
        }
        if resource.kind() != MediaKind::Image {
            return Err(EditorError::NotAnImage {
                name: resource.original_name.clone(),
                mime_type: resource.mime_type.clone(),
            });
        }
        let id = self.overlay.next_image_id();
        let image = EmbeddedImage::from_resource(resource, &self.server_base, id.clone());

        self.surface.focus();
        let strategy = insert_with_fallback(&mut self.surface, &image.to_html(), &self.insert_order)
            .inspect_err(|err| tracing::warn!(%err, name = %resource.original_name, "image insert failed"))?;
        tracing::debug!(%id, ?strategy, src = %image.src, "inserted image");

        self.attach_images();
        self.emit();
        Ok(id)
    }

    /// Click on an image: it becomes the only selected one.
    pub fn click_image(&mut self, id: &ImageId) -> bool {
        let selected = self.overlay.select(id);
        if selected {
            self.render_all();
        }
        selected
    }

    /// Click anywhere else inside the editor.
    pub fn click_background(&mut self) {
        if self.overlay.selected().is_some() {
            self.overlay.deselect_all();
            self.render_all();
        }
    }

    /// Mouse-down on a resize handle.
    pub fn begin_resize(&mut self, id: &ImageId, corner: Corner, x: f64, y: f64) -> bool {
        let Some(current) = self
            .overlay
            .size(id)
            .or_else(|| self.surface.image_size(id))
        else {
            return false;
        };
        let started = self.overlay.begin_resize(id, corner, x, y, current);
        if started {
            self.render_all();
        }
        started
    }

    /// Pointer moved during a drag.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<Size> {
        let (id, size) = self.overlay.drag_to(x, y)?;
        self.render(&id);
        Some(size)
    }

    /// Button released. Ends any drag session and syncs once.
    pub fn end_resize(&mut self) -> bool {
        match self.overlay.end_resize() {
            Some((id, _)) => {
                self.render(&id);
                self.emit();
                true
            }
            None => false,
        }
    }

    pub fn align_image(&mut self, id: &ImageId, alignment: Alignment) -> bool {
        if !self.overlay.align(id, alignment) {
            return false;
        }
        self.render(id);
        self.emit();
        true
    }

    /// Delete an image after asking the user. `Ok(false)` when they declined;
    /// the image stays selected in that case.
    pub fn delete_image(
        &mut self,
        id: &ImageId,
        prompt: &dyn UserPrompt,
    ) -> Result<bool, EditorError> {
        if !self.surface.is_mounted() {
            return Err(EditorError::NotMounted);
        }
        if !self.overlay.contains(id) {
            return Err(EditorError::UnknownImage(id.clone()));
        }
        if !prompt.confirm(DELETE_IMAGE_CONFIRM) {
            return Ok(false);
        }
        if !self.surface.remove_image(id) {
            tracing::warn!(%id, "image already gone from the document");
        }
        self.overlay.remove(id);
        self.emit();
        Ok(true)
    }

    /// Forget all overlay state. Platform listeners are owned elsewhere and
    /// must be dropped alongside.
    pub fn teardown(&mut self) {
        tracing::debug!(images = self.overlay.len(), "editor session torn down");
        self.overlay.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pressroom_common::{MediaId, Uploader};

    use super::*;
    use crate::actions::{Key, Modifiers};
    use crate::mock::{MockPrompt, MockSurface};
    use crate::overlay::ImageState;

    type Emitted = Rc<RefCell<Vec<String>>>;

    fn session(html: &str) -> (EditorSession<MockSurface>, Emitted) {
        session_on(MockSurface::with_content(html))
    }

    fn session_on(surface: MockSurface) -> (EditorSession<MockSurface>, Emitted) {
        let emitted: Emitted = Rc::default();
        let sink = emitted.clone();
        let s = EditorSession::new(
            surface,
            ServerBase::new("https://cdn.example.com"),
            KeybindingConfig::default_for_platform(false),
            move |v| sink.borrow_mut().push(v),
        );
        (s, emitted)
    }

    fn image_resource() -> MediaResource {
        MediaResource {
            id: MediaId::new("7"),
            original_name: "cat.png".to_string(),
            mime_type: "image/png".to_string(),
            size: 2048,
            url: "/uploads/cat.png".to_string(),
            thumbnail_url: None,
            tags: vec![],
            is_public: true,
            is_featured: false,
            uploaded_by: Uploader::default(),
            created_at: chrono::DateTime::from_timestamp(0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_dispatch_emits_once() {
        let (mut s, emitted) = session("<p>hi</p>");
        let prompt = MockPrompt::default();
        assert!(s.dispatch(EditorCommand::Bold, &prompt));
        assert_eq!(emitted.borrow().len(), 1);
        assert_eq!(emitted.borrow()[0], "<p>hi</p><!--bold-->");
        assert_eq!(s.surface().focus_count, 1);
    }

    #[test]
    fn test_every_command_emits_exactly_once() {
        let (mut s, emitted) = session("<p>hi</p>");
        for (n, command) in EditorCommand::TOOLBAR.into_iter().enumerate() {
            let prompt = MockPrompt::answering(Some("https://example.com"));
            assert!(s.dispatch(command, &prompt), "{command:?}");
            assert_eq!(emitted.borrow().len(), n + 1, "{command:?}");
            let last = emitted.borrow()[n].clone();
            assert!(last.ends_with(&format!("<!--{}-->", command.native_name())), "{last}");
        }
        assert_eq!(s.surface().commands.len(), EditorCommand::TOOLBAR.len());
    }

    #[test]
    fn test_insert_refuses_non_images() {
        let (mut s, emitted) = session("<p>x</p>");
        let mut pdf = image_resource();
        pdf.original_name = "report.pdf".to_string();
        pdf.mime_type = "application/pdf".to_string();
        assert_eq!(
            s.insert_resource(&pdf),
            Err(EditorError::NotAnImage {
                name: "report.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
            })
        );
        assert_eq!(s.surface().insert_attempts, 0);
        assert!(emitted.borrow().is_empty());
        assert!(s.overlay().is_empty());
    }

    #[test]
    fn test_blockquote_passes_value() {
        let (mut s, _) = session("");
        s.dispatch(EditorCommand::BlockQuote, &MockPrompt::default());
        assert_eq!(
            s.surface().commands,
            vec![("formatBlock".to_string(), Some("blockquote".to_string()))]
        );
    }

    #[test]
    fn test_link_uses_prompted_url() {
        let (mut s, emitted) = session("");
        let prompt = MockPrompt::answering(Some(" https://example.com "));
        assert!(s.dispatch(EditorCommand::CreateLink, &prompt));
        assert_eq!(
            s.surface().commands,
            vec![(
                "createLink".to_string(),
                Some("https://example.com".to_string())
            )]
        );
        assert_eq!(emitted.borrow().len(), 1);
        assert_eq!(prompt.asked.borrow().as_slice(), [LINK_PROMPT]);
    }

    #[test]
    fn test_link_cancel_or_empty_is_noop() {
        for answer in [None, Some(""), Some("   ")] {
            let (mut s, emitted) = session("<p>x</p>");
            assert!(!s.dispatch(EditorCommand::CreateLink, &MockPrompt::answering(answer)));
            assert!(s.surface().commands.is_empty());
            assert!(emitted.borrow().is_empty());
        }
    }

    #[test]
    fn test_unmounted_dispatch_is_noop() {
        let (mut s, emitted) = session_on(MockSurface::unmounted());
        assert!(!s.dispatch(EditorCommand::Italic, &MockPrompt::default()));
        assert!(s.surface().commands.is_empty());
        assert!(emitted.borrow().is_empty());
    }

    #[test]
    fn test_keydown_routes_through_dispatch() {
        let (mut s, emitted) = session("");
        let prompt = MockPrompt::default();
        let ctrl_shift_z = KeyCombo::with_modifiers(Key::character("Z"), Modifiers::CTRL_SHIFT);
        assert_eq!(s.handle_keydown(&ctrl_shift_z, &prompt), KeydownResult::Handled);
        assert_eq!(s.surface().commands[0].0, "redo");

        let plain = KeyCombo::new(Key::character("a"));
        assert_eq!(s.handle_keydown(&plain, &prompt), KeydownResult::NotHandled);
        assert_eq!(emitted.borrow().len(), 1);
    }

    #[test]
    fn test_echo_does_not_replace() {
        let (mut s, emitted) = session("<p>a</p>");
        s.on_input();
        let value = emitted.borrow()[0].clone();
        assert_eq!(s.set_document(&value), SyncOutcome::Unchanged);
        assert_eq!(s.surface().replace_count, 0);
    }

    #[test]
    fn test_external_value_replaces_and_drops_overlays() {
        let (mut s, _) = session(r#"<p><img src="a.png"></p>"#);
        s.attach_images();
        assert_eq!(s.overlay().len(), 1);
        assert_eq!(
            s.set_document(r#"<p><img src="b.png"><img src="c.png"></p>"#),
            SyncOutcome::Replaced
        );
        assert!(s.overlay().is_empty());
        assert_eq!(s.attach_images().len(), 2);
    }

    #[test]
    fn test_attach_is_idempotent() {
        let (mut s, _) = session(r#"<img src="a.png"><p>t</p><img src="b.png">"#);
        let first = s.attach_images();
        assert_eq!(first.len(), 2);
        for _ in 0..3 {
            assert!(s.attach_images().is_empty());
        }
        assert_eq!(s.overlay().len(), 2);
        for id in &first {
            assert_eq!(s.surface().containers.get(id), Some(&1));
        }
    }

    #[test]
    fn test_insert_resource() {
        let (mut s, emitted) = session("<p>x</p>");
        let id = s.insert_resource(&image_resource()).unwrap();
        assert_eq!(emitted.borrow().len(), 1);
        let doc = emitted.borrow()[0].clone();
        assert!(doc.contains(r#"src="https://cdn.example.com/uploads/cat.png""#));
        assert!(doc.contains(r#"alt="cat.png""#));
        assert!(!doc.contains("data-image-id"), "{doc}");
        assert!(s.overlay().contains(&id));
        assert_eq!(s.overlay().state(&id), Some(ImageState::Idle));
    }

    #[test]
    fn test_insert_into_unmounted_fails() {
        let (mut s, emitted) = session_on(MockSurface::unmounted());
        assert_eq!(
            s.insert_resource(&image_resource()),
            Err(EditorError::NotMounted)
        );
        assert!(emitted.borrow().is_empty());
    }

    #[test]
    fn test_resize_emits_once_on_release() {
        let (mut s, emitted) = session(r#"<img src="a.png">"#);
        let id = s.attach_images().remove(0);
        assert!(s.click_image(&id));
        assert!(s.begin_resize(&id, Corner::SouthEast, 100.0, 100.0));
        assert_eq!(s.drag_to(140.0, 120.0), Some(Size::new(240.0, 170.0)));
        assert_eq!(s.drag_to(-900.0, -900.0), Some(Size::new(50.0, 50.0)));
        assert!(emitted.borrow().is_empty());

        assert!(s.end_resize());
        assert_eq!(emitted.borrow().len(), 1);
        assert_eq!(s.overlay().state(&id), Some(ImageState::Selected));
        let view = s.surface().rendered[&id];
        assert_eq!(view.size, Some(Size::new(50.0, 50.0)));
        assert!(!view.resizing);

        assert!(!s.end_resize());
        assert_eq!(emitted.borrow().len(), 1);
    }

    #[test]
    fn test_align_emits() {
        let (mut s, emitted) = session(r#"<img src="a.png">"#);
        let id = s.attach_images().remove(0);
        s.click_image(&id);
        assert!(s.align_image(&id, Alignment::Center));
        assert_eq!(emitted.borrow().len(), 1);
        assert_eq!(s.surface().rendered[&id].alignment, Some(Alignment::Center));
    }

    #[test]
    fn test_click_moves_selection() {
        let (mut s, _) = session(r#"<img src="a.png"><img src="b.png">"#);
        let ids = s.attach_images();
        s.click_image(&ids[0]);
        s.click_image(&ids[1]);
        assert!(!s.surface().rendered[&ids[0]].selected);
        assert!(s.surface().rendered[&ids[1]].selected);
        s.click_background();
        assert!(!s.surface().rendered[&ids[1]].selected);
    }

    #[test]
    fn test_delete_confirmed() {
        let (mut s, emitted) = session(r#"<p>a</p><img src="a.png"><p>b</p>"#);
        let id = s.attach_images().remove(0);
        s.click_image(&id);
        assert_eq!(s.delete_image(&id, &MockPrompt::confirming(true)), Ok(true));
        assert_eq!(emitted.borrow().len(), 1);
        assert_eq!(emitted.borrow()[0], "<p>a</p><p>b</p>");
        assert!(!s.overlay().contains(&id));
    }

    #[test]
    fn test_delete_declined_keeps_selection() {
        let (mut s, emitted) = session(r#"<img src="a.png">"#);
        let id = s.attach_images().remove(0);
        s.click_image(&id);
        assert_eq!(s.delete_image(&id, &MockPrompt::confirming(false)), Ok(false));
        assert!(emitted.borrow().is_empty());
        assert_eq!(s.overlay().state(&id), Some(ImageState::Selected));
        assert_eq!(s.surface().image_count(), 1);
    }

    #[test]
    fn test_delete_unknown_image() {
        let (mut s, _) = session("");
        let ghost = ImageId::new("ghost");
        assert_eq!(
            s.delete_image(&ghost, &MockPrompt::confirming(true)),
            Err(EditorError::UnknownImage(ghost))
        );
    }

    #[test]
    fn test_teardown_forgets_overlays() {
        let (mut s, _) = session(r#"<img src="a.png">"#);
        s.attach_images();
        s.teardown();
        assert!(s.overlay().is_empty());
    }
}
