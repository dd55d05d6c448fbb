//! Per-image resize / align / delete overlay state.
//!
//! Each embedded image is in exactly one of three states:
//!
//! ```text
//!   Idle ──click──▶ Selected ──handle mousedown──▶ Resizing
//!    ▲                │   ▲                          │
//!    └─other clicked──┘   └──────── mouseup ─────────┘
//! ```
//!
//! Selection is exclusive across the document: selecting one image puts
//! every other image back to Idle. Only one drag session exists at a time.
//! Alignment and explicit size are kept alongside the state; deletion
//! removes the entry entirely.

use indexmap::IndexMap;

use crate::image::ImageId;

/// Smallest width or height an image can be dragged to, in pixels.
pub const MIN_IMAGE_SIZE: f64 = 50.0;
/// Largest width or height an image can be dragged to, in pixels.
pub const MAX_IMAGE_SIZE: f64 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Resize handle position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NorthWest,
        Corner::NorthEast,
        Corner::SouthWest,
        Corner::SouthEast,
    ];

    /// Short name used in handle class names.
    pub fn as_str(self) -> &'static str {
        match self {
            Corner::NorthWest => "nw",
            Corner::NorthEast => "ne",
            Corner::SouthWest => "sw",
            Corner::SouthEast => "se",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nw" => Some(Corner::NorthWest),
            "ne" => Some(Corner::NorthEast),
            "sw" => Some(Corner::SouthWest),
            "se" => Some(Corner::SouthEast),
            _ => None,
        }
    }

    /// Sign applied to pointer movement on each axis. The anchor is the
    /// opposite corner, so western handles grow with leftward movement and
    /// northern handles with upward movement.
    fn signs(self) -> (f64, f64) {
        match self {
            Corner::SouthEast => (1.0, 1.0),
            Corner::SouthWest => (-1.0, 1.0),
            Corner::NorthEast => (1.0, -1.0),
            Corner::NorthWest => (-1.0, -1.0),
        }
    }
}

/// New size after dragging `corner` by (`dx`, `dy`) from `start`.
///
/// Width and height move independently (no aspect lock) and are each
/// clamped to [`MIN_IMAGE_SIZE`, `MAX_IMAGE_SIZE`].
pub fn resize(corner: Corner, start: Size, dx: f64, dy: f64) -> Size {
    let (sx, sy) = corner.signs();
    Size {
        width: (start.width + sx * dx).clamp(MIN_IMAGE_SIZE, MAX_IMAGE_SIZE),
        height: (start.height + sy * dy).clamp(MIN_IMAGE_SIZE, MAX_IMAGE_SIZE),
    }
}

/// Container alignment set from the control bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    pub fn css_class(self) -> &'static str {
        match self {
            Alignment::Left => "align-left",
            Alignment::Center => "align-center",
            Alignment::Right => "align-right",
        }
    }

    pub fn text_align(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    /// Read back from a container's `text-align`.
    pub fn from_text_align(s: &str) -> Option<Self> {
        match s.trim() {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }
}

/// An in-progress drag on one handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub corner: Corner,
    pub start_x: f64,
    pub start_y: f64,
    pub start_size: Size,
}

impl DragSession {
    pub fn size_at(&self, x: f64, y: f64) -> Size {
        resize(self.corner, self.start_size, x - self.start_x, y - self.start_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ImageState {
    #[default]
    Idle,
    Selected,
    Resizing(DragSession),
}

impl ImageState {
    /// Handles and control bar are visible.
    pub fn shows_controls(&self) -> bool {
        !matches!(self, ImageState::Idle)
    }
}

/// Everything the platform needs to draw one image's overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageView {
    pub selected: bool,
    pub resizing: bool,
    /// `None` keeps the responsive default styling.
    pub size: Option<Size>,
    pub alignment: Option<Alignment>,
}

#[derive(Debug, Clone, Default)]
struct ImageOverlay {
    state: ImageState,
    size: Option<Size>,
    alignment: Option<Alignment>,
}

/// Overlay state for every embedded image, keyed by [`ImageId`] in
/// document order.
#[derive(Debug, Default)]
pub struct OverlayController {
    images: IndexMap<ImageId, ImageOverlay>,
    minted: u64,
}

impl OverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh id, unique within this controller.
    pub fn next_image_id(&mut self) -> ImageId {
        self.minted += 1;
        ImageId::nth(self.minted)
    }

    /// Start tracking images. Already tracked ids are left alone, so running
    /// this repeatedly never duplicates anything. Returns the ids that were new.
    pub fn attach(&mut self, ids: impl IntoIterator<Item = ImageId>) -> Vec<ImageId> {
        let mut fresh = Vec::new();
        for id in ids {
            if self.images.contains_key(&id) {
                continue;
            }
            self.images.insert(id.clone(), ImageOverlay::default());
            fresh.push(id);
        }
        if !fresh.is_empty() {
            tracing::debug!(count = fresh.len(), "attached image overlays");
        }
        fresh
    }

    /// Forget images that are no longer in the document.
    pub fn retain(&mut self, present: &[ImageId]) {
        self.images.retain(|id, _| present.contains(id));
    }

    /// Forget everything, e.g. after the content was replaced wholesale.
    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn contains(&self, id: &ImageId) -> bool {
        self.images.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ImageId> {
        self.images.keys()
    }

    pub fn state(&self, id: &ImageId) -> Option<ImageState> {
        self.images.get(id).map(|o| o.state)
    }

    pub fn size(&self, id: &ImageId) -> Option<Size> {
        self.images.get(id).and_then(|o| o.size)
    }

    pub fn alignment(&self, id: &ImageId) -> Option<Alignment> {
        self.images.get(id).and_then(|o| o.alignment)
    }

    pub fn view(&self, id: &ImageId) -> Option<ImageView> {
        self.images.get(id).map(|o| ImageView {
            selected: o.state.shows_controls(),
            resizing: matches!(o.state, ImageState::Resizing(_)),
            size: o.size,
            alignment: o.alignment,
        })
    }

    /// The image whose controls are visible, if any.
    pub fn selected(&self) -> Option<&ImageId> {
        self.images
            .iter()
            .find(|(_, o)| o.state.shows_controls())
            .map(|(id, _)| id)
    }

    /// The image with an active drag session, if any.
    pub fn resizing(&self) -> Option<&ImageId> {
        self.images
            .iter()
            .find(|(_, o)| matches!(o.state, ImageState::Resizing(_)))
            .map(|(id, _)| id)
    }

    /// Select `id`, forcing every other image back to Idle.
    pub fn select(&mut self, id: &ImageId) -> bool {
        if !self.images.contains_key(id) {
            return false;
        }
        for (other, overlay) in self.images.iter_mut() {
            if other == id {
                if overlay.state == ImageState::Idle {
                    overlay.state = ImageState::Selected;
                }
            } else {
                overlay.state = ImageState::Idle;
            }
        }
        true
    }

    pub fn deselect_all(&mut self) {
        for overlay in self.images.values_mut() {
            overlay.state = ImageState::Idle;
        }
    }

    /// Start dragging `corner` of `id`. Any other drag session is ended and
    /// the image becomes the selected one.
    pub fn begin_resize(
        &mut self,
        id: &ImageId,
        corner: Corner,
        x: f64,
        y: f64,
        current: Size,
    ) -> bool {
        if !self.select(id) {
            return false;
        }
        let Some(overlay) = self.images.get_mut(id) else {
            return false;
        };
        overlay.state = ImageState::Resizing(DragSession {
            corner,
            start_x: x,
            start_y: y,
            start_size: current,
        });
        tracing::trace!(%id, ?corner, x, y, "drag session started");
        true
    }

    /// Pointer moved while the button is held. Returns the new size of the
    /// image being resized, or `None` when no drag is active.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<(ImageId, Size)> {
        let (id, overlay) = self
            .images
            .iter_mut()
            .find(|(_, o)| matches!(o.state, ImageState::Resizing(_)))?;
        let ImageState::Resizing(session) = overlay.state else {
            return None;
        };
        let size = session.size_at(x, y);
        overlay.size = Some(size);
        Some((id.clone(), size))
    }

    /// Button released. Ends the drag, leaving the image Selected. Returns the
    /// final size if the image has an explicit size.
    pub fn end_resize(&mut self) -> Option<(ImageId, Option<Size>)> {
        let (id, overlay) = self
            .images
            .iter_mut()
            .find(|(_, o)| matches!(o.state, ImageState::Resizing(_)))?;
        overlay.state = ImageState::Selected;
        tracing::trace!(%id, size = ?overlay.size, "drag session ended");
        Some((id.clone(), overlay.size))
    }

    /// Set the container alignment. Exactly one alignment is active at a time.
    pub fn align(&mut self, id: &ImageId, alignment: Alignment) -> bool {
        match self.images.get_mut(id) {
            Some(overlay) => {
                overlay.alignment = Some(alignment);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &ImageId) -> bool {
        self.images.shift_remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_with(n: u64) -> (OverlayController, Vec<ImageId>) {
        let mut c = OverlayController::new();
        let ids: Vec<ImageId> = (0..n).map(|_| c.next_image_id()).collect();
        c.attach(ids.clone());
        (c, ids)
    }

    #[test]
    fn test_bottom_right_grows_with_positive_motion() {
        let size = resize(Corner::SouthEast, Size::new(200.0, 150.0), 40.0, 20.0);
        assert_eq!(size, Size::new(240.0, 170.0));
    }

    #[test]
    fn test_bottom_right_clamps_to_minimum() {
        let size = resize(Corner::SouthEast, Size::new(200.0, 150.0), -500.0, -500.0);
        assert_eq!(size, Size::new(50.0, 50.0));
    }

    #[test]
    fn test_top_left_grows_with_negative_motion() {
        let size = resize(Corner::NorthWest, Size::new(200.0, 150.0), -40.0, -20.0);
        assert_eq!(size, Size::new(240.0, 170.0));
    }

    #[test]
    fn test_mixed_corners_invert_one_axis() {
        let start = Size::new(200.0, 150.0);
        assert_eq!(resize(Corner::NorthEast, start, 10.0, 10.0), Size::new(210.0, 140.0));
        assert_eq!(resize(Corner::SouthWest, start, 10.0, 10.0), Size::new(190.0, 160.0));
    }

    #[test]
    fn test_clamp_holds_for_extreme_deltas() {
        let start = Size::new(300.0, 300.0);
        let deltas = [-1e9, -801.0, -250.0, -1.0, 0.0, 1.0, 499.0, 501.0, 1e9];
        for corner in Corner::ALL {
            for &dx in &deltas {
                for &dy in &deltas {
                    let s = resize(corner, start, dx, dy);
                    assert!(
                        (MIN_IMAGE_SIZE..=MAX_IMAGE_SIZE).contains(&s.width),
                        "{corner:?} dx={dx} -> {s:?}"
                    );
                    assert!(
                        (MIN_IMAGE_SIZE..=MAX_IMAGE_SIZE).contains(&s.height),
                        "{corner:?} dy={dy} -> {s:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_no_aspect_lock() {
        // Free resize: only the width changes on a purely horizontal drag.
        let size = resize(Corner::SouthEast, Size::new(200.0, 100.0), 100.0, 0.0);
        assert_eq!(size, Size::new(300.0, 100.0));
    }

    #[test]
    fn test_attach_is_idempotent() {
        let (mut c, ids) = controller_with(2);
        assert!(c.attach(ids.clone()).is_empty());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_selection_is_exclusive() {
        let (mut c, ids) = controller_with(3);
        let clicks = [0, 1, 1, 2, 0, 2, 2, 1];
        for &i in &clicks {
            c.select(&ids[i]);
            let visible = ids
                .iter()
                .filter(|id| c.state(id).is_some_and(|s| s.shows_controls()))
                .count();
            assert_eq!(visible, 1);
            assert_eq!(c.selected(), Some(&ids[i]));
        }
        c.deselect_all();
        assert_eq!(c.selected(), None);
    }

    #[test]
    fn test_resize_lifecycle() {
        let (mut c, ids) = controller_with(2);
        let id = &ids[0];
        c.select(id);
        assert!(c.begin_resize(id, Corner::SouthEast, 10.0, 10.0, Size::new(200.0, 150.0)));
        assert!(matches!(c.state(id), Some(ImageState::Resizing(_))));

        assert_eq!(c.drag_to(30.0, 15.0), Some((id.clone(), Size::new(220.0, 155.0))));
        assert_eq!(c.drag_to(50.0, 30.0), Some((id.clone(), Size::new(240.0, 170.0))));

        assert_eq!(c.end_resize(), Some((id.clone(), Some(Size::new(240.0, 170.0)))));
        assert_eq!(c.state(id), Some(ImageState::Selected));
        assert_eq!(c.size(id), Some(Size::new(240.0, 170.0)));

        // No session: moves and releases are ignored.
        assert_eq!(c.drag_to(500.0, 500.0), None);
        assert_eq!(c.end_resize(), None);
    }

    #[test]
    fn test_new_drag_ends_previous_session() {
        let (mut c, ids) = controller_with(2);
        c.begin_resize(&ids[0], Corner::SouthEast, 0.0, 0.0, Size::new(100.0, 100.0));
        c.begin_resize(&ids[1], Corner::NorthWest, 0.0, 0.0, Size::new(100.0, 100.0));
        assert_eq!(c.state(&ids[0]), Some(ImageState::Idle));
        assert_eq!(c.resizing(), Some(&ids[1]));
        // Moves only affect the live session.
        let (moved, _) = c.drag_to(-10.0, -10.0).unwrap();
        assert_eq!(moved, ids[1]);
        assert_eq!(c.size(&ids[0]), None);
    }

    #[test]
    fn test_align_replaces_previous() {
        let (mut c, ids) = controller_with(1);
        c.select(&ids[0]);
        assert!(c.align(&ids[0], Alignment::Left));
        assert!(c.align(&ids[0], Alignment::Right));
        assert_eq!(c.alignment(&ids[0]), Some(Alignment::Right));
        assert_eq!(c.state(&ids[0]), Some(ImageState::Selected));
    }

    #[test]
    fn test_remove_and_retain() {
        let (mut c, ids) = controller_with(3);
        assert!(c.remove(&ids[1]));
        assert!(!c.remove(&ids[1]));
        c.retain(&[ids[2].clone()]);
        assert_eq!(c.ids().cloned().collect::<Vec<_>>(), vec![ids[2].clone()]);
    }

    #[test]
    fn test_unknown_ids_are_rejected() {
        let mut c = OverlayController::new();
        let ghost = ImageId::new("ghost");
        assert!(!c.select(&ghost));
        assert!(!c.begin_resize(&ghost, Corner::SouthEast, 0.0, 0.0, Size::new(1.0, 1.0)));
        assert!(!c.align(&ghost, Alignment::Center));
    }
}
