//! Shared handle wiring an [`EditorSession`] to the live DOM.
//!
//! The session lives behind `Rc<RefCell<..>>`. Every DOM listener holds only
//! a `Weak` and uses `try_borrow_mut`: native commands fire `input`
//! synchronously while a dispatch still holds the borrow, and those nested
//! events are skipped (the dispatch syncs on its own).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use pressroom_editor_core::{
    EditorCommand, EditorError, EditorSession, ImageId, KeybindingConfig, KeydownResult,
    MediaResource, PlatformError, ServerBase, SyncOutcome,
};
use wasm_bindgen::JsCast;

use crate::events::{keycombo_from_event, pointer, targets_image_container};
use crate::overlay::{OverlayEvent, OverlaySink};
use crate::platform::platform;
use crate::prompt::BrowserPrompt;
use crate::schedule::{REATTACH_DELAY_MS, Scheduler};
use crate::surface::BrowserSurface;

type Session = EditorSession<BrowserSurface>;

struct Inner {
    session: Session,
    drag: Option<DragGuard>,
    /// Drops a finished drag's listeners outside their own callback.
    drag_release: Scheduler,
    reattach: Scheduler,
    root_listeners: Vec<EventListener>,
}

/// Document-level mousemove/mouseup listeners for one resize drag.
///
/// Exists exactly as long as the drag: dropping it removes both listeners.
pub struct DragGuard {
    _listeners: [EventListener; 2],
}

impl DragGuard {
    fn open(weak: Weak<RefCell<Inner>>) -> Option<Self> {
        let document = web_sys::window()?.document()?;

        let on_move = {
            let weak = weak.clone();
            EventListener::new(&document, "mousemove", move |event| {
                let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() else {
                    return;
                };
                let Some(inner) = weak.upgrade() else { return };
                let Ok(mut inner) = inner.try_borrow_mut() else {
                    return;
                };
                let (x, y) = pointer(mouse);
                inner.session.drag_to(x, y);
            })
        };

        let on_up = EventListener::new(&document, "mouseup", move |_| {
            let Some(inner) = weak.upgrade() else { return };
            let Ok(mut inner) = inner.try_borrow_mut() else {
                return;
            };
            inner.session.end_resize();
            if let Some(guard) = inner.drag.take() {
                inner.drag_release.schedule(0, move || drop(guard));
            }
        });

        Some(Self {
            _listeners: [on_move, on_up],
        })
    }
}

/// A mounted rich editing surface.
///
/// Cloning shares the same editor. Dropping the last clone (or calling
/// [`teardown`](Self::teardown)) removes every listener and cancels pending
/// re-attach callbacks.
#[derive(Clone)]
pub struct BrowserEditor {
    inner: Rc<RefCell<Inner>>,
}

impl BrowserEditor {
    /// Attach to the element with id `editor_id`.
    ///
    /// `on_change` receives the serialized Document after every edit.
    pub fn mount(
        editor_id: &str,
        server_base: ServerBase,
        on_change: impl FnMut(String) + 'static,
    ) -> Result<Self, PlatformError> {
        let surface = BrowserSurface::new(editor_id);
        let root = surface
            .root()
            .ok_or_else(|| PlatformError(format!("no element #{editor_id}")))?;

        let keybindings = KeybindingConfig::default_for_platform(platform().uses_meta());
        let session = EditorSession::new(surface, server_base, keybindings, on_change);

        let inner = Rc::new(RefCell::new(Inner {
            session,
            drag: None,
            drag_release: Scheduler::new(),
            reattach: Scheduler::new(),
            root_listeners: Vec::new(),
        }));
        let weak = Rc::downgrade(&inner);

        let sink: OverlaySink = {
            let weak = weak.clone();
            Rc::new(move |event| handle_overlay_event(&weak, event))
        };

        let listeners = vec![
            {
                let weak = weak.clone();
                EventListener::new(&root, "input", move |_| {
                    let Some(inner) = weak.upgrade() else { return };
                    match inner.try_borrow_mut() {
                        Ok(mut inner) => inner.session.on_input(),
                        Err(_) => tracing::trace!("nested input event skipped"),
                    };
                })
            },
            {
                let weak = weak.clone();
                EventListener::new_with_options(
                    &root,
                    "keydown",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        let Some(key) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                            return;
                        };
                        let Some(inner) = weak.upgrade() else { return };
                        let Ok(mut inner) = inner.try_borrow_mut() else {
                            return;
                        };
                        let combo = keycombo_from_event(key);
                        if inner.session.handle_keydown(&combo, &BrowserPrompt)
                            == KeydownResult::Handled
                        {
                            event.prevent_default();
                        }
                    },
                )
            },
            {
                let weak = weak.clone();
                EventListener::new(&root, "click", move |event| {
                    if targets_image_container(event) {
                        return;
                    }
                    let Some(inner) = weak.upgrade() else { return };
                    if let Ok(mut inner) = inner.try_borrow_mut() {
                        inner.session.click_background();
                    }
                })
            },
        ];

        {
            let mut guard = inner.borrow_mut();
            guard.session.surface_mut().set_sink(sink);
            guard.root_listeners = listeners;
            let attached = guard.session.attach_images();
            tracing::debug!(editor_id, images = attached.len(), "editor mounted");
        }

        Ok(Self { inner })
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> Option<R> {
        match self.inner.try_borrow_mut() {
            Ok(mut inner) => Some(f(&mut inner)),
            Err(_) => {
                tracing::warn!("editor busy, call dropped");
                None
            }
        }
    }

    fn schedule_reattach(&self, inner: &mut Inner) {
        let weak = Rc::downgrade(&self.inner);
        inner.reattach.schedule(REATTACH_DELAY_MS, move || {
            let Some(inner) = weak.upgrade() else { return };
            if let Ok(mut inner) = inner.try_borrow_mut() {
                let fresh = inner.session.attach_images();
                tracing::debug!(fresh = fresh.len(), "overlays re-attached");
            };
        });
    }

    /// Toolbar entry point.
    pub fn dispatch(&self, command: EditorCommand) -> bool {
        self.with_inner(|inner| inner.session.dispatch(command, &BrowserPrompt))
            .unwrap_or(false)
    }

    /// Apply a Document value coming from the host. Content is only replaced
    /// when it differs from what the editor already shows.
    pub fn set_value(&self, value: &str) -> SyncOutcome {
        self.with_inner(|inner| {
            let outcome = inner.session.set_document(value);
            if outcome == SyncOutcome::Replaced {
                self.schedule_reattach(inner);
            }
            outcome
        })
        .unwrap_or(SyncOutcome::Unchanged)
    }

    /// Insert an image for a resource picked in the media modal.
    pub fn insert_resource(&self, resource: &MediaResource) -> Result<ImageId, EditorError> {
        self.with_inner(|inner| {
            let id = inner.session.insert_resource(resource)?;
            // Layout may still be settling; a second pass is harmless.
            self.schedule_reattach(inner);
            Ok(id)
        })
        .unwrap_or(Err(EditorError::NotMounted))
    }

    /// Replace the change callback, e.g. when the host re-renders.
    pub fn set_on_change(&self, on_change: impl FnMut(String) + 'static) {
        self.with_inner(|inner| inner.session.set_on_change(on_change));
    }

    /// Remove every listener and cancel pending callbacks.
    pub fn teardown(&self) {
        self.with_inner(|inner| {
            inner.drag = None;
            inner.drag_release.cancel();
            inner.reattach.cancel();
            inner.root_listeners.clear();
            inner.session.surface_mut().clear_chrome();
            inner.session.teardown();
        });
    }

    /// Whether document-level drag listeners are currently installed.
    pub fn is_dragging(&self) -> bool {
        self.inner.try_borrow().is_ok_and(|inner| inner.drag.is_some())
    }

    /// Whether an overlay re-attach is still waiting to run.
    pub fn reattach_pending(&self) -> bool {
        self.inner
            .try_borrow()
            .is_ok_and(|inner| inner.reattach.is_pending())
    }
}

fn handle_overlay_event(weak: &Weak<RefCell<Inner>>, event: OverlayEvent) {
    let Some(rc) = weak.upgrade() else { return };
    let Ok(mut inner) = rc.try_borrow_mut() else {
        tracing::trace!(?event, "overlay event while busy, skipped");
        return;
    };

    match event {
        OverlayEvent::ImageClicked(id) => {
            inner.session.click_image(&id);
        }
        OverlayEvent::HandlePressed { id, corner, x, y } => {
            if inner.session.begin_resize(&id, corner, x, y) {
                // Replacing an older guard drops its listeners.
                inner.drag = DragGuard::open(weak.clone());
            }
        }
        OverlayEvent::Align(id, alignment) => {
            inner.session.align_image(&id, alignment);
        }
        OverlayEvent::Delete(id) => {
            if let Err(e) = inner.session.delete_image(&id, &BrowserPrompt) {
                tracing::warn!(%id, error = %e, "delete failed");
            }
        }
    }
}
