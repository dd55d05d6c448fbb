//! Document synchronization between the host and the editable surface.
//!
//! The host owns the Document string. Edits flow out through `capture`;
//! new values flow in through `apply_external`, which only touches the
//! surface when the incoming value actually differs from what the surface
//! already serializes to. The editor's own output echoed back through the
//! host therefore never rewrites the DOM and never disturbs the caret.

use crate::platform::EditableSurface;

/// What `apply_external` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Incoming value equals the current serialization; nothing touched.
    Unchanged,
    /// Surface content replaced. Overlays are gone and must be re-attached.
    Replaced,
}

/// Tracks the last value exchanged with the host.
#[derive(Debug, Clone, Default)]
pub struct ContentSync {
    last: Option<String>,
}

impl ContentSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value emitted to or applied from the host.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Serialize the surface for the change callback.
    pub fn capture<S: EditableSurface + ?Sized>(&mut self, surface: &S) -> String {
        let markup = surface.serialize();
        tracing::trace!(len = markup.len(), "captured document from surface");
        self.last = Some(markup.clone());
        markup
    }

    /// Apply a Document value supplied by the host.
    pub fn apply_external<S: EditableSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        incoming: &str,
    ) -> SyncOutcome {
        if self.last.as_deref() == Some(incoming) || surface.serialize() == incoming {
            self.last = Some(incoming.to_string());
            return SyncOutcome::Unchanged;
        }

        tracing::debug!(len = incoming.len(), "replacing editor content from host");
        surface.replace_contents(incoming);
        self.last = Some(incoming.to_string());
        SyncOutcome::Replaced
    }
}
