//! Selection modal state.
//!
//! Everything the media selection modal knows lives here, independent of any
//! UI framework: the working set, search text, type filter, view mode and, in
//! manage mode, the set of selected ids. The state is created per modal open
//! and dropped on close.

use std::collections::BTreeSet;

use crate::config::ServerBase;
use crate::error::MediaError;
use crate::media::{MediaId, MediaKind, MediaResource};

/// Type filter offered by the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Image,
    Video,
    /// Anything that is neither image nor video.
    Document,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 4] = [
        TypeFilter::All,
        TypeFilter::Image,
        TypeFilter::Video,
        TypeFilter::Document,
    ];

    pub fn matches(self, mime: &str) -> bool {
        let mime = mime.trim().to_ascii_lowercase();
        match self {
            TypeFilter::All => true,
            TypeFilter::Image => mime.starts_with("image"),
            TypeFilter::Video => mime.starts_with("video"),
            TypeFilter::Document => !mime.starts_with("image") && !mime.starts_with("video"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TypeFilter::All => "All",
            TypeFilter::Image => "Images",
            TypeFilter::Video => "Videos",
            TypeFilter::Document => "Documents",
        }
    }

    /// Value for the `type` query parameter / select element.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Image => "image",
            TypeFilter::Video => "video",
            TypeFilter::Document => "document",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "image" => TypeFilter::Image,
            "video" => TypeFilter::Video,
            "document" => TypeFilter::Document,
            _ => TypeFilter::All,
        }
    }
}

/// Grid or list rendering. Affects layout only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

/// How the modal responds to clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalMode {
    /// Single pick: a click chooses the resource and closes the modal.
    #[default]
    Select,
    /// Library browser: clicks toggle membership in a selection set.
    Manage,
}

/// Search text plus type filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaQuery {
    pub search: String,
    pub filter: TypeFilter,
}

impl MediaQuery {
    /// Filename contains the search text (case-insensitive) and the mime type
    /// passes the type filter.
    pub fn matches(&self, resource: &MediaResource) -> bool {
        let needle = self.search.to_lowercase();
        let name_ok = needle.is_empty() || resource.original_name.to_lowercase().contains(&needle);
        name_ok && self.filter.matches(&resource.mime_type)
    }
}

/// Fetch status of the working set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed {
        /// Authentication-shaped failure: show the log-in message, not retry.
        auth: bool,
        message: String,
    },
}

/// What a click on a resource did.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Select mode: hand this resource to the caller and close.
    Chosen(MediaResource),
    /// Manage mode: membership flipped; `selected` is the new membership.
    Toggled { selected: bool },
    /// The id is not in the working set.
    Ignored,
}

/// How a resource is previewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Absolute URL of the thumbnail (preferred) or the file itself.
    Image(String),
    /// Non-image types show a glyph rather than trying to load a preview.
    Glyph(MediaKind),
}

impl Preview {
    pub fn for_resource(resource: &MediaResource, base: &ServerBase) -> Self {
        match resource.kind() {
            MediaKind::Image => {
                let src = resource
                    .thumbnail_url
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .unwrap_or(&resource.url);
                Preview::Image(base.resolve(src))
            }
            kind => Preview::Glyph(kind),
        }
    }
}

/// State of one selection modal instance.
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    mode: ModalMode,
    resources: Vec<MediaResource>,
    query: MediaQuery,
    view: ViewMode,
    selected: BTreeSet<MediaId>,
    load: LoadState,
}

impl LibraryState {
    pub fn new(mode: ModalMode, initial_filter: TypeFilter) -> Self {
        Self {
            mode,
            query: MediaQuery {
                search: String::new(),
                filter: initial_filter,
            },
            ..Default::default()
        }
    }

    pub fn mode(&self) -> ModalMode {
        self.mode
    }

    pub fn query(&self) -> &MediaQuery {
        &self.query
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn resources(&self) -> &[MediaResource] {
        &self.resources
    }

    /// A fresh request is in flight.
    pub fn begin_load(&mut self) {
        self.load = LoadState::Loading;
    }

    /// Replace the working set with a fetch result. No merging: the previous
    /// set and selection are discarded.
    pub fn finish_load(&mut self, result: Result<Vec<MediaResource>, MediaError>) {
        match result {
            Ok(resources) => {
                tracing::debug!(count = resources.len(), "library working set replaced");
                self.resources = resources;
                self.selected.clear();
                self.load = LoadState::Loaded;
            }
            Err(err) => {
                tracing::warn!(error = %err, "media library fetch failed");
                self.load = LoadState::Failed {
                    auth: err.is_auth(),
                    message: err.user_message().to_string(),
                };
            }
        }
    }

    /// Resources passing the current search and filter, in list order.
    pub fn visible(&self) -> Vec<&MediaResource> {
        self.resources
            .iter()
            .filter(|r| self.query.matches(r))
            .collect()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_filter(&mut self, filter: TypeFilter) {
        self.query.filter = filter;
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn click(&mut self, id: &MediaId) -> ClickOutcome {
        let Some(resource) = self.resources.iter().find(|r| &r.id == id) else {
            return ClickOutcome::Ignored;
        };
        match self.mode {
            ModalMode::Select => ClickOutcome::Chosen(resource.clone()),
            ModalMode::Manage => {
                let selected = if self.selected.remove(id) {
                    false
                } else {
                    self.selected.insert(id.clone());
                    true
                };
                ClickOutcome::Toggled { selected }
            }
        }
    }

    pub fn is_selected(&self, id: &MediaId) -> bool {
        self.selected.contains(id)
    }

    /// Select every visible resource, or clear the selection if that is
    /// already the case.
    pub fn toggle_select_all(&mut self) {
        if self.mode != ModalMode::Manage {
            return;
        }
        let visible: BTreeSet<MediaId> = self.visible().into_iter().map(|r| r.id.clone()).collect();
        if !visible.is_empty() && visible.is_subset(&self.selected) {
            self.selected.clear();
        } else {
            self.selected = visible;
        }
    }

    /// Whether "select all" currently reads as "clear".
    pub fn all_visible_selected(&self) -> bool {
        let visible = self.visible();
        !visible.is_empty() && visible.iter().all(|r| self.selected.contains(&r.id))
    }

    pub fn selected_ids(&self) -> Vec<MediaId> {
        self.selected.iter().cloned().collect()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Drop deleted ids from the working set and clear the selection.
    pub fn apply_deleted(&mut self, ids: &[MediaId]) {
        self.resources.retain(|r| !ids.contains(&r.id));
        self.selected.clear();
    }

    /// Put freshly uploaded resources at the top of the working set.
    pub fn prepend(&mut self, uploaded: Vec<MediaResource>) {
        let mut merged = uploaded;
        merged.append(&mut self.resources);
        self.resources = merged;
    }
}
