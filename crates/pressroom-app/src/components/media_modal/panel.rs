use dioxus::prelude::*;
use pressroom_common::error::LOGIN_REQUIRED_MESSAGE;
use pressroom_common::{
    ClickOutcome, LibraryState, LoadState, MediaError, MediaId, MediaListQuery, MediaResource,
    ModalMode, TypeFilter, ViewMode,
};
use pressroom_editor_browser::{BrowserPrompt, UserPrompt};

use super::item::MediaItem;
use crate::auth::media_client;
use crate::upload::read_files;

/// File input `accept` value for a type filter.
pub fn accept_attr(filter: TypeFilter) -> Option<&'static str> {
    match filter {
        TypeFilter::Image => Some("image/*"),
        TypeFilter::Video => Some("video/*"),
        TypeFilter::All | TypeFilter::Document => None,
    }
}

fn delete_confirm_message(count: usize) -> String {
    if count == 1 {
        "Delete 1 selected file? This cannot be undone.".to_string()
    } else {
        format!("Delete {count} selected files? This cannot be undone.")
    }
}

/// Inline message for a failed delete or upload. Authentication failures
/// point at logging in rather than at the action.
fn action_failure_message(action: &str, err: &MediaError) -> String {
    if err.is_auth() {
        LOGIN_REQUIRED_MESSAGE.to_string()
    } else {
        format!("{action} failed: {err}")
    }
}

/// Search, filter, grid/list toggle and the resource list itself.
///
/// Fetches the library when mounted. A retry issues a fresh request; a
/// response to an older request is dropped.
#[component]
pub fn MediaLibraryPanel(
    #[props(default)] mode: ModalMode,
    #[props(default)] accept: TypeFilter,
    on_select: EventHandler<MediaResource>,
) -> Element {
    let mut state = use_signal(|| LibraryState::new(mode, accept));
    let mut generation = use_signal(|| 0u64);
    let mut busy = use_signal(|| false);
    let mut action_error: Signal<Option<String>> = use_signal(|| None);

    let mut load = move || {
        let current = *generation.peek() + 1;
        generation.set(current);
        state.write().begin_load();
        spawn(async move {
            let result = media_client().list(&MediaListQuery::default()).await;
            if *generation.peek() != current {
                tracing::debug!(current, "stale media list response dropped");
                return;
            }
            state.write().finish_load(result);
        });
    };

    use_hook(move || load());

    let on_item = move |id: MediaId| {
        let outcome = state.write().click(&id);
        match outcome {
            ClickOutcome::Chosen(resource) => on_select.call(resource),
            ClickOutcome::Toggled { selected } => {
                tracing::trace!(%id, selected, "selection toggled");
            }
            ClickOutcome::Ignored => {}
        }
    };

    let delete_selected = move |_| {
        let ids = state.read().selected_ids();
        if ids.is_empty() || !BrowserPrompt.confirm(&delete_confirm_message(ids.len())) {
            return;
        }
        busy.set(true);
        action_error.set(None);
        spawn(async move {
            match media_client().bulk_delete(&ids).await {
                Ok(()) => {
                    tracing::info!(count = ids.len(), "media deleted");
                    state.write().apply_deleted(&ids);
                }
                Err(e) => {
                    tracing::warn!("bulk delete failed: {e}");
                    action_error.set(Some(action_failure_message("Delete", &e)));
                }
            }
            busy.set(false);
        });
    };

    let upload = move |evt: Event<FormData>| {
        busy.set(true);
        action_error.set(None);
        spawn(async move {
            let files = read_files(evt).await;
            if files.is_empty() {
                busy.set(false);
                return;
            }
            match media_client().upload(files).await {
                Ok(uploaded) => {
                    tracing::info!(count = uploaded.len(), "media uploaded");
                    state.write().prepend(uploaded);
                }
                Err(e) => {
                    tracing::warn!("upload failed: {e}");
                    action_error.set(Some(action_failure_message("Upload", &e)));
                }
            }
            busy.set(false);
        });
    };

    let snapshot = state.read();
    let view = snapshot.view();
    let search = snapshot.query().search.clone();
    let filter = snapshot.query().filter;
    let load_state = snapshot.load_state().clone();
    let visible: Vec<MediaResource> = snapshot.visible().into_iter().cloned().collect();
    let selected: Vec<bool> = visible.iter().map(|r| snapshot.is_selected(&r.id)).collect();
    let selection_count = snapshot.selected_ids().len();
    let all_selected = snapshot.all_visible_selected();
    drop(snapshot);
    let nothing_visible = visible.is_empty();

    let list_class = match view {
        ViewMode::Grid => "media-list media-list-grid",
        ViewMode::List => "media-list media-list-list",
    };
    let view_toggle_label = match view.toggled() {
        ViewMode::Grid => "Grid view",
        ViewMode::List => "List view",
    };
    let select_all_label = if all_selected { "Clear selection" } else { "Select all" };

    rsx! {
        div { class: "media-library",
            div { class: "media-controls",
                input {
                    r#type: "search",
                    class: "media-search",
                    placeholder: "Search by filename",
                    value: "{search}",
                    oninput: move |evt| state.write().set_search(evt.value()),
                }
                select {
                    class: "media-filter",
                    value: filter.as_str(),
                    onchange: move |evt| state.write().set_filter(TypeFilter::parse(&evt.value())),
                    for option_filter in TypeFilter::ALL {
                        option {
                            key: "{option_filter.as_str()}",
                            value: option_filter.as_str(),
                            selected: option_filter == filter,
                            {option_filter.label()}
                        }
                    }
                }
                button {
                    r#type: "button",
                    class: "media-view-toggle",
                    onclick: move |_| {
                        let next = state.read().view().toggled();
                        state.write().set_view(next);
                    },
                    "{view_toggle_label}"
                }
                label { class: "media-upload-button",
                    if busy() { "Working..." } else { "Upload" }
                    input {
                        r#type: "file",
                        multiple: true,
                        accept: accept_attr(accept),
                        style: "display: none",
                        disabled: busy(),
                        onchange: upload,
                    }
                }
            }

            if mode == ModalMode::Manage {
                div { class: "media-selection-bar",
                    button {
                        r#type: "button",
                        class: "media-select-all",
                        disabled: nothing_visible,
                        onclick: move |_| state.write().toggle_select_all(),
                        "{select_all_label}"
                    }
                    if selection_count > 0 {
                        span { class: "media-selection-count", "{selection_count} selected" }
                        button {
                            r#type: "button",
                            class: "media-delete-selected",
                            disabled: busy(),
                            onclick: delete_selected,
                            "Delete selected"
                        }
                    }
                }
            }

            if let Some(message) = action_error() {
                div { class: "media-error", role: "alert", "{message}" }
            }

            match load_state {
                LoadState::Loading => rsx! {
                    div { class: "media-status", "Loading media..." }
                },
                LoadState::Failed { auth, message } => rsx! {
                    div { class: "media-error", role: "alert",
                        p { "{message}" }
                        if !auth {
                            button {
                                r#type: "button",
                                class: "media-retry",
                                onclick: move |_| load(),
                                "Retry"
                            }
                        }
                    }
                },
                LoadState::Loaded if nothing_visible => rsx! {
                    div { class: "media-status", "No media found." }
                },
                LoadState::Loaded => rsx! {
                    div { class: list_class,
                        for (resource, is_selected) in visible.into_iter().zip(selected) {
                            MediaItem {
                                key: "{resource.id}",
                                resource,
                                view,
                                selected: is_selected,
                                on_click: on_item,
                            }
                        }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_follows_filter() {
        assert_eq!(accept_attr(TypeFilter::Image), Some("image/*"));
        assert_eq!(accept_attr(TypeFilter::Video), Some("video/*"));
        assert_eq!(accept_attr(TypeFilter::All), None);
        assert_eq!(accept_attr(TypeFilter::Document), None);
    }

    #[test]
    fn auth_failures_ask_for_login() {
        let err = MediaError::Unauthorized("no session token".to_string());
        assert_eq!(action_failure_message("Delete", &err), LOGIN_REQUIRED_MESSAGE);
        assert_eq!(action_failure_message("Upload", &err), LOGIN_REQUIRED_MESSAGE);

        let err = MediaError::Http {
            status: 500,
            message: "disk full".to_string(),
        };
        insta::assert_snapshot!(
            action_failure_message("Upload", &err),
            @"Upload failed: media API returned 500: disk full"
        );
    }

    #[test]
    fn confirm_message_counts_files() {
        insta::assert_snapshot!(delete_confirm_message(1), @"Delete 1 selected file? This cannot be undone.");
        insta::assert_snapshot!(delete_confirm_message(3), @"Delete 3 selected files? This cannot be undone.");
    }
}
