//! Ordered insertion strategies for embedded images.
//!
//! Which native insertion API works depends on the browser and on the state
//! of the selection, so insertion walks an explicit list: native "insert
//! HTML" first, then manual range insertion, then appending to the end.
//! A strategy reporting failure just falls through to the next one.

use crate::error::EditorError;
use crate::platform::EditableSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertStrategy {
    /// Native rich-text "insert HTML" at the selection.
    NativeInsertHtml,
    /// Delete the selection contents, insert the node, caret after it.
    RangeInsert,
    /// Append to the end of the editable region.
    AppendToEnd,
}

impl InsertStrategy {
    pub const DEFAULT_ORDER: [InsertStrategy; 3] = [
        InsertStrategy::NativeInsertHtml,
        InsertStrategy::RangeInsert,
        InsertStrategy::AppendToEnd,
    ];

    pub fn attempt<S: EditableSurface + ?Sized>(self, surface: &mut S, html: &str) -> bool {
        match self {
            InsertStrategy::NativeInsertHtml => surface.insert_html_at_selection(html),
            InsertStrategy::RangeInsert => surface.insert_at_range(html),
            InsertStrategy::AppendToEnd => surface.append(html),
        }
    }
}

/// Insert `html`, trying each strategy in `order` until one succeeds.
///
/// Aborts before trying anything when the surface is not mounted.
pub fn insert_with_fallback<S: EditableSurface + ?Sized>(
    surface: &mut S,
    html: &str,
    order: &[InsertStrategy],
) -> Result<InsertStrategy, EditorError> {
    if !surface.is_mounted() {
        return Err(EditorError::NotMounted);
    }

    for &strategy in order {
        if strategy.attempt(surface, html) {
            tracing::debug!(?strategy, "image inserted");
            return Ok(strategy);
        }
        tracing::debug!(?strategy, "insertion strategy failed, falling through");
    }

    Err(EditorError::InsertFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSurface;

    const HTML: &str = r#"<img src="a.png">"#;

    #[test]
    fn test_native_first() {
        let mut surface = MockSurface::with_content("<p>x</p>");
        let used = insert_with_fallback(&mut surface, HTML, &InsertStrategy::DEFAULT_ORDER);
        assert_eq!(used, Ok(InsertStrategy::NativeInsertHtml));
        assert!(surface.serialize().contains(HTML));
    }

    #[test]
    fn test_falls_through_to_range() {
        let mut surface = MockSurface::with_content("<p>x</p>");
        surface.native_insert_works = false;
        let used = insert_with_fallback(&mut surface, HTML, &InsertStrategy::DEFAULT_ORDER);
        assert_eq!(used, Ok(InsertStrategy::RangeInsert));
    }

    #[test]
    fn test_falls_through_to_append() {
        let mut surface = MockSurface::with_content("<p>x</p>");
        surface.native_insert_works = false;
        surface.range_insert_works = false;
        let used = insert_with_fallback(&mut surface, HTML, &InsertStrategy::DEFAULT_ORDER);
        assert_eq!(used, Ok(InsertStrategy::AppendToEnd));
        assert!(surface.serialize().ends_with(HTML));
    }

    #[test]
    fn test_unmounted_aborts_before_any_attempt() {
        let mut surface = MockSurface::unmounted();
        let used = insert_with_fallback(&mut surface, HTML, &InsertStrategy::DEFAULT_ORDER);
        assert_eq!(used, Err(EditorError::NotMounted));
        assert_eq!(surface.insert_attempts, 0);
    }

    #[test]
    fn test_all_fail() {
        let mut surface = MockSurface::with_content("");
        let used = insert_with_fallback(&mut surface, HTML, &[]);
        assert_eq!(used, Err(EditorError::InsertFailed));
    }
}
