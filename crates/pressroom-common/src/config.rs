//! Configured server base for resolving relative resource URLs.

/// Prefix prepended to every relative resource URL before rendering.
///
/// May be empty, in which case relative paths are used as-is against the
/// current origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerBase(String);

impl ServerBase {
    pub fn new(base: impl AsRef<str>) -> Self {
        Self(base.as_ref().trim().trim_end_matches('/').to_string())
    }

    /// Same-origin base.
    pub fn same_origin() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_same_origin(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a resource URL against the base.
    ///
    /// URLs that are already absolute (scheme, protocol-relative, data or blob)
    /// are returned unchanged.
    pub fn resolve(&self, url: &str) -> String {
        let url = url.trim();
        if is_absolute(url) || self.0.is_empty() {
            return url.to_string();
        }
        format!("{}/{}", self.0, url.trim_start_matches('/'))
    }
}

fn is_absolute(url: &str) -> bool {
    let lowered = url.to_ascii_lowercase();
    lowered.starts_with("http://")
        || lowered.starts_with("https://")
        || lowered.starts_with("//")
        || lowered.starts_with("data:")
        || lowered.starts_with("blob:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_against_cdn() {
        let base = ServerBase::new("https://cdn.example.com");
        assert_eq!(
            base.resolve("/uploads/a.png"),
            "https://cdn.example.com/uploads/a.png"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let base = ServerBase::new("https://cdn.example.com/");
        assert_eq!(
            base.resolve("uploads/a.png"),
            "https://cdn.example.com/uploads/a.png"
        );
    }

    #[test]
    fn test_same_origin_passthrough() {
        let base = ServerBase::same_origin();
        assert!(base.is_same_origin());
        assert_eq!(base.resolve("/uploads/a.png"), "/uploads/a.png");
    }

    #[test]
    fn test_absolute_urls_untouched() {
        let base = ServerBase::new("https://cdn.example.com");
        assert_eq!(base.resolve("https://other.net/x.png"), "https://other.net/x.png");
        assert_eq!(base.resolve("//other.net/x.png"), "//other.net/x.png");
        assert_eq!(base.resolve("data:image/png;base64,AA"), "data:image/png;base64,AA");
    }
}
