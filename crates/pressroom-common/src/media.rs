//! Media Resource records from the remote library.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use smol_str::{SmolStr, ToSmolStr};

/// Identifier of a Media Resource.
///
/// The API has shipped both numeric and string ids, so either is accepted on
/// the way in. Always serialized as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MediaId(pub SmolStr);

impl MediaId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MediaId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Num(u64),
            Str(SmolStr),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Num(n) => MediaId(n.to_smolstr()),
            RawId::Str(s) => MediaId(s),
        })
    }
}

/// Who uploaded a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Uploader {
    #[serde(default)]
    pub id: Option<MediaId>,
    #[serde(alias = "name", alias = "username", default)]
    pub display_name: String,
}

/// A file record managed by the media library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaResource {
    pub id: MediaId,
    #[serde(alias = "original_name", alias = "filename")]
    pub original_name: String,
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Relative URL of the file, resolved against the configured server base.
    pub url: String,
    #[serde(alias = "thumbnail_url", default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(alias = "is_public", default)]
    pub is_public: bool,
    #[serde(alias = "is_featured", default)]
    pub is_featured: bool,
    #[serde(alias = "uploaded_by", default)]
    pub uploaded_by: Uploader,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updated_at", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MediaResource {
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime_type)
    }

    /// Size formatted for listings, e.g. `1.50 MB`.
    pub fn display_size(&self) -> String {
        humansize::format_size(self.size, humansize::DECIMAL)
    }
}

/// Coarse media category derived from the mime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else if mime.starts_with("audio/") {
            MediaKind::Audio
        } else {
            MediaKind::Document
        }
    }

    /// Glyph rendered in place of a preview for non-image resources.
    pub fn glyph(self) -> &'static str {
        match self {
            MediaKind::Image => "🖼",
            MediaKind::Video => "🎬",
            MediaKind::Audio => "🎵",
            MediaKind::Document => "📄",
        }
    }
}
