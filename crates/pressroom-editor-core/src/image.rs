//! Embedded Image Nodes.

use pressroom_common::{MediaResource, ServerBase};
use smol_str::{SmolStr, format_smolstr};

use crate::overlay::Size;

/// Marker attribute for images that get resize/align/delete affordances.
pub const RESIZABLE_ATTR: &str = "data-resizable";
/// Attribute holding the per-session image id.
pub const IMAGE_ID_ATTR: &str = "data-image-id";
pub const NATURAL_WIDTH_ATTR: &str = "data-natural-width";
pub const NATURAL_HEIGHT_ATTR: &str = "data-natural-height";
/// Class on every embedded image.
pub const IMAGE_CLASS: &str = "pressroom-image";

/// Responsive rendering used until the image is resized.
pub const DEFAULT_IMAGE_STYLE: &str = "max-width: 100%; height: auto; border-radius: 8px; \
     box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15); display: block; cursor: pointer;";

/// Inline style for an image, responsive until it has an explicit size.
pub fn image_style(size: Option<Size>) -> String {
    match size {
        None => DEFAULT_IMAGE_STYLE.to_string(),
        Some(size) => format!(
            "width: {}px; height: {}px; max-width: none; border-radius: 8px; \
             box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15); display: block; cursor: pointer;",
            size.width.round() as u32,
            size.height.round() as u32,
        ),
    }
}

/// Stable identifier of an embedded image within one editor session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub SmolStr);

impl ImageId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    /// Id for the `n`th image minted in a session.
    pub fn nth(n: u64) -> Self {
        Self(format_smolstr!("img-{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An image about to be inserted into the Document.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub id: ImageId,
    /// Absolute (or same-origin) source URL.
    pub src: String,
    /// Original filename of the resource.
    pub alt: String,
    /// Natural dimensions; unknown until the browser has loaded the file.
    pub natural: Option<Size>,
}

impl EmbeddedImage {
    pub fn from_resource(resource: &MediaResource, base: &ServerBase, id: ImageId) -> Self {
        Self {
            id,
            src: base.resolve(&resource.url),
            alt: resource.original_name.clone(),
            natural: None,
        }
    }

    pub fn to_html(&self) -> String {
        let (nat_w, nat_h) = match self.natural {
            Some(size) => (
                (size.width.round() as u32).to_string(),
                (size.height.round() as u32).to_string(),
            ),
            None => (String::new(), String::new()),
        };
        format!(
            r#"<img src="{src}" alt="{alt}" class="{IMAGE_CLASS}" {RESIZABLE_ATTR}="true" {IMAGE_ID_ATTR}="{id}" {NATURAL_WIDTH_ATTR}="{nat_w}" {NATURAL_HEIGHT_ATTR}="{nat_h}" style="{style}">"#,
            src = html_escape::encode_double_quoted_attribute(&self.src),
            alt = html_escape::encode_double_quoted_attribute(&self.alt),
            id = html_escape::encode_double_quoted_attribute(self.id.as_str()),
            style = DEFAULT_IMAGE_STYLE,
        )
    }
}
