//! Turning picked files into upload parts.

use bytes::Bytes;
use dioxus::prelude::*;
use mime_sniffer::MimeTypeSniffer;
use pressroom_common::UploadFile;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Sniffers answer these for content they do not recognise.
fn is_generic(mime: &str) -> bool {
    mime == FALLBACK_MIME || mime == "text/plain"
}

/// Guess a mime type from content, falling back to the file extension when
/// the content is not recognised.
pub fn guess_mime(name: &str, data: &Bytes) -> String {
    let sniffed = if data.is_empty() {
        None
    } else {
        data.sniff_mime_type()
    };
    if let Some(mime) = sniffed.filter(|m| !is_generic(m)) {
        return mime.to_string();
    }
    match mime_guess::from_path(name).first() {
        Some(mime) => mime.essence_str().to_string(),
        None => sniffed.unwrap_or(FALLBACK_MIME).to_string(),
    }
}

/// Read every file picked in a file input. Files that fail to read are
/// logged and skipped.
pub async fn read_files(evt: Event<FormData>) -> Vec<UploadFile> {
    let files = evt.files();
    let mut out = Vec::with_capacity(files.len());
    for file in files {
        let name = file.name();
        match file.read_bytes().await {
            Ok(data) => {
                let bytes = Bytes::from(data);
                let mime_type = guess_mime(&name, &bytes);
                tracing::debug!(%name, %mime_type, bytes = bytes.len(), "read file for upload");
                out.push(UploadFile {
                    name,
                    mime_type,
                    data: bytes.to_vec(),
                });
            }
            Err(e) => tracing::warn!(%name, "failed to read file: {e}"),
        }
    }
    out
}
