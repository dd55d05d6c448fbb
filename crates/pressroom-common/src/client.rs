//! HTTP client for the media library endpoints.
//!
//! Works on native and `wasm32-unknown-unknown` (reqwest picks the fetch
//! backend in the browser).

use serde::{Deserialize, Serialize};

use crate::error::MediaError;
use crate::media::{MediaId, MediaResource};

/// Server-side filters for the list endpoint. Empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Mime prefix, e.g. `image`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Client for `/media` on the remote API.
#[derive(Debug, Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

/// List responses come back either bare or wrapped in `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    Bare(Vec<MediaResource>),
    Wrapped { data: Vec<MediaResource> },
}

impl ListEnvelope {
    fn into_inner(self) -> Vec<MediaResource> {
        match self {
            ListEnvelope::Bare(v) => v,
            ListEnvelope::Wrapped { data } => data,
        }
    }
}

#[derive(Serialize)]
struct BulkDeleteBody<'a> {
    ids: &'a [MediaId],
}

impl MediaClient {
    pub fn new(api_base: impl AsRef<str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.as_ref().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach the session token sent as a bearer credential.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// Missing token is an authentication failure, reported before any request.
    fn bearer(&self) -> Result<&str, MediaError> {
        self.token
            .as_deref()
            .ok_or_else(|| MediaError::Unauthorized("no session token".to_string()))
    }

    /// Fetch the resource list.
    pub async fn list(&self, query: &MediaListQuery) -> Result<Vec<MediaResource>, MediaError> {
        let token = self.bearer()?;
        let url = self.endpoint("media");
        tracing::debug!(%url, ?query, "fetching media list");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        let body = read_success(response).await?;
        let resources = decode_list(&body)?;

        tracing::debug!(count = resources.len(), "media list loaded");
        Ok(resources)
    }

    /// Delete every id in one request.
    pub async fn bulk_delete(&self, ids: &[MediaId]) -> Result<(), MediaError> {
        if ids.is_empty() {
            return Ok(());
        }
        let token = self.bearer()?;
        let url = self.endpoint("media/bulk");
        tracing::debug!(%url, count = ids.len(), "bulk deleting media");

        let response = self
            .http
            .delete(&url)
            .bearer_auth(token)
            .json(&BulkDeleteBody { ids })
            .send()
            .await?;
        read_success(response).await?;
        Ok(())
    }

    /// Upload one or more files as multipart form data under the `files` field.
    pub async fn upload(&self, files: Vec<UploadFile>) -> Result<Vec<MediaResource>, MediaError> {
        let token = self.bearer()?;
        let url = self.endpoint("media/upload");

        let mut form = reqwest::multipart::Form::new();
        for file in files {
            tracing::debug!(name = %file.name, bytes = file.data.len(), "adding upload part");
            let part = reqwest::multipart::Part::bytes(file.data)
                .file_name(file.name)
                .mime_str(&file.mime_type)?;
            form = form.part("files", part);
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let body = read_success(response).await?;
        decode_list(&body)
    }
}

/// Read the body of a response, mapping non-success statuses to [`MediaError`].
async fn read_success(response: reqwest::Response) -> Result<String, MediaError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        return Ok(body);
    }
    let err = MediaError::from_status(status, &body);
    tracing::warn!(%status, auth = err.is_auth(), "media request failed");
    Err(err)
}

/// Decode a list response body (bare array or `data` envelope).
pub fn decode_list(body: &str) -> Result<Vec<MediaResource>, MediaError> {
    let envelope: ListEnvelope = serde_json::from_str(body)?;
    Ok(envelope.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: &str = r#"{
        "id": 1,
        "originalName": "sunset.jpg",
        "mimeType": "image/jpeg",
        "url": "/uploads/sunset.jpg",
        "createdAt": "2024-05-01T10:00:00Z"
    }"#;

    #[test]
    fn test_decode_bare_list() {
        let body = format!("[{ONE}]");
        let list = decode_list(&body).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].original_name, "sunset.jpg");
    }

    #[test]
    fn test_decode_wrapped_list() {
        let body = format!(r#"{{"data": [{ONE}, {ONE}], "total": 2}}"#);
        let list = decode_list(&body).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_list("<html>oops</html>").unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
        assert!(!err.is_auth());
    }

    #[test]
    fn test_query_serialization_skips_empty() {
        let query = MediaListQuery {
            search: None,
            kind: Some("image".to_string()),
            limit: None,
        };
        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"type":"image"}"#);
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let client = MediaClient::new("https://api.example.com/v1/");
        assert_eq!(client.api_base(), "https://api.example.com/v1");
        assert_eq!(client.endpoint("/media"), "https://api.example.com/v1/media");
    }

    #[tokio::test]
    async fn test_missing_token_is_auth_failure() {
        let client = MediaClient::new("http://127.0.0.1:9").with_token(Some("  ".into()));
        let err = client.list(&MediaListQuery::default()).await.unwrap_err();
        assert!(err.is_auth());

        let err = client.upload(vec![]).await.unwrap_err();
        assert!(err.is_auth());
    }

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_read_success_classifies_status() {
        assert_eq!(read_success(response(200, "[]")).await.unwrap(), "[]");

        let err = read_success(response(403, r#"{"message": "forbidden"}"#))
            .await
            .unwrap_err();
        assert!(err.is_auth());

        let err = read_success(response(404, "missing")).await.unwrap_err();
        assert!(matches!(err, MediaError::Http { status: 404, .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_bulk_delete_empty_is_noop() {
        let client = MediaClient::new("http://127.0.0.1:9");
        assert!(client.bulk_delete(&[]).await.is_ok());
    }
}
