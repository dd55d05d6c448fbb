//! Error types for the media library API.

use miette::Diagnostic;

/// Messages shown inline by the selection modal.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access the media library.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load media. Please retry.";

/// Errors returned by [`MediaClient`](crate::MediaClient) operations.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum MediaError {
    /// No session token, or the server rejected the one we sent.
    #[error("not authenticated: {0}")]
    #[diagnostic(
        code(pressroom::media::unauthorized),
        help("sign in again to refresh the session token")
    )]
    Unauthorized(String),

    /// Non-success status that is not authentication related.
    #[error("media API returned {status}: {message}")]
    #[diagnostic(code(pressroom::media::http))]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error(transparent)]
    #[diagnostic(code(pressroom::media::transport))]
    Transport(#[from] reqwest::Error),

    /// Response body was not the JSON we expected.
    #[error("could not decode media response: {0}")]
    #[diagnostic(code(pressroom::media::decode))]
    Decode(#[from] serde_json::Error),
}

impl MediaError {
    /// Classify a failed response.
    ///
    /// 401 and 403 are always authentication failures. Some deployments answer
    /// an expired token with a 400 or 500 whose body mentions the token, so
    /// those are treated the same way.
    pub fn from_status(status: http::StatusCode, body: &str) -> Self {
        let message = extract_message(body);
        let lowered = message.to_ascii_lowercase();
        let auth_shaped = lowered.contains("token")
            || lowered.contains("unauthorized")
            || lowered.contains("not authenticated");

        if status == http::StatusCode::UNAUTHORIZED
            || status == http::StatusCode::FORBIDDEN
            || auth_shaped
        {
            MediaError::Unauthorized(message)
        } else {
            MediaError::Http {
                status: status.as_u16(),
                message,
            }
        }
    }

    /// Whether the failure should direct the user to log in.
    pub fn is_auth(&self) -> bool {
        matches!(self, MediaError::Unauthorized(_))
    }

    /// Inline message for the selection modal.
    pub fn user_message(&self) -> &'static str {
        if self.is_auth() {
            LOGIN_REQUIRED_MESSAGE
        } else {
            LOAD_FAILED_MESSAGE
        }
    }
}

/// Pull a human readable message out of an error body.
///
/// Accepts `{"message": ...}` or `{"error": ...}` JSON and falls back to the raw text.
fn extract_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(m), ..
        }) => m,
        Ok(ErrorBody { error: Some(e), .. }) => e,
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_401_is_auth() {
        let err = MediaError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(err.is_auth());
        assert_eq!(err.user_message(), LOGIN_REQUIRED_MESSAGE);
    }

    #[test]
    fn test_token_message_is_auth() {
        let err = MediaError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Invalid token supplied"}"#,
        );
        assert!(err.is_auth());
    }

    #[test]
    fn test_generic_failure() {
        let err = MediaError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "database unavailable"}"#,
        );
        assert!(!err.is_auth());
        assert_eq!(err.user_message(), LOAD_FAILED_MESSAGE);
        match err {
            MediaError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database unavailable");
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_text_body() {
        let err = MediaError::from_status(StatusCode::BAD_GATEWAY, "  upstream timeout\n");
        match err {
            MediaError::Http { message, .. } => assert_eq!(message, "upstream timeout"),
            other => panic!("expected Http, got {other:?}"),
        }
    }
}
