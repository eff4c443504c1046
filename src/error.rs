use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Authorization token required")]
    AuthMissing,

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("failed to create request: {0}")]
    UpstreamRequest(String),

    #[error("failed to send request: {0}")]
    UpstreamTransport(#[from] reqwest::Error),

    #[error("{action}: status code {status}")]
    UpstreamStatus { action: &'static str, status: u16 },

    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// HTTP status written back to the caller for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::AuthMissing => StatusCode::UNAUTHORIZED,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // Transport errors carry the full upstream URL
            Error::UpstreamTransport(e) if e.is_timeout() => {
                "Upstream request timed out".to_string()
            }
            Error::UpstreamTransport(e) if e.is_connect() => {
                "Upstream connection failed".to_string()
            }
            Error::UpstreamTransport(_) => "Upstream request failed".to_string(),

            // Header construction errors may echo the credential
            Error::UpstreamRequest(_) => "Failed to build upstream request".to_string(),

            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("token") || lower.contains("secret") || lower.contains("key") {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            Error::Validation(msg) => format!("Validation error: {msg}"),
            Error::AuthMissing
            | Error::PayloadTooLarge(_)
            | Error::UpstreamStatus { .. }
            | Error::Decode(_)
            | Error::InvalidUrl(_)
            | Error::Config(_) => self.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request error: {}", self.log_safe());
        } else {
            tracing::debug!("Request rejected: {}", self.log_safe());
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::Validation("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::AuthMissing.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::PayloadTooLarge("length limit exceeded".to_string()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            Error::UpstreamStatus {
                action: "failed to create repository",
                status: 422,
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Decode("eof".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_status_message_embeds_code() {
        let err = Error::UpstreamStatus {
            action: "failed to get pull requests",
            status: 500,
        };
        assert_eq!(err.to_string(), "failed to get pull requests: status code 500");
    }

    #[test]
    fn test_log_safe_redacts_credentials() {
        let err = Error::Internal("bad token ghp_abc".to_string());
        assert!(!err.log_safe().contains("ghp_abc"));

        let err = Error::UpstreamRequest("invalid header value Bearer ghp_abc".to_string());
        assert!(!err.log_safe().contains("ghp_abc"));
    }

    #[tokio::test]
    async fn test_into_response_writes_error_body() {
        let response = Error::AuthMissing.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Authorization token required");
    }
}
