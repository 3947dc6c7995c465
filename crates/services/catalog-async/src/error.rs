use reqwest::StatusCode;
use thiserror::Error;

/// Longest slice of a response body carried into an error message.
const MAX_BODY_SNIPPET: usize = 400;

/// Errors produced by the catalog client.
///
/// Transport failures are rendered to text at the crate boundary, so callers
/// never see `reqwest` types.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing or malformed configuration (e.g. no `API_KEY`)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Network failure, timeout, or DNS error
    #[error("Request failed: {0}")]
    Transport(String),

    /// Upstream answered with status >= 400
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Human-readable description
        message: String,
    },

    /// Successful response whose body is not JSON
    #[error("Invalid JSON response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Builds the error for a non-success response to `endpoint`.
    #[must_use]
    pub fn from_status(status: StatusCode, endpoint: &str, body: &[u8]) -> Self {
        let message = match status {
            StatusCode::NOT_FOUND => format!("Resource not found: {endpoint}"),
            StatusCode::UNAUTHORIZED => "Invalid API key or authentication failed".to_string(),
            StatusCode::TOO_MANY_REQUESTS => "Rate limit exceeded - try again later".to_string(),
            other => format!("API error {}: {}", other.as_u16(), body_snippet(body)),
        };
        Self::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// HTTP status code, when the failure came from an upstream response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Config(_) | Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        // Display of reqwest::Error omits the cause chain ("error sending request"),
        // which is useless on its own.
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Transport(message)
    }
}

/// Maps a JSON decode failure to [`CatalogError::Decode`] with a body snippet.
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> CatalogError {
    CatalogError::Decode(format!("{e}: {}", body_snippet(body)))
}

fn body_snippet(body: &[u8]) -> String {
    String::from_utf8_lossy(&body[..body.len().min(MAX_BODY_SNIPPET)]).into_owned()
}
