//! Items API client error types.

use serde::Deserialize;

/// Errors from Items API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The API returned a non-2xx status. `message` is the server-provided
    /// text, when the body carried one.
    #[error("Items API {endpoint} returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Api {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl ClientError {
    /// Text suitable for showing to a user.
    ///
    /// The server message when there is one, `HTTP error! status: <code>`
    /// for a bare non-2xx status, and the error itself otherwise.
    pub fn display_message(&self) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Api { status, .. } => format!("HTTP error! status: {status}"),
            Self::Http { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

#[derive(Deserialize)]
struct FieldError {
    message: String,
}

/// Extract the server message from an error response body.
///
/// Reads `{"message": ...}`, falling back to the joined messages of a
/// `{"errors": [...]}` validation body.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    if let Some(message) = parsed.message.filter(|m| !m.is_empty()) {
        return Some(message);
    }
    if parsed.errors.is_empty() {
        return None;
    }
    let joined = parsed
        .errors
        .into_iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join(", ");
    Some(joined)
}
