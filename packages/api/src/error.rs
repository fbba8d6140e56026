//! Error type shared by every API call.

use thiserror::Error;

/// Failure of a request to the prompt library API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    ///
    /// `message` is the `detail` (or `message`) field of a JSON error body, if
    /// the body was JSON. Display falls back to `"<status> <status text>"`.
    #[error("{}", describe_status(.status, .status_text, .message))]
    Status {
        status: u16,
        status_text: String,
        message: Option<String>,
    },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// A success response whose body could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401: the session is missing or expired.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn describe_status(status: &u16, status_text: &str, message: &Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => message.clone(),
        _ => format!("{status} {status_text}"),
    }
}
