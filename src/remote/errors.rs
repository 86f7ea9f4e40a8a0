use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the matching service.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("matching service rejected the credential (HTTP {status})")]
    Unauthorized { status: StatusCode },
    #[error("matching service returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("request '{operation}' timed out")]
    Timeout { operation: String },
    #[error("network error: {message}")]
    Network { message: String },
    #[error("invalid response from matching service: {message}")]
    InvalidResponse { message: String },
    #[error("invalid matching service URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl RemoteError {
    /// Map a transport-level reqwest failure for the named operation.
    pub fn from_transport(operation: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout {
                operation: operation.to_string(),
            }
        } else if err.is_decode() {
            RemoteError::InvalidResponse {
                message: err.to_string(),
            }
        } else {
            RemoteError::Network {
                message: err.to_string(),
            }
        }
    }

    /// Classify a non-success status code and its body.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => RemoteError::Unauthorized { status },
            _ => RemoteError::Status { status, body },
        }
    }
}
