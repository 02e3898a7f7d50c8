use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::CoreError;

/// HTTP-facing error payload.
///
/// Carries the status code, the canonical status text and a human message;
/// serializes to the JSON body the response handler writes.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{status} {error}: {message}")]
pub struct HttpError {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl HttpError {
    /// Create an error with an explicit status code and status text
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "Bad Request", message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, "Unauthorized", message)
    }

    /// 403 Forbidden
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(403, "Forbidden", message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, "Not Found", message)
    }

    /// 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(500, "Internal Server Error", message)
    }

    /// 501 Not Implemented
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(501, "Not Implemented", message)
    }

    /// 502 Bad Gateway
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(502, "Bad Gateway", message)
    }

    /// 503 Service Unavailable
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(503, "Service Unavailable", message)
    }

    /// Render the JSON body for a response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                "{{\"status\":{},\"error\":\"Internal Server Error\",\"message\":\"unserializable error\"}}",
                self.status
            )
        })
    }
}

impl From<CoreError> for HttpError {
    fn from(error: CoreError) -> Self {
        Self::internal_server_error(error.to_string())
    }
}
