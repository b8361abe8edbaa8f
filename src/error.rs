// Client-side errors for calls against the SOC administration API
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::api::{ErrorEnvelope, FieldError};

pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
pub const NETWORK_ERROR: &str = "NETWORK_ERROR";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-success response, decoded from the API error envelope
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        details: Vec<FieldError>,
    },

    /// Payload rejected locally before any request was sent
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Token provider error: {0}")]
    Auth(#[from] crate::auth::AuthError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Build from a failed response body, falling back to generic values
    /// when the body is not the usual envelope.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let envelope: ErrorEnvelope = serde_json::from_slice(body).unwrap_or_default();
        let error = envelope.error.unwrap_or_default();
        ClientError::Api {
            status,
            code: error.code.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            message: error
                .message
                .or(envelope.message)
                .unwrap_or_else(|| "Request failed".to_string()),
            details: error.details.unwrap_or_default(),
        }
    }

    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        ClientError::Validation { message: message.into(), details }
    }

    /// HTTP status, when the error came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Error code for client handling
    pub fn error_code(&self) -> &str {
        match self {
            ClientError::Api { code, .. } => code,
            ClientError::Validation { .. } => "VALIDATION_ERROR",
            ClientError::InvalidUrl { .. } => "INVALID_URL",
            ClientError::Network(_) => NETWORK_ERROR,
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::Auth(_) => "AUTH_ERROR",
            ClientError::Io(_) => "IO_ERROR",
        }
    }

    pub fn details(&self) -> &[FieldError] {
        match self {
            ClientError::Api { details, .. } | ClientError::Validation { details, .. } => details,
            _ => &[],
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "success": false,
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        });
        if !self.details().is_empty() {
            response["error"]["details"] = json!(self.details());
        }
        response
    }
}
