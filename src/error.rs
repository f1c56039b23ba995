//! Error handling for the StartSnap client

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::validation::ValidationError;

/// Details of a failed backend call, parsed from the response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status of the response
    pub status: u16,

    /// Backend error code (`PGRST301`, `invalid_jwt`, ...)
    pub code: Option<String>,

    /// Human-readable message
    pub message: Option<String>,

    /// Additional details
    pub details: Option<String>,

    /// Hint from PostgREST
    pub hint: Option<String>,
}

impl ApiError {
    /// Build an `ApiError` from a status and raw response body.
    ///
    /// PostgREST bodies use `code`/`message`, GoTrue bodies use
    /// `error_code`/`msg` or `error`/`error_description`. Bodies that are not a
    /// JSON object keep their raw text as the message.
    pub fn from_body(status: u16, body: &str) -> Self {
        let value = match serde_json::from_str::<Value>(body) {
            Ok(value @ Value::Object(_)) => value,
            _ => {
                return Self {
                    status,
                    code: None,
                    message: (!body.trim().is_empty()).then(|| body.to_string()),
                    details: None,
                    hint: None,
                }
            }
        };

        let text = |keys: &[&str]| {
            keys.iter().find_map(|key| match value.get(*key) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            })
        };

        Self {
            status,
            code: text(&["error_code", "code", "error"]),
            message: text(&["message", "msg", "error_description"]),
            details: text(&["details"]),
            hint: text(&["hint"]),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![format!("Status: {}", self.status)];
        if let Some(code) = &self.code {
            parts.push(format!("Code: {}", code));
        }
        if let Some(message) = &self.message {
            parts.push(format!("Message: {}", message));
        }
        if let Some(details) = &self.details {
            parts.push(format!("Details: {}", details));
        }
        if let Some(hint) = &self.hint {
            parts.push(format!("Hint: {}", hint));
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Unified error type for the StartSnap client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The backend answered with a failure status
    #[error("API error: {0}")]
    Api(ApiError),

    /// Authentication errors raised locally (no session, ...)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Form input rejected before submission
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Edge Function errors
    #[error("Function error: {0}")]
    Function(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request of the same kind is still in flight
    #[error("Request already in flight: {0}")]
    Busy(String),

    /// A row that was expected to exist was not returned
    #[error("Not found: {0}")]
    NotFound(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new function error
    pub fn function<T: fmt::Display>(msg: T) -> Self {
        Error::Function(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new not-found error
    pub fn not_found<T: fmt::Display>(msg: T) -> Self {
        Error::NotFound(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// The backend error payload, if this error carries one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(api) => Some(api),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
