//! Classification of backend errors and the global sign-out on auth failures

use std::sync::Arc;

use tracing::{error, warn};

use crate::auth::SessionTerminator;
use crate::error::{ApiError, Error};

/// Status codes that mean the session is no longer valid
const AUTH_STATUSES: &[u16] = &[401, 403];

/// Error codes from PostgREST and GoTrue that mean the session is no longer valid
const AUTH_CODES: &[&str] = &[
    "PGRST301",
    "PGRST302",
    "invalid_jwt",
    "bad_jwt",
    "session_not_found",
    "refresh_token_not_found",
    "refresh_token_already_used",
];

/// Lowercase message fragments that mean the session is no longer valid
const AUTH_MESSAGES: &[&str] = &[
    "jwt expired",
    "invalid jwt",
    "invalid refresh token",
    "refresh token not found",
    "auth session missing",
    "not authenticated",
];

/// Lowercase message fragments of network failures
const NETWORK_MESSAGES: &[&str] = &["failed to fetch", "networkerror", "network request failed"];

/// Broad class of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The session is invalid; the user must sign in again
    Auth,
    /// The backend could not be reached
    Network,
    /// Anything else, shown to the user as is
    Other,
}

fn contains_any(message: &str, needles: &[&str]) -> bool {
    let message = message.to_lowercase();
    needles.iter().any(|needle| message.contains(needle))
}

/// Whether a backend error payload matches an auth-failure signature
pub fn is_auth_error(api: &ApiError) -> bool {
    if AUTH_STATUSES.contains(&api.status) {
        return true;
    }
    if let Some(code) = &api.code {
        if AUTH_CODES.iter().any(|c| c.eq_ignore_ascii_case(code)) {
            return true;
        }
    }
    api.message
        .as_deref()
        .map_or(false, |message| contains_any(message, AUTH_MESSAGES))
}

/// Whether an error is a network failure
pub fn is_network_error(err: &Error) -> bool {
    match err {
        Error::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
        Error::Api(api) => api
            .message
            .as_deref()
            .map_or(false, |message| contains_any(message, NETWORK_MESSAGES)),
        other => contains_any(&other.to_string(), NETWORK_MESSAGES),
    }
}

/// Classify an error
pub fn classify(err: &Error) -> ErrorClass {
    match err {
        Error::Api(api) if is_auth_error(api) => ErrorClass::Auth,
        _ if is_network_error(err) => ErrorClass::Network,
        _ => ErrorClass::Other,
    }
}

/// Handles errors every caller treats the same way
#[derive(Clone)]
pub struct ApiErrorHandler {
    terminator: Arc<dyn SessionTerminator>,
}

impl ApiErrorHandler {
    pub fn new(terminator: Arc<dyn SessionTerminator>) -> Self {
        Self { terminator }
    }

    /// Handle an error.
    ///
    /// Auth failures sign the user out and network failures are logged; both
    /// return true. Any other error returns false and is left to the caller.
    pub async fn handle(&self, err: &Error) -> bool {
        match classify(err) {
            ErrorClass::Auth => {
                warn!(error = %err, "auth error, signing out");
                if let Err(sign_out_err) = self.terminator.terminate_session().await {
                    error!(error = %sign_out_err, "sign-out after auth error failed");
                }
                true
            }
            ErrorClass::Network => {
                error!(error = %err, "network error");
                true
            }
            ErrorClass::Other => false,
        }
    }
}
