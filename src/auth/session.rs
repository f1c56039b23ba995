//! Session management for authentication

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::User;

/// Session returned by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The access token
    pub access_token: String,

    /// The refresh token
    pub refresh_token: String,

    /// The token type
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// The expiry time in seconds
    pub expires_in: i64,

    /// The expiry timestamp (unix seconds)
    #[serde(default)]
    pub expires_at: Option<i64>,

    /// The signed-in user
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Create a new session expiring `expires_in` seconds from now
    pub fn new(access_token: &str, refresh_token: &str, user: User, expires_in: i64) -> Self {
        Self {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            token_type: default_token_type(),
            expires_in,
            expires_at: Some(Utc::now().timestamp() + expires_in),
            user,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now().timestamp() >= expires_at,
            None => false,
        }
    }
}
