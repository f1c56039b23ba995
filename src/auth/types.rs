//! Types for authentication

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated user as returned by the auth API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user ID, referenced as `user_id` by every owned row
    pub id: Uuid,

    /// The user's email address
    #[serde(default)]
    pub email: Option<String>,

    /// The user's role
    #[serde(default)]
    pub role: Option<String>,

    /// The user metadata
    #[serde(default)]
    pub user_metadata: HashMap<String, serde_json::Value>,

    /// The creation time
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// A user with only an id
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            email: None,
            role: None,
            user_metadata: HashMap::new(),
            created_at: None,
        }
    }
}

/// Email and password credentials
#[derive(Debug, Clone, Serialize)]
pub struct PasswordCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
