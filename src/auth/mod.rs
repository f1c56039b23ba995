//! Authentication and session state

mod session;
mod types;

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::postgrest::RequestHeaders;

pub use session::*;
pub use types::*;

/// Sign-out capability used by the API error handler
#[async_trait]
pub trait SessionTerminator: Send + Sync {
    /// End the current session
    async fn terminate_session(&self) -> Result<()>;
}

/// Client for Supabase Authentication
///
/// Cloning shares the session, so every clone sees sign-in and sign-out.
#[derive(Clone)]
pub struct Auth {
    url: String,
    key: String,
    client: Client,
    options: ClientOptions,
    session: Arc<Mutex<Option<Session>>>,
}

impl Auth {
    pub(crate) fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            options,
            session: Arc::new(Mutex::new(None)),
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Sign in a user with email and password
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let url = self.get_auth_url("/token");
        let headers = RequestHeaders::new(&self.key, None, &self.options);

        let session = headers
            .apply(Fetch::post(&self.client, &url))
            .query(&[("grant_type".to_string(), "password".to_string())])
            .json(&PasswordCredentials { email, password })?
            .execute::<Session>()
            .await?;

        info!(user_id = %session.user.id, "signed in");
        self.set_session(session.clone());
        Ok(session)
    }

    /// Sign out the current user.
    ///
    /// The local session is cleared even when the logout request fails.
    pub async fn sign_out(&self) -> Result<()> {
        let session = self.lock().take();
        let session = match session {
            Some(session) => session,
            None => return Err(Error::auth("Not logged in")),
        };

        info!(user_id = %session.user.id, "signing out");

        let url = self.get_auth_url("/logout");
        RequestHeaders::new(&self.key, Some(&session.access_token), &self.options)
            .apply(Fetch::post(&self.client, &url))
            .execute_empty()
            .await
    }

    /// Get the current session
    pub fn session(&self) -> Option<Session> {
        self.lock().clone()
    }

    /// Set the session
    pub fn set_session(&self, session: Session) {
        *self.lock() = Some(session);
    }

    /// Access token of the current session.
    ///
    /// An expired session counts as signed out, so requests fall back to the
    /// anon key.
    pub fn access_token(&self) -> Option<String> {
        self.lock()
            .as_ref()
            .filter(|s| !s.is_expired())
            .map(|s| s.access_token.clone())
    }

    /// Id of the signed-in user, `None` once the session has expired
    pub fn user_id(&self) -> Option<Uuid> {
        self.lock()
            .as_ref()
            .filter(|s| !s.is_expired())
            .map(|s| s.user.id)
    }

    /// Id of the signed-in user, or an auth error when signed out
    pub fn require_user_id(&self) -> Result<Uuid> {
        self.user_id()
            .ok_or_else(|| Error::auth("You must be signed in to do that"))
    }
}

#[async_trait]
impl SessionTerminator for Auth {
    async fn terminate_session(&self) -> Result<()> {
        match self.sign_out().await {
            Err(Error::Auth(msg)) => {
                warn!(reason = %msg, "no session to terminate");
                Ok(())
            }
            other => other,
        }
    }
}
