//! StartSnap Rust Client Library
//!
//! A typed client for the StartSnap.fun community platform, where builders
//! publish project showcases ("StartSnaps"), post progress updates ("Vibe
//! Logs") and exchange threaded feedback. All data lives in the hosted
//! Supabase backend; this crate validates input, issues the remote calls and
//! re-fetches lists after every mutation.

pub mod api_errors;
pub mod auth;
pub mod config;
pub mod error;
pub mod feedback;
pub mod fetch;
pub mod functions;
pub mod gallery;
pub mod models;
pub mod postgrest;
pub mod profiles;
pub mod projects;
pub mod support;
pub mod validation;
pub mod vibelog;

use std::sync::Arc;

use reqwest::Client;
use tracing::debug;

use crate::api_errors::ApiErrorHandler;
use crate::auth::Auth;
use crate::config::{ClientOptions, Config};
use crate::error::Result;
use crate::feedback::FeedbackService;
use crate::functions::FunctionsClient;
use crate::models::StartSnap;
use crate::postgrest::{PostgrestClient, RequestHeaders};
use crate::profiles::ProfileService;
use crate::projects::ProjectService;
use crate::support::SupportToggle;
use crate::vibelog::VibeLogService;

/// The main entry point for the StartSnap client
///
/// Cloning is cheap and clones share the signed-in session.
#[derive(Clone)]
pub struct StartSnapClient {
    url: String,
    key: String,
    http_client: Client,
    auth: Auth,
    options: ClientOptions,
}

impl StartSnapClient {
    /// Create a new client
    ///
    /// # Example
    ///
    /// ```
    /// use startsnap::{config::Config, StartSnapClient};
    ///
    /// let config = Config::new("https://your-project.supabase.co", "your-anon-key").unwrap();
    /// let client = StartSnapClient::new(config);
    /// ```
    pub fn new(config: Config) -> Self {
        let url = config.base_url();
        let http_client = Client::new();
        let auth = Auth::new(&url, &config.anon_key, http_client.clone(), config.options.clone());

        debug!(url = %url, "StartSnap client initialized");

        Self {
            url,
            key: config.anon_key,
            http_client,
            auth,
            options: config.options,
        }
    }

    /// Create a client from `SUPABASE_URL` and `SUPABASE_ANON_KEY`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Config::from_env()?))
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Client options in effect
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    fn request_headers(&self) -> RequestHeaders {
        let token = self.auth.access_token();
        RequestHeaders::new(&self.key, token.as_deref(), &self.options)
    }

    /// Create a PostgrestClient for a table, authenticated as the current user
    pub fn from(&self, table: &str) -> PostgrestClient {
        PostgrestClient::new(
            &self.url,
            table,
            self.http_client.clone(),
            self.request_headers(),
        )
    }

    /// Create a client for edge function calls
    pub fn functions(&self) -> FunctionsClient {
        FunctionsClient::new(&self.url, self.http_client.clone(), self.request_headers())
    }

    /// Feedback and replies on projects
    pub fn feedback(&self) -> FeedbackService {
        FeedbackService::new(self.clone())
    }

    /// Vibe logs on projects
    pub fn vibe_logs(&self) -> VibeLogService {
        VibeLogService::new(self.clone())
    }

    /// Projects
    pub fn projects(&self) -> ProjectService {
        ProjectService::new(self.clone())
    }

    /// Public profiles
    pub fn profiles(&self) -> ProfileService {
        ProfileService::new(self.clone())
    }

    /// Support button state for a loaded project
    pub fn support(&self, project: &StartSnap) -> SupportToggle {
        SupportToggle::new(self.clone(), project)
    }

    /// Error handler that signs out on auth failures
    pub fn error_handler(&self) -> ApiErrorHandler {
        ApiErrorHandler::new(Arc::new(self.auth.clone()))
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::{ClientOptions, Config};
    pub use crate::error::{ApiError, Error, Result};
    pub use crate::models::*;
    pub use crate::validation::{ProjectForm, VibeLogForm};
    pub use crate::StartSnapClient;
}
