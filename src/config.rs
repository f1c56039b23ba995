//! Configuration for the StartSnap client

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the Supabase project URL
pub const URL_ENV: &str = "SUPABASE_URL";

/// Environment variable holding the anonymous API key
pub const ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Configuration options for the StartSnap client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// The database schema
    pub db_schema: String,

    /// Value sent in the `X-Client-Info` header
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            db_schema: "public".to_string(),
            client_info: format!("startsnap-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the database schema
    pub fn with_db_schema(mut self, value: &str) -> Self {
        self.db_schema = value.to_string();
        self
    }

    /// Set the `X-Client-Info` header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}

/// Connection settings for the hosted backend
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Supabase project
    pub url: Url,

    /// Anonymous API key
    pub anon_key: String,

    /// Client options
    pub options: ClientOptions,
}

impl Config {
    /// Creates a new configuration, validating the URL.
    pub fn new(url: &str, anon_key: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        if anon_key.trim().is_empty() {
            return Err(Error::config("anon key cannot be empty"));
        }
        Ok(Self {
            url,
            anon_key: anon_key.to_string(),
            options: ClientOptions::default(),
        })
    }

    /// Reads the configuration from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let url = std::env::var(URL_ENV)
            .map_err(|_| Error::config(format!("{} environment variable not found", URL_ENV)))?;
        let anon_key = std::env::var(ANON_KEY_ENV).map_err(|_| {
            Error::config(format!("{} environment variable not found", ANON_KEY_ENV))
        })?;
        Self::new(&url, &anon_key)
    }

    /// Replace the client options
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Base URL without a trailing slash
    pub(crate) fn base_url(&self) -> String {
        self.url.as_str().trim_end_matches('/').to_string()
    }
}
