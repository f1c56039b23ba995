//! Database operations through the PostgREST API

mod filter;
mod query;

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use crate::config::ClientOptions;
use crate::fetch::FetchBuilder;

pub use filter::*;
pub use query::*;

/// Headers and limits applied to every backend request
#[derive(Debug, Clone)]
pub(crate) struct RequestHeaders {
    key: String,
    token: String,
    client_info: String,
    schema: String,
    timeout: Option<Duration>,
}

impl RequestHeaders {
    /// Headers authenticated with `token`, or the anon key when there is none
    pub(crate) fn new(key: &str, token: Option<&str>, options: &ClientOptions) -> Self {
        Self {
            key: key.to_string(),
            token: token.unwrap_or(key).to_string(),
            client_info: options.client_info.clone(),
            schema: options.db_schema.clone(),
            timeout: options.request_timeout,
        }
    }

    pub(crate) fn apply<'a>(&self, fetch: FetchBuilder<'a>) -> FetchBuilder<'a> {
        let mut fetch = fetch
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.client_info)
            .bearer_auth(&self.token)
            .timeout(self.timeout);

        if self.schema != "public" {
            fetch = fetch
                .header("Accept-Profile", &self.schema)
                .header("Content-Profile", &self.schema);
        }

        fetch
    }
}

/// Client for database operations on one table
pub struct PostgrestClient {
    url: String,
    table: String,
    client: Client,
    headers: RequestHeaders,
}

impl PostgrestClient {
    /// Create a new PostgrestClient
    pub(crate) fn new(url: &str, table: &str, client: Client, headers: RequestHeaders) -> Self {
        Self {
            url: url.to_string(),
            table: table.to_string(),
            client,
            headers,
        }
    }

    /// The table this client targets
    pub fn table(&self) -> &str {
        &self.table
    }

    fn get_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    /// Select specific columns from the table
    pub fn select(&self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(
            self.get_url(),
            columns,
            self.client.clone(),
            self.headers.clone(),
        )
    }

    /// Insert data into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(
            self.get_url(),
            values,
            self.client.clone(),
            self.headers.clone(),
        )
    }

    /// Update data in the table
    pub fn update<T: Serialize>(&self, values: T) -> UpdateBuilder<T> {
        UpdateBuilder::new(
            self.get_url(),
            values,
            self.client.clone(),
            self.headers.clone(),
        )
    }

    /// Delete data from the table
    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(self.get_url(), self.client.clone(), self.headers.clone())
    }
}
