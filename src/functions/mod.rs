//! Edge Functions client

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::postgrest::RequestHeaders;

/// Client for Supabase Edge Functions
pub struct FunctionsClient {
    url: String,
    client: Client,
    headers: RequestHeaders,
}

impl FunctionsClient {
    pub(crate) fn new(url: &str, client: Client, headers: RequestHeaders) -> Self {
        Self {
            url: url.to_string(),
            client,
            headers,
        }
    }

    fn get_url(&self, function_name: &str) -> String {
        format!("{}/functions/v1/{}", self.url, function_name)
    }

    /// Invoke an edge function with a JSON body and parse its JSON reply
    pub async fn invoke<T: Serialize, R: DeserializeOwned>(
        &self,
        function_name: &str,
        body: &T,
    ) -> Result<R> {
        debug!(function = function_name, "invoking edge function");

        let url = self.get_url(function_name);
        self.headers
            .apply(Fetch::post(&self.client, &url))
            .json(body)?
            .execute::<R>()
            .await
            .map_err(|err| match err {
                Error::Http(e) if e.is_decode() => Error::function(format!(
                    "Function {} returned an unexpected body: {}",
                    function_name, e
                )),
                other => other,
            })
    }
}
