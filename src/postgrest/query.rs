//! Query builders for PostgrestClient

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::fetch::{Fetch, FetchBuilder};
use crate::postgrest::filter::*;
use crate::postgrest::RequestHeaders;

/// Ordered list of query parameters
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    /// Create a new QueryBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing an earlier value for the same key
    pub fn add_param(&mut self, key: &str, value: &str) {
        if let Some(existing) = self.params.iter_mut().find(|(k, _)| k == key) {
            existing.1 = value.to_string();
        } else {
            self.params.push((key.to_string(), value.to_string()));
        }
    }

    /// Add a filter on a column
    pub fn add_filter(&mut self, column: &str, operator: FilterOperator, value: &str) {
        self.add_param(column, &operator.render(value));
    }

    /// Get the query parameters
    pub fn get_params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Filter methods shared by every builder that targets existing rows
macro_rules! filter_methods {
    () => {
        /// Filter rows where column equals a value
        pub fn eq<V: ToString>(mut self, column: &str, value: V) -> Self {
            self.query
                .add_filter(column, FilterOperator::Eq, &value.to_string());
            self
        }

        /// Filter rows where column is in a list of values
        pub fn in_list<V: ToString>(mut self, column: &str, values: &[V]) -> Self {
            let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            self.query
                .add_filter(column, FilterOperator::In, &values.join(","));
            self
        }
    };
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    url: String,
    client: Client,
    headers: RequestHeaders,
    query: QueryBuilder,
}

impl SelectBuilder {
    pub(crate) fn new(url: String, columns: &str, client: Client, headers: RequestHeaders) -> Self {
        let mut query = QueryBuilder::new();
        query.add_param("select", columns);

        Self {
            url,
            client,
            headers,
            query,
        }
    }

    filter_methods!();

    /// Order the results by a column
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = SortOrder::from(ascending);
        self.query
            .add_param("order", &format!("{}.{}", column, direction.as_str()));
        self
    }

    /// Order the rows of an embedded resource
    pub fn order_embedded(mut self, table: &str, column: &str, ascending: bool) -> Self {
        let direction = SortOrder::from(ascending);
        self.query.add_param(
            &format!("{}.order", table),
            &format!("{}.{}", column, direction.as_str()),
        );
        self
    }

    /// Limit the number of rows returned
    pub fn limit(mut self, count: usize) -> Self {
        self.query.add_param("limit", &count.to_string());
        self
    }

    /// The query parameters this builder will send
    pub fn params(&self) -> &[(String, String)] {
        self.query.get_params()
    }

    /// Execute the query and return the results
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.headers
            .apply(Fetch::get(&self.client, &self.url))
            .query(self.query.get_params())
            .execute::<Vec<T>>()
            .await
    }

    /// Execute the query and return the first row
    pub async fn execute_one<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let results = self.limit(1).execute::<T>().await?;
        Ok(results.into_iter().next())
    }
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    url: String,
    values: T,
    client: Client,
    headers: RequestHeaders,
}

impl<T: Serialize> InsertBuilder<T> {
    pub(crate) fn new(url: String, values: T, client: Client, headers: RequestHeaders) -> Self {
        Self {
            url,
            values,
            client,
            headers,
        }
    }

    /// Execute the insert and return the inserted rows
    pub async fn execute<R: DeserializeOwned>(&self) -> Result<Vec<R>> {
        representation(self.headers.apply(Fetch::post(&self.client, &self.url)))
            .json(&self.values)?
            .execute::<Vec<R>>()
            .await
    }
}

/// Builder for UPDATE queries
pub struct UpdateBuilder<T: Serialize> {
    url: String,
    values: T,
    client: Client,
    headers: RequestHeaders,
    query: QueryBuilder,
}

impl<T: Serialize> UpdateBuilder<T> {
    pub(crate) fn new(url: String, values: T, client: Client, headers: RequestHeaders) -> Self {
        Self {
            url,
            values,
            client,
            headers,
            query: QueryBuilder::new(),
        }
    }

    filter_methods!();

    /// Execute the update and return the updated rows
    pub async fn execute<R: DeserializeOwned>(&self) -> Result<Vec<R>> {
        representation(self.headers.apply(Fetch::patch(&self.client, &self.url)))
            .query(self.query.get_params())
            .json(&self.values)?
            .execute::<Vec<R>>()
            .await
    }
}

/// Builder for DELETE queries
pub struct DeleteBuilder {
    url: String,
    client: Client,
    headers: RequestHeaders,
    query: QueryBuilder,
}

impl DeleteBuilder {
    pub(crate) fn new(url: String, client: Client, headers: RequestHeaders) -> Self {
        Self {
            url,
            client,
            headers,
            query: QueryBuilder::new(),
        }
    }

    filter_methods!();

    /// Execute the delete and return the deleted rows
    pub async fn execute<R: DeserializeOwned>(&self) -> Result<Vec<R>> {
        representation(self.headers.apply(Fetch::delete(&self.client, &self.url)))
            .query(self.query.get_params())
            .execute::<Vec<R>>()
            .await
    }

    /// Execute the delete without reading the deleted rows
    pub async fn execute_no_return(&self) -> Result<()> {
        self.headers
            .apply(Fetch::delete(&self.client, &self.url))
            .header("Prefer", "return=minimal")
            .query(self.query.get_params())
            .execute_empty()
            .await
    }
}

fn representation(fetch: FetchBuilder<'_>) -> FetchBuilder<'_> {
    fetch.header("Prefer", "return=representation")
}
