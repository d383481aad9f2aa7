//! HTTP client for the College Scorecard `schools` API on api.data.gov.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    query::{Query, SchoolQuery},
    types::{fields, PaginatedResponse, SchoolID, SchoolRecord},
    Error,
};

/// Production endpoint for the Scorecard dataset.
pub const DEFAULT_BASE_URL: &str = "https://api.data.gov/ed/collegescorecard/v1";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the College Scorecard API.
///
/// Holds one `reqwest::Client` for connection reuse. Every request carries
/// the configured `api_key`; calls fail with [`Error::MissingApiKey`] before
/// touching the network when none is set.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    api_key: Option<String>,
}

impl Client {
    /// Creates a new client pointing at the production Scorecard API.
    pub fn new(api_key: Option<String>) -> Result<Self, Error> {
        Self::with_options(DEFAULT_BASE_URL, api_key, DEFAULT_TIMEOUT)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: Option<String>) -> Result<Self, Error> {
        Self::with_options(base_url, api_key, DEFAULT_TIMEOUT)
    }

    /// Creates a new client with a custom base URL and request timeout.
    /// An empty `api_key` is treated as absent.
    pub fn with_options(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Whether requests can be issued at all.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn get_url(&self, path: &str, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(query.add_to_url(&url))
    }

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;
        let mut url = self.get_url(path, query)?;
        // Logged before the key is appended so it never reaches the logs.
        tracing::debug!("Fetching Scorecard URL: {}", url);
        url.query_pairs_mut().append_pair("api_key", api_key);

        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| transport_error("Failed to get resource", e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| transport_error("Failed to read response body", e))?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Parse(e.to_string())
        })?;

        Ok(parsed)
    }

    /// Fetches one page of schools exactly as the API returned it.
    pub async fn get_schools_page(&self, query: &SchoolQuery) -> Result<Value, Error> {
        self.get::<Value, SchoolQuery>("/schools", query).await
    }

    /// Fetches one page of schools with typed pagination metadata.
    pub async fn get_schools(
        &self,
        query: &SchoolQuery,
    ) -> Result<PaginatedResponse<Value>, Error> {
        self.get::<PaginatedResponse<Value>, SchoolQuery>("/schools", query)
            .await
    }

    /// Fetches the first flattened record matching `query`, if any.
    pub async fn first_school(&self, query: &SchoolQuery) -> Result<Option<Value>, Error> {
        let query = query.clone().with_per_page(1);
        let resp = self.get_schools(&query).await?;
        Ok(resp.results.into_iter().next())
    }

    /// Fetches everything needed to estimate aid for one school.
    /// Returns `Ok(None)` when no school has this id.
    pub async fn get_school_record(
        &self,
        school_id: SchoolID,
    ) -> Result<Option<SchoolRecord>, Error> {
        let query = SchoolQuery::default()
            .with_id(school_id)
            .with_fields(fields::record_fields().as_slice());
        match self.first_school(&query).await? {
            Some(raw) => Ok(Some(SchoolRecord::from_flattened(&raw)?)),
            None => Ok(None),
        }
    }
}

fn transport_error(context: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        tracing::error!("{}: timed out: {}", context, e);
        Error::Timeout
    } else {
        tracing::error!("{}: {}", context, e);
        Error::RequestFailed
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
