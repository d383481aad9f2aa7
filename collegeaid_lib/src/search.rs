//! School search: turns a free-text or state-code term into a dataset query
//! and serves result pages through the [`QueryCache`].

use std::sync::Arc;

use scorecard_api::types::fields;
use scorecard_api::{Client, Query, SchoolQuery, SchoolSortBy, SortDirection};
use serde_json::Value;

use crate::cache::QueryCache;
use crate::error::AidError;
use crate::validation;

/// How a search term filters the listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchTerm {
    /// No term: unfiltered listing.
    All,
    /// Exactly two letters, matched against `school.state` in upper case.
    State(String),
    /// Anything else, matched as a substring of the school name.
    NameContains(String),
}

impl SearchTerm {
    /// Classifies an already-trimmed term.
    pub fn classify(term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            SearchTerm::All
        } else if term.len() == 2 && term.chars().all(|c| c.is_ascii_alphabetic()) {
            SearchTerm::State(term.to_ascii_uppercase())
        } else {
            SearchTerm::NameContains(term.to_string())
        }
    }

    /// Builds the `/schools` query for one result page sorted by name.
    pub fn to_query(&self, per_page: u32) -> SchoolQuery {
        let query = SchoolQuery::default()
            .with_fields(fields::SEARCH_FIELDS)
            .with_per_page(per_page)
            .with_sort_by(SchoolSortBy::Name)
            .with_sort_direction(SortDirection::Asc);
        match self {
            SearchTerm::All => query,
            SearchTerm::State(code) => query.with_state(code),
            SearchTerm::NameContains(fragment) => query.with_name_containing(fragment),
        }
    }
}

/// Cache key for one logical search.
pub fn cache_key(term: &str, per_page: u32) -> String {
    format!("schools:{}:{}", term, per_page)
}

/// Serves school search pages, memoized per `(term, per_page)`.
pub struct SchoolSearchService {
    client: Arc<Client>,
    cache: Arc<QueryCache>,
}

impl SchoolSearchService {
    pub fn new(client: Arc<Client>, cache: Arc<QueryCache>) -> Self {
        Self { client, cache }
    }

    /// Returns the upstream result page for `term`, unchanged in shape.
    pub async fn search(&self, term: Option<&str>, per_page: Option<u32>) -> Result<Value, AidError> {
        if !self.client.has_api_key() {
            return Err(AidError::missing_api_key());
        }
        let term = validation::validate_search(term.unwrap_or_default())?;
        let per_page = validation::validate_per_page(per_page)?;
        let query = SearchTerm::classify(&term).to_query(per_page);

        self.cache
            .get_or_fetch(&cache_key(&term, per_page), || async {
                Ok(self.client.get_schools_page(&query).await?)
            })
            .await
    }
}
