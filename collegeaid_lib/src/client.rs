//! One handle over the Scorecard client, the shared query cache and the
//! services built on them. Owned by the composition root.

use std::sync::Arc;

use scorecard_api::types::SchoolID;
use scorecard_api::Client;
use serde_json::Value;

use crate::cache::QueryCache;
use crate::config::AppConfig;
use crate::error::AidError;
use crate::estimate::{EstimateResult, EstimateService};
use crate::lookup::{AcceptanceSummary, LookupService, SchoolLookup, TuitionSummary};
use crate::search::SchoolSearchService;

pub struct AidClient {
    client: Arc<Client>,
    cache: Arc<QueryCache>,
    search: SchoolSearchService,
    estimates: EstimateService,
    lookups: LookupService,
}

impl AidClient {
    /// Builds the client stack described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, AidError> {
        let client = Client::with_options(
            &config.base_url,
            config.api_key.clone(),
            config.request_timeout,
        )?;
        Ok(Self::with_parts(client, QueryCache::new(config.cache_ttl)))
    }

    /// Assembles the services from an existing client and cache. Used for testing.
    pub fn with_parts(client: Client, cache: QueryCache) -> Self {
        let client = Arc::new(client);
        let cache = Arc::new(cache);
        Self {
            search: SchoolSearchService::new(client.clone(), cache.clone()),
            estimates: EstimateService::new(client.clone()),
            lookups: LookupService::new(client.clone()),
            client,
            cache,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.client.has_api_key()
    }

    /// Searches schools by name fragment or two-letter state code.
    pub async fn search_schools(
        &self,
        term: Option<&str>,
        per_page: Option<u32>,
    ) -> Result<Value, AidError> {
        self.search.search(term, per_page).await
    }

    /// Estimates the aid package for `income` at the school with `school_id`.
    pub async fn estimate(
        &self,
        school_id: SchoolID,
        income: f64,
    ) -> Result<EstimateResult, AidError> {
        self.estimates.estimate(school_id, income).await
    }

    pub async fn tuition(&self, lookup: &SchoolLookup) -> Result<TuitionSummary, AidError> {
        self.lookups.tuition(lookup).await
    }

    pub async fn acceptance(&self, lookup: &SchoolLookup) -> Result<AcceptanceSummary, AidError> {
        self.lookups.acceptance(lookup).await
    }

    /// Number of cached search pages, stale ones included.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
