//! Library layer for the college aid estimator: cached search, the aid
//! estimate engine, single-field lookups, validation and configuration.
//!
//! Wraps the `scorecard_api` crate with an in-memory TTL cache and
//! classifies every failure into an [`AidError`].

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod estimate;
pub mod lookup;
pub mod search;
pub mod validation;

pub use scorecard_api;
pub use scorecard_api::types;

pub use cache::QueryCache;
pub use client::AidClient;
pub use config::{AppConfig, ConfigError};
pub use error::AidError;
pub use estimate::{compute_estimate, AidBreakdown, EstimateResult, NetPriceSource};
pub use lookup::{AcceptanceSummary, SchoolLookup, TuitionSummary};
pub use search::{SchoolSearchService, SearchTerm};
