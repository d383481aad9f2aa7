//! Heuristic aid-package estimate.
//!
//! The estimate resolves an income bracket, picks a net price through a
//! fallback cascade, and then splits that price with a fixed waterfall:
//!
//! ```text
//! grants       = table[bracket], clamped to [0, net_price]
//! work_study   = 2000 if income <= 110000 else 1500       (not clamped)
//! loans        = max(0, net_price - grants - work_study - 1800)
//! out_of_pocket= max(0, net_price - grants - work_study - loans)
//! ```
//!
//! When `net_price - grants - work_study` is negative, loans and out-of-pocket
//! are both zero and the parts no longer sum to `net_price`: the unclamped
//! work-study overshoots it. The mismatch is reported as-is rather than
//! renormalized.

use std::sync::Arc;

use scorecard_api::types::{IncomeBracket, SchoolID, SchoolRecord, SchoolSummary};
use scorecard_api::Client;
use serde::Serialize;

use crate::error::AidError;
use crate::validation;

/// Net price used when the cascade finds no positive value.
pub const DEFAULT_NET_PRICE: f64 = 15_000.0;

/// Out-of-pocket amount the loan step leaves for the family.
pub const DESIRED_OUT_OF_POCKET: f64 = 1_800.0;

/// Income at or below which the larger work-study award applies.
pub const WORK_STUDY_INCOME_LIMIT: f64 = 110_000.0;
pub const WORK_STUDY_HIGH: f64 = 2_000.0;
pub const WORK_STUDY_LOW: f64 = 1_500.0;

pub const ESTIMATE_NOTE: &str =
    "Heuristic estimate for demo only; net price from College Scorecard when available.";

/// Maps a validated income to its bracket; `income <= upper bound` selects the band.
pub fn resolve_bracket(income: f64) -> Result<IncomeBracket, AidError> {
    let income = validation::validate_income(income)?;
    Ok(IncomeBracket::ALL
        .into_iter()
        .find(|b| b.upper_bound().map_or(true, |upper| income <= upper))
        .unwrap_or(IncomeBracket::Above110k))
}

/// Where the net price came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NetPriceSource {
    SectorTable,
    OtherSectorTable,
    InStateTuition,
    OutOfStateTuition,
    Default,
}

/// First strictly positive candidate among own-sector table, other-sector
/// table, in-state tuition and out-of-state tuition; otherwise the default.
pub fn resolve_net_price(school: &SchoolRecord, bracket: IncomeBracket) -> (f64, NetPriceSource) {
    let sector = school.sector();
    let candidates = [
        (
            school.net_price.get(sector, bracket),
            NetPriceSource::SectorTable,
        ),
        (
            school.net_price.get(sector.other(), bracket),
            NetPriceSource::OtherSectorTable,
        ),
        (school.tuition_in_state, NetPriceSource::InStateTuition),
        (school.tuition_out_of_state, NetPriceSource::OutOfStateTuition),
    ];
    candidates
        .into_iter()
        .find_map(|(value, source)| value.filter(|v| *v > 0.0).map(|v| (v, source)))
        .unwrap_or((DEFAULT_NET_PRICE, NetPriceSource::Default))
}

/// Unclamped grant amount for a bracket.
pub fn base_grant(bracket: IncomeBracket) -> f64 {
    match bracket {
        IncomeBracket::UpTo30k => 9_000.0,
        IncomeBracket::From30kTo48k => 7_000.0,
        IncomeBracket::From48kTo75k => 5_000.0,
        IncomeBracket::From75kTo110k => 2_500.0,
        IncomeBracket::Above110k => 1_000.0,
    }
}

pub fn work_study_for(income: f64) -> f64 {
    if income <= WORK_STUDY_INCOME_LIMIT {
        WORK_STUDY_HIGH
    } else {
        WORK_STUDY_LOW
    }
}

/// The four-part package.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AidBreakdown {
    pub grants: f64,
    pub work_study: f64,
    pub loans: f64,
    pub out_of_pocket: f64,
}

impl AidBreakdown {
    /// Runs the waterfall over `net_price`.
    pub fn allocate(net_price: f64, bracket: IncomeBracket, income: f64) -> Self {
        let grants = base_grant(bracket).min(net_price).max(0.0);
        let work_study = work_study_for(income);
        let loans = (net_price - grants - work_study - DESIRED_OUT_OF_POCKET).max(0.0);
        let out_of_pocket = (net_price - grants - work_study - loans).max(0.0);
        Self {
            grants,
            work_study,
            loans,
            out_of_pocket,
        }
    }

    pub fn total(&self) -> f64 {
        self.grants + self.work_study + self.loans + self.out_of_pocket
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub school: SchoolSummary,
    pub income: f64,
    pub bracket: IncomeBracket,
    pub net_price: f64,
    pub net_price_source: NetPriceSource,
    pub breakdown: AidBreakdown,
    pub note: String,
}

/// Estimates the aid package for `income` at `school`.
pub fn compute_estimate(school: &SchoolRecord, income: f64) -> Result<EstimateResult, AidError> {
    let bracket = resolve_bracket(income)?;
    let (net_price, net_price_source) = resolve_net_price(school, bracket);
    let breakdown = AidBreakdown::allocate(net_price, bracket, income);
    Ok(EstimateResult {
        school: school.summary(),
        income,
        bracket,
        net_price,
        net_price_source,
        breakdown,
        note: ESTIMATE_NOTE.to_string(),
    })
}

/// Fetches a school's record and estimates its aid package.
pub struct EstimateService {
    client: Arc<Client>,
}

impl EstimateService {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub async fn estimate(&self, school_id: SchoolID, income: f64) -> Result<EstimateResult, AidError> {
        if !self.client.has_api_key() {
            return Err(AidError::missing_api_key());
        }
        let school_id = validation::validate_school_id(school_id)?;
        validation::validate_income(income)?;

        let school = self
            .client
            .get_school_record(school_id)
            .await?
            .ok_or_else(|| AidError::NotFound("School not found".to_string()))?;
        compute_estimate(&school, income)
    }
}
