//! Single-school field lookups: tuition and acceptance rate.
//! These are straight projections of one record; nothing is cached.

use std::sync::Arc;

use scorecard_api::types::{fields, FlatRecord, SchoolID};
use scorecard_api::{Client, SchoolQuery};
use serde::Serialize;
use serde_json::Value;

use crate::error::AidError;
use crate::validation;

/// Identifies one school by id or by exact name. The id wins when both are given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchoolLookup {
    ById(SchoolID),
    ByName(String),
}

impl SchoolLookup {
    pub fn from_parts(id: Option<&str>, name: Option<&str>) -> Result<Self, AidError> {
        let id = id.map(str::trim).filter(|s| !s.is_empty());
        let name = name.map(str::trim).filter(|s| !s.is_empty());
        match (id, name) {
            (Some(id), _) => Ok(SchoolLookup::ById(validation::parse_school_id(id)?)),
            (None, Some(name)) => Ok(SchoolLookup::ByName(validation::validate_search(name)?)),
            (None, None) => Err(AidError::invalid("Provide id or name")),
        }
    }

    fn to_query(&self, wanted: &[&str]) -> SchoolQuery {
        let query = SchoolQuery::default().with_fields(wanted);
        match self {
            SchoolLookup::ById(id) => query.with_id(*id),
            SchoolLookup::ByName(name) => query.with_name(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TuitionSummary {
    pub id: SchoolID,
    pub name: Option<String>,
    pub in_state: Option<f64>,
    pub out_state: Option<f64>,
}

impl TuitionSummary {
    pub fn from_flattened(raw: &Value) -> Result<Self, AidError> {
        let rec = FlatRecord::new(raw)?;
        Ok(Self {
            id: rec.id()?,
            name: rec.string(fields::SCHOOL_NAME)?,
            in_state: rec.number(fields::TUITION_IN_STATE)?,
            out_state: rec.number(fields::TUITION_OUT_OF_STATE)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptanceSummary {
    pub id: SchoolID,
    pub name: Option<String>,
    /// Overall admission rate as a percentage with one decimal.
    pub acceptance_rate_pct: Option<f64>,
}

impl AcceptanceSummary {
    pub fn from_flattened(raw: &Value) -> Result<Self, AidError> {
        let rec = FlatRecord::new(raw)?;
        Ok(Self {
            id: rec.id()?,
            name: rec.string(fields::SCHOOL_NAME)?,
            acceptance_rate_pct: rec
                .number(fields::ADMISSION_RATE_OVERALL)?
                .map(fraction_to_pct),
        })
    }
}

/// `0.1712` -> `17.1`
pub fn fraction_to_pct(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}

pub struct LookupService {
    client: Arc<Client>,
}

impl LookupService {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    async fn first(&self, lookup: &SchoolLookup, wanted: &[&str]) -> Result<Value, AidError> {
        if !self.client.has_api_key() {
            return Err(AidError::missing_api_key());
        }
        self.client
            .first_school(&lookup.to_query(wanted))
            .await?
            .ok_or_else(|| AidError::NotFound("School not found".to_string()))
    }

    pub async fn tuition(&self, lookup: &SchoolLookup) -> Result<TuitionSummary, AidError> {
        let raw = self.first(lookup, fields::TUITION_FIELDS).await?;
        TuitionSummary::from_flattened(&raw)
    }

    pub async fn acceptance(&self, lookup: &SchoolLookup) -> Result<AcceptanceSummary, AidError> {
        let raw = self.first(lookup, fields::ACCEPTANCE_FIELDS).await?;
        AcceptanceSummary::from_flattened(&raw)
    }
}
