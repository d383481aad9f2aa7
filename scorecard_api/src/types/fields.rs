//! Flattened field names of the Scorecard `schools` dataset.
//!
//! Requesting `fields=...` makes the API return each record as a flat object
//! keyed by these dotted paths rather than as nested objects.

use super::{IncomeBracket, Sector};

pub const ID: &str = "id";
pub const SCHOOL_NAME: &str = "school.name";
pub const SCHOOL_CITY: &str = "school.city";
pub const SCHOOL_STATE: &str = "school.state";
pub const SCHOOL_OWNERSHIP: &str = "school.ownership";
pub const TUITION_IN_STATE: &str = "latest.cost.tuition.in_state";
pub const TUITION_OUT_OF_STATE: &str = "latest.cost.tuition.out_of_state";
pub const ADMISSION_RATE_OVERALL: &str = "latest.admissions.admission_rate.overall";

/// Fields needed to populate a search result row.
pub const SEARCH_FIELDS: &[&str] = &[ID, SCHOOL_NAME, SCHOOL_CITY, SCHOOL_STATE];

/// Fields for the tuition lookup.
pub const TUITION_FIELDS: &[&str] = &[ID, SCHOOL_NAME, TUITION_IN_STATE, TUITION_OUT_OF_STATE];

/// Fields for the acceptance-rate lookup.
pub const ACCEPTANCE_FIELDS: &[&str] = &[ID, SCHOOL_NAME, ADMISSION_RATE_OVERALL];

/// Net price for one sector and income bracket,
/// e.g. `latest.cost.net_price.public.by_income_level.0-30000`.
pub fn net_price(sector: Sector, bracket: IncomeBracket) -> String {
    format!(
        "latest.cost.net_price.{}.by_income_level.{}",
        sector.as_str(),
        bracket.label()
    )
}

/// Everything [`SchoolRecord`](super::SchoolRecord) is built from.
pub fn record_fields() -> Vec<String> {
    let mut out: Vec<String> = [
        ID,
        SCHOOL_NAME,
        SCHOOL_CITY,
        SCHOOL_STATE,
        SCHOOL_OWNERSHIP,
        TUITION_IN_STATE,
        TUITION_OUT_OF_STATE,
    ]
    .iter()
    .map(|f| f.to_string())
    .collect();
    for sector in [Sector::Public, Sector::Private] {
        for bracket in IncomeBracket::ALL {
            out.push(net_price(sector, bracket));
        }
    }
    out
}
