//! School records: the typed form of a flattened `/schools` result.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{fields, FlatRecord, IncomeBracket, RecordError, Sector};

/// Numeric identifier for an institution (the dataset's UNITID).
pub type SchoolID = i64;

/// Control of the institution, as coded in `school.ownership`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ownership {
    Public,
    PrivateNonprofit,
    PrivateForProfit,
    /// A code the dataset added after this client was written.
    Other(i64),
}

impl Ownership {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Ownership::Public,
            2 => Ownership::PrivateNonprofit,
            3 => Ownership::PrivateForProfit,
            other => Ownership::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Ownership::Public => 1,
            Ownership::PrivateNonprofit => 2,
            Ownership::PrivateForProfit => 3,
            Ownership::Other(code) => *code,
        }
    }

    /// Only code 1 reports into the public table; everything else,
    /// including an unknown ownership, is treated as private.
    pub fn sector(ownership: Option<Ownership>) -> Sector {
        match ownership {
            Some(Ownership::Public) => Sector::Public,
            _ => Sector::Private,
        }
    }
}

/// Average net price by sector and income bracket. Cells the dataset
/// suppresses or does not report are `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetPriceTable {
    public: [Option<f64>; 5],
    private: [Option<f64>; 5],
}

impl NetPriceTable {
    pub fn get(&self, sector: Sector, bracket: IncomeBracket) -> Option<f64> {
        match sector {
            Sector::Public => self.public[bracket.index()],
            Sector::Private => self.private[bracket.index()],
        }
    }

    pub fn set(&mut self, sector: Sector, bracket: IncomeBracket, value: Option<f64>) {
        match sector {
            Sector::Public => self.public[bracket.index()] = value,
            Sector::Private => self.private[bracket.index()] = value,
        }
    }

    /// Builder-style [`set`](Self::set), handy in tests and fixtures.
    pub fn with(mut self, sector: Sector, bracket: IncomeBracket, value: f64) -> Self {
        self.set(sector, bracket, Some(value));
        self
    }
}

/// The identifying subset of a school shown alongside results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchoolSummary {
    pub id: SchoolID,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Everything the estimate needs to know about one school.
#[derive(Clone, Debug, PartialEq)]
pub struct SchoolRecord {
    pub id: SchoolID,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub ownership: Option<Ownership>,
    pub tuition_in_state: Option<f64>,
    pub tuition_out_of_state: Option<f64>,
    pub net_price: NetPriceTable,
}

impl SchoolRecord {
    /// Converts a flattened record requested with [`fields::record_fields`].
    pub fn from_flattened(value: &Value) -> Result<Self, RecordError> {
        let rec = FlatRecord::new(value)?;

        let ownership = match rec.number(fields::SCHOOL_OWNERSHIP)? {
            Some(code) if code.fract() == 0.0 => Some(Ownership::from_code(code as i64)),
            Some(code) => {
                return Err(RecordError::InvalidNumber {
                    field: fields::SCHOOL_OWNERSHIP.to_string(),
                    value: code.to_string(),
                })
            }
            None => None,
        };

        let mut net_price = NetPriceTable::default();
        for sector in [Sector::Public, Sector::Private] {
            for bracket in IncomeBracket::ALL {
                let value = rec.number(&fields::net_price(sector, bracket))?;
                net_price.set(sector, bracket, value);
            }
        }

        Ok(Self {
            id: rec.id()?,
            name: rec.required_string(fields::SCHOOL_NAME)?,
            city: rec.string(fields::SCHOOL_CITY)?,
            state: rec.string(fields::SCHOOL_STATE)?,
            ownership,
            tuition_in_state: rec.number(fields::TUITION_IN_STATE)?,
            tuition_out_of_state: rec.number(fields::TUITION_OUT_OF_STATE)?,
            net_price,
        })
    }

    pub fn sector(&self) -> Sector {
        Ownership::sector(self.ownership)
    }

    pub fn summary(&self) -> SchoolSummary {
        SchoolSummary {
            id: self.id,
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
        }
    }
}
