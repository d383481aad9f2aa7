//! Income brackets and ownership sectors used to index the net-price tables.

use serde::{Serialize, Serializer};

/// One of the five household-income bands the dataset reports net price for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IncomeBracket {
    UpTo30k,
    From30kTo48k,
    From48kTo75k,
    From75kTo110k,
    Above110k,
}

impl IncomeBracket {
    /// All brackets in ascending income order.
    pub const ALL: [IncomeBracket; 5] = [
        IncomeBracket::UpTo30k,
        IncomeBracket::From30kTo48k,
        IncomeBracket::From48kTo75k,
        IncomeBracket::From75kTo110k,
        IncomeBracket::Above110k,
    ];

    /// The dataset label, also used as the field-name suffix.
    pub fn label(&self) -> &'static str {
        match self {
            IncomeBracket::UpTo30k => "0-30000",
            IncomeBracket::From30kTo48k => "30001-48000",
            IncomeBracket::From48kTo75k => "48001-75000",
            IncomeBracket::From75kTo110k => "75001-110000",
            IncomeBracket::Above110k => "110001-plus",
        }
    }

    /// Inclusive upper income bound, `None` for the open-ended top band.
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            IncomeBracket::UpTo30k => Some(30_000.0),
            IncomeBracket::From30kTo48k => Some(48_000.0),
            IncomeBracket::From48kTo75k => Some(75_000.0),
            IncomeBracket::From75kTo110k => Some(110_000.0),
            IncomeBracket::Above110k => None,
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for IncomeBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for IncomeBracket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Which net-price table a school reports into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sector {
    Public,
    Private,
}

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Public => "public",
            Sector::Private => "private",
        }
    }

    /// The other table, consulted when this one has no usable value.
    pub fn other(&self) -> Sector {
        match self {
            Sector::Public => Sector::Private,
            Sector::Private => Sector::Public,
        }
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
