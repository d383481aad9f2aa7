use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Metadata {
    pub page: i64,
    pub total: i64,
    pub per_page: i64,
}

/// One page of `/schools` results. Records stay in the dataset's flattened
/// `"a.b.c": value` form until converted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub metadata: Metadata,
    pub results: Vec<T>,
}
