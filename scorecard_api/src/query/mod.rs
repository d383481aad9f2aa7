mod common;
pub use self::common::{Query, QueryCommon, SortDirection};
mod school;
pub use self::school::{NameFilter, SchoolQuery, SchoolSortBy};
