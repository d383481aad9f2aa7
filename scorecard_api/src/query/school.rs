use url::Url;

use crate::types::fields;

use super::{
    common::{QueryCommon, SortDirection},
    Query,
};

/// How the `school.name` parameter should match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameFilter {
    /// Exact name match, e.g. `school.name=Georgia Institute of Technology`.
    Exact(String),
    /// Substring match, sent with the dataset's `~` prefix.
    Contains(String),
}

impl NameFilter {
    fn to_param(&self) -> String {
        match self {
            NameFilter::Exact(name) => name.clone(),
            NameFilter::Contains(fragment) => format!("~{}", fragment),
        }
    }
}

/// Query builder for the Scorecard `/schools` endpoint.
#[derive(Clone, Debug, Default)]
pub struct SchoolQuery {
    pub common: QueryCommon,
    pub fields: Vec<String>,
    pub id: Option<i64>,
    pub name: Option<NameFilter>,
    pub state: Option<String>,
    pub sort_by: Option<SchoolSortBy>,
}

impl Query for SchoolQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if !self.fields.is_empty() {
            url.query_pairs_mut()
                .append_pair("fields", self.fields.join(",").as_str());
        }
        if let Some(id) = self.id {
            url.query_pairs_mut()
                .append_pair(fields::ID, id.to_string().as_str());
        };
        if let Some(name) = &self.name {
            url.query_pairs_mut()
                .append_pair(fields::SCHOOL_NAME, name.to_param().as_str());
        };
        if let Some(state) = &self.state {
            url.query_pairs_mut()
                .append_pair(fields::SCHOOL_STATE, state.as_str());
        };

        let mut url = self.common.add_to_url(&url);

        if let Some(sort_by) = self.sort_by {
            url.query_pairs_mut().append_pair(
                "sort",
                format!("{}:{}", sort_by, self.common.sort_direction).as_str(),
            );
        }

        url
    }
}

impl SchoolQuery {
    pub fn with_fields<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        self.fields
            .extend(fields.iter().map(|f| f.as_ref().to_string()));
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(NameFilter::Exact(name.to_string()));
        self
    }

    pub fn with_name_containing(mut self, fragment: &str) -> Self {
        self.name = Some(NameFilter::Contains(fragment.to_string()));
        self
    }

    pub fn with_state(mut self, state: &str) -> Self {
        self.state = Some(state.to_string());
        self
    }

    pub fn with_sort_by(mut self, sort_by: SchoolSortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchoolSortBy {
    Name,
    State,
    Id,
}
impl std::fmt::Display for SchoolSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SchoolSortBy::Name => fields::SCHOOL_NAME,
                SchoolSortBy::State => fields::SCHOOL_STATE,
                SchoolSortBy::Id => fields::ID,
            }
        )?;
        Ok(())
    }
}
