use scorecard_api::types::fields;
use scorecard_api::{NameFilter, Query, SchoolQuery, SchoolSortBy, SortDirection};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/schools").unwrap()
}

fn pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs().into_owned().collect()
}

fn param(url: &Url, key: &str) -> Option<String> {
    pairs(url)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

#[test]
fn school_query_defaults_are_empty() {
    let url = SchoolQuery::default().add_to_url(&base_url());
    assert_eq!(url.query(), None);
}

#[test]
fn school_query_state_filter() {
    let url = SchoolQuery::default()
        .with_state("GA")
        .add_to_url(&base_url());
    assert_eq!(param(&url, "school.state").as_deref(), Some("GA"));
    assert_eq!(param(&url, "school.name"), None);
}

#[test]
fn school_query_name_filters() {
    let url = SchoolQuery::default()
        .with_name_containing("Georgia Tech")
        .add_to_url(&base_url());
    assert_eq!(param(&url, "school.name").as_deref(), Some("~Georgia Tech"));

    let query = SchoolQuery::default().with_name("Emory University");
    assert_eq!(
        query.name,
        Some(NameFilter::Exact("Emory University".to_string()))
    );
}

#[test]
fn school_query_fields_are_comma_joined() {
    let url = SchoolQuery::default()
        .with_fields(fields::ACCEPTANCE_FIELDS)
        .add_to_url(&base_url());
    assert_eq!(
        param(&url, "fields").as_deref(),
        Some("id,school.name,latest.admissions.admission_rate.overall")
    );
}

#[test]
fn school_query_pagination_and_sort() {
    let url = SchoolQuery::default()
        .with_per_page(25)
        .with_page(3)
        .with_sort_by(SchoolSortBy::Name)
        .add_to_url(&base_url());
    assert_eq!(param(&url, "per_page").as_deref(), Some("25"));
    assert_eq!(param(&url, "page").as_deref(), Some("3"));
    assert_eq!(param(&url, "sort").as_deref(), Some("school.name:asc"));

    let url = SchoolQuery::default()
        .with_sort_by(SchoolSortBy::Id)
        .with_sort_direction(SortDirection::Desc)
        .add_to_url(&base_url());
    assert_eq!(param(&url, "sort").as_deref(), Some("id:desc"));
}
