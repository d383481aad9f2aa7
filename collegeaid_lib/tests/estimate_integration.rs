use collegeaid_lib::scorecard_api::Client;
use collegeaid_lib::types::IncomeBracket;
use collegeaid_lib::{AidClient, AidError, NetPriceSource, QueryCache, SchoolLookup};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page(results: Vec<Value>) -> Value {
    json!({
        "metadata": {"page": 0, "total": results.len(), "per_page": 1},
        "results": results
    })
}

fn aid_client(server: &MockServer) -> AidClient {
    let client = Client::with_base_url(&server.uri(), Some("test-key".to_string())).unwrap();
    AidClient::with_parts(client, QueryCache::default())
}

async fn mount_record(server: &MockServer, record: Value) {
    Mock::given(method("GET"))
        .and(path("/schools"))
        .and(query_param("per_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![record])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn estimate_for_public_school() {
    let server = MockServer::start().await;
    mount_record(
        &server,
        json!({
            "id": 139755,
            "school.name": "Georgia Institute of Technology-Main Campus",
            "school.city": "Atlanta",
            "school.state": "GA",
            "school.ownership": 1,
            "latest.cost.tuition.in_state": 10258,
            "latest.cost.tuition.out_of_state": 31370,
            "latest.cost.net_price.public.by_income_level.48001-75000": 12000
        }),
    )
    .await;

    let result = aid_client(&server).estimate(139755, 65_000.0).await.unwrap();
    assert_eq!(result.school.name, "Georgia Institute of Technology-Main Campus");
    assert_eq!(result.bracket, IncomeBracket::From48kTo75k);
    assert_eq!(result.net_price, 12_000.0);
    assert_eq!(result.breakdown.grants, 5_000.0);
    assert_eq!(result.breakdown.work_study, 2_000.0);
    assert_eq!(result.breakdown.loans, 3_200.0);
    assert_eq!(result.breakdown.out_of_pocket, 1_800.0);
}

#[tokio::test]
async fn estimate_sector_fallback() {
    let server = MockServer::start().await;
    mount_record(
        &server,
        json!({
            "id": 1,
            "school.name": "Fallback State",
            "school.ownership": "1",
            "latest.cost.net_price.public.by_income_level.0-30000": 0,
            "latest.cost.net_price.private.by_income_level.0-30000": "8000"
        }),
    )
    .await;

    let result = aid_client(&server).estimate(1, 25_000.0).await.unwrap();
    assert_eq!(result.net_price, 8_000.0);
    assert_eq!(result.net_price_source, NetPriceSource::OtherSectorTable);
}

#[tokio::test]
async fn estimate_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
        .mount(&server)
        .await;

    let result = aid_client(&server).estimate(42, 50_000.0).await;
    assert!(matches!(result, Err(AidError::NotFound(_))));
}

#[tokio::test]
async fn estimate_rejects_negative_income_before_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let result = aid_client(&server).estimate(1, -10.0).await;
    assert!(matches!(result, Err(AidError::InvalidInput(_))));
}

#[tokio::test]
async fn estimate_malformed_record_is_internal() {
    let server = MockServer::start().await;
    mount_record(&server, json!({"id": 1, "school.name": "X", "school.ownership": "public"})).await;

    let result = aid_client(&server).estimate(1, 50_000.0).await;
    assert!(matches!(result, Err(AidError::Internal(_))));
}

#[tokio::test]
async fn estimate_upstream_error_propagates_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schools"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    match aid_client(&server).estimate(1, 50_000.0).await {
        Err(AidError::Upstream { status, detail }) => {
            assert_eq!(status, 503);
            assert_eq!(detail, "maintenance");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn tuition_lookup_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schools"))
        .and(query_param("school.name", "Emory University"))
        .and(query_param(
            "fields",
            "id,school.name,latest.cost.tuition.in_state,latest.cost.tuition.out_of_state",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![json!({
            "id": 139658,
            "school.name": "Emory University",
            "latest.cost.tuition.in_state": 57948,
            "latest.cost.tuition.out_of_state": 57948
        })])))
        .mount(&server)
        .await;

    let lookup = SchoolLookup::ByName("Emory University".to_string());
    let tuition = aid_client(&server).tuition(&lookup).await.unwrap();
    assert_eq!(tuition.id, 139658);
    assert_eq!(tuition.in_state, Some(57948.0));
}

#[tokio::test]
async fn acceptance_lookup_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schools"))
        .and(query_param("id", "139755"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![json!({
            "id": 139755,
            "school.name": "Georgia Institute of Technology-Main Campus",
            "latest.admissions.admission_rate.overall": 0.1712
        })])))
        .mount(&server)
        .await;

    let acceptance = aid_client(&server)
        .acceptance(&SchoolLookup::ById(139755))
        .await
        .unwrap();
    assert_eq!(acceptance.acceptance_rate_pct, Some(17.1));
}

#[tokio::test]
async fn lookup_without_match_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
        .mount(&server)
        .await;

    let result = aid_client(&server)
        .acceptance(&SchoolLookup::ById(5))
        .await;
    assert!(matches!(result, Err(AidError::NotFound(_))));
}
