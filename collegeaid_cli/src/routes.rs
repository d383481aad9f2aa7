//! HTTP facade: JSON endpoints over [`AidClient`].

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use collegeaid_lib::{validation, AidClient, AidError, EstimateResult, SchoolLookup};
use collegeaid_lib::{AcceptanceSummary, TuitionSummary};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) client: Arc<AidClient>,
}

/// Maps a classified [`AidError`] onto an `{error, detail?}` response.
#[derive(Debug)]
pub(crate) struct ApiError(AidError);

impl From<AidError> for ApiError {
    fn from(value: AidError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            AidError::InvalidInput(msg) | AidError::Config(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            AidError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AidError::Upstream { status, detail } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({ "error": "Upstream error", "detail": detail }),
            ),
            AidError::Internal(msg) => {
                tracing::error!("request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SchoolsParams {
    #[serde(default)]
    pub(crate) q: Option<String>,
    #[serde(default)]
    pub(crate) per_page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LookupParams {
    #[serde(default)]
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) name: Option<String>,
}

/// Accepts `65000` as well as `"65000"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrText {
    fn as_text(&self) -> String {
        match self {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EstimateRequest {
    #[serde(default)]
    pub(crate) school_id: Option<NumberOrText>,
    #[serde(default)]
    pub(crate) income: Option<NumberOrText>,
}

pub(crate) fn router(client: Arc<AidClient>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/schools", get(schools_endpoint))
        .route("/api/estimate", post(estimate_endpoint))
        .route("/api/tuition", get(tuition_endpoint))
        .route("/api/acceptance", get(acceptance_endpoint))
        .layer(CorsLayer::permissive())
        .with_state(AppState { client })
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn schools_endpoint(
    State(state): State<AppState>,
    Query(params): Query<SchoolsParams>,
) -> Result<Json<Value>, ApiError> {
    let per_page = validation::parse_per_page(params.per_page.as_deref())?;
    let page = state
        .client
        .search_schools(params.q.as_deref(), Some(per_page))
        .await?;
    Ok(Json(page))
}

pub(crate) async fn estimate_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<EstimateResult>, ApiError> {
    if !state.client.has_api_key() {
        return Err(AidError::missing_api_key().into());
    }
    let Json(request) =
        payload.map_err(|e| AidError::invalid(format!("invalid request body: {}", e.body_text())))?;
    let (school_id, income) = match (request.school_id, request.income) {
        (Some(school_id), Some(income)) => (school_id, income),
        _ => return Err(AidError::invalid("schoolId and income are required").into()),
    };
    let school_id = validation::parse_school_id(&school_id.as_text())?;
    let income = validation::parse_income(&income.as_text())?;

    Ok(Json(state.client.estimate(school_id, income).await?))
}

pub(crate) async fn tuition_endpoint(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<TuitionSummary>, ApiError> {
    let lookup = SchoolLookup::from_parts(params.id.as_deref(), params.name.as_deref())?;
    Ok(Json(state.client.tuition(&lookup).await?))
}

pub(crate) async fn acceptance_endpoint(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<AcceptanceSummary>, ApiError> {
    let lookup = SchoolLookup::from_parts(params.id.as_deref(), params.name.as_deref())?;
    Ok(Json(state.client.acceptance(&lookup).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use collegeaid_lib::scorecard_api::Client;
    use collegeaid_lib::QueryCache;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(server: &MockServer, api_key: Option<&str>) -> Router {
        let client = Client::with_base_url(&server.uri(), api_key.map(str::to_string)).unwrap();
        router(Arc::new(AidClient::with_parts(client, QueryCache::default())))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn record_page() -> Value {
        json!({
            "metadata": {"page": 0, "total": 1, "per_page": 1},
            "results": [{
                "id": 139755,
                "school.name": "Georgia Institute of Technology-Main Campus",
                "school.city": "Atlanta",
                "school.state": "GA",
                "school.ownership": 1,
                "latest.cost.net_price.public.by_income_level.48001-75000": 12000
            }]
        })
    }

    #[tokio::test]
    async fn health_is_ok() {
        let server = MockServer::start().await;
        let (status, body) = send(app_for(&server, Some("k")), get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn schools_passes_page_through() {
        let server = MockServer::start().await;
        let page = json!({"metadata": {"page": 0, "total": 0, "per_page": 3}, "results": []});
        Mock::given(method("GET"))
            .and(path("/schools"))
            .and(query_param("school.state", "MD"))
            .and(query_param("per_page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
            .mount(&server)
            .await;

        let (status, body) = send(
            app_for(&server, Some("k")),
            get_req("/api/schools?q=md&per_page=3"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, page);
    }

    #[tokio::test]
    async fn schools_without_key_is_bad_request() {
        let server = MockServer::start().await;
        let (status, body) = send(app_for(&server, None), get_req("/api/schools?q=GA")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Missing API key"));
    }

    #[tokio::test]
    async fn schools_upstream_status_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schools"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API_KEY_INVALID"))
            .mount(&server)
            .await;

        let (status, body) = send(app_for(&server, Some("bad")), get_req("/api/schools")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Upstream error");
        assert_eq!(body["detail"], "API_KEY_INVALID");
    }

    #[tokio::test]
    async fn estimate_returns_breakdown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schools"))
            .and(query_param("id", "139755"))
            .respond_with(ResponseTemplate::new(200).set_body_json(record_page()))
            .mount(&server)
            .await;

        let (status, body) = send(
            app_for(&server, Some("k")),
            post_json("/api/estimate", json!({"schoolId": "139755", "income": 65000})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["school"]["id"], 139755);
        assert_eq!(body["bracket"], "48001-75000");
        assert_eq!(body["netPrice"], 12000.0);
        assert_eq!(body["breakdown"]["grants"], 5000.0);
        assert_eq!(body["breakdown"]["workStudy"], 2000.0);
        assert_eq!(body["breakdown"]["loans"], 3200.0);
        assert_eq!(body["breakdown"]["outOfPocket"], 1800.0);
        assert!(body["note"].as_str().unwrap().starts_with("Heuristic estimate"));
    }

    #[tokio::test]
    async fn estimate_requires_both_fields() {
        let server = MockServer::start().await;
        let (status, body) = send(
            app_for(&server, Some("k")),
            post_json("/api/estimate", json!({"schoolId": 139755})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "schoolId and income are required");
    }

    #[tokio::test]
    async fn estimate_rejects_non_numeric_income() {
        let server = MockServer::start().await;
        let (status, _) = send(
            app_for(&server, Some("k")),
            post_json("/api/estimate", json!({"schoolId": 1, "income": "plenty"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn estimate_unknown_school_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schools"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"metadata": {"page": 0, "total": 0, "per_page": 1}, "results": []}),
            ))
            .mount(&server)
            .await;

        let (status, body) = send(
            app_for(&server, Some("k")),
            post_json("/api/estimate", json!({"schoolId": 7, "income": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "School not found");
    }

    #[tokio::test]
    async fn malformed_upstream_body_is_generic_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schools"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let (status, body) = send(
            app_for(&server, Some("k")),
            post_json("/api/estimate", json!({"schoolId": 7, "income": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Server error"}));
    }

    #[tokio::test]
    async fn lookups_need_id_or_name() {
        let server = MockServer::start().await;
        let (status, body) = send(app_for(&server, Some("k")), get_req("/api/tuition")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Provide id or name");
    }

    #[tokio::test]
    async fn acceptance_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schools"))
            .and(query_param("school.name", "Georgia Institute of Technology"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "metadata": {"page": 0, "total": 1, "per_page": 1},
                "results": [{"id": 139755, "school.name": "Georgia Institute of Technology",
                             "latest.admissions.admission_rate.overall": 0.1712}]
            })))
            .mount(&server)
            .await;

        let (status, body) = send(
            app_for(&server, Some("k")),
            get_req("/api/acceptance?name=Georgia%20Institute%20of%20Technology"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["acceptanceRatePct"], 17.1);
        assert_eq!(body["name"], "Georgia Institute of Technology");
    }
}
