//! HTTP API routes and handlers

use crate::app_state::SharedAppState;
use crate::error::ClimateApiError;
use crate::metrics::{metrics_handler, record_response_metrics, request_counter};
use crate::models::{self, DateRange};
use crate::queries;
use crate::query;

use axum::{
    body::BoxBody,
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use tower::Layer;
use tower::ServiceBuilder;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

/// API paths listed by the index route.
pub const API_ROUTES: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

/// The climate API service type.
pub type Service = NormalizePath<Router>;

/// Returns a [axum::Router] for the climate API.
///
/// # Arguments
///
/// * `state`: Shared application state handed to each handler
pub fn router(state: SharedAppState) -> Router {
    fn v1() -> Router<SharedAppState> {
        Router::new()
            .route("/precipitation", get(precipitation))
            .route("/stations", get(stations))
            .route("/tobs", get(tobs))
            .route("/:start", get(temperature_stats_from))
            .route("/:start/:end", get(temperature_stats_between))
    }

    Router::new()
        .route("/", get(index))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1.0", v1())
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .on_request(request_counter)
                    .on_response(record_response_metrics::<BoxBody>),
            ),
        )
        .with_state(state)
}

/// Returns a [crate::app::Service] for the climate API.
///
/// The service removes trailing slashes from request paths before routing.
///
/// # Arguments
///
/// * `state`: Shared application state handed to each handler
pub fn service(state: SharedAppState) -> Service {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

async fn index() -> String {
    API_ROUTES.join("\n")
}

async fn precipitation(
    State(state): State<SharedAppState>,
) -> Result<Json<models::Precipitation>, ClimateApiError> {
    query::run(&queries::RecentPrecipitation {}, &state.store)
        .await
        .map(Json)
}

async fn stations(
    State(state): State<SharedAppState>,
) -> Result<Json<Vec<String>>, ClimateApiError> {
    query::run(&queries::Stations {}, &state.store).await.map(Json)
}

async fn tobs(
    State(state): State<SharedAppState>,
) -> Result<Json<Vec<models::TemperatureObservation>>, ClimateApiError> {
    query::run(&queries::RecentTemperatures {}, &state.store)
        .await
        .map(Json)
}

async fn temperature_stats_from(
    State(state): State<SharedAppState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<models::TemperatureStats>>, ClimateApiError> {
    let query = queries::TemperatureStatistics {
        range: DateRange::starting(start),
    };
    query::run(&query, &state.store).await.map(Json)
}

async fn temperature_stats_between(
    State(state): State<SharedAppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<models::TemperatureStats>>, ClimateApiError> {
    let query = queries::TemperatureStatistics {
        range: DateRange::between(start, end),
    };
    query::run(&query, &state.store).await.map(Json)
}

#[cfg(test)]
mod tests {
    // https://github.com/tokio-rs/axum/blob/main/examples/testing/src/main.rs

    use super::*;
    use crate::app_state::AppState;
    use crate::store::Store;
    use crate::test_utils;

    use axum::{
        body::Body,
        http::{self, header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    // Build the service and make a oneshot GET request.
    async fn request(store: Store, uri: &str) -> Response {
        let state = Arc::new(AppState::with_store(store));
        service(state)
            .oneshot(
                Request::builder()
                    .method(http::Method::GET)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    // Jump through the hoops to get the body as a string.
    async fn body_string(response: Response) -> String {
        String::from_utf8(
            hyper::body::to_bytes(response.into_body())
                .await
                .unwrap()
                .to_vec(),
        )
        .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    async fn get_json(uri: &str) -> Value {
        let response = request(test_utils::get_test_store().await, uri).await;
        assert_eq!(StatusCode::OK, response.status());
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            mime::APPLICATION_JSON.as_ref()
        );
        body_json(response).await
    }

    #[tokio::test]
    async fn index_lists_routes() {
        let response = request(test_utils::get_empty_store().await, "/").await;
        assert_eq!(StatusCode::OK, response.status());
        assert_eq!(
            "/api/v1.0/precipitation\n\
             /api/v1.0/stations\n\
             /api/v1.0/tobs\n\
             /api/v1.0/<start>\n\
             /api/v1.0/<start>/<end>",
            body_string(response).await
        );
    }

    #[tokio::test]
    async fn precipitation() {
        let body = get_json("/api/v1.0/precipitation").await;
        assert_eq!(
            json!({"2016-08-22": 0.3, "2017-02-01": null, "2017-08-23": 0.5}),
            body
        );
    }

    #[tokio::test]
    async fn stations() {
        let body = get_json("/api/v1.0/stations").await;
        assert_eq!(json!(["USC00513117", "USC00519281", "USC00519397"]), body);
    }

    #[tokio::test]
    async fn tobs() {
        let body = get_json("/api/v1.0/tobs").await;
        assert_eq!(
            json!([
                ["2016-08-22", 77.0],
                ["2016-08-22", 75.0],
                ["2017-02-01", 70.0],
                ["2017-08-23", 81.0],
                ["2017-08-23", 79.0]
            ]),
            body
        );
    }

    #[tokio::test]
    async fn temperature_stats_from_start() {
        let body = get_json("/api/v1.0/2017-01-01").await;
        assert_eq!(
            json!([
                ["2017-02-01", 70.0, 70.0, 70.0],
                ["2017-08-23", 79.0, 80.0, 81.0]
            ]),
            body
        );
    }

    #[tokio::test]
    async fn temperature_stats_single_day() {
        let body = get_json("/api/v1.0/2017-08-23/2017-08-23").await;
        assert_eq!(json!([["2017-08-23", 79.0, 80.0, 81.0]]), body);
    }

    #[tokio::test]
    async fn temperature_stats_start_after_end() {
        let body = get_json("/api/v1.0/2017-08-23/2016-01-01").await;
        assert_eq!(json!([]), body);
    }

    #[tokio::test]
    async fn temperature_stats_malformed_start() {
        let body = get_json("/api/v1.0/yesterday").await;
        assert_eq!(json!([]), body);
    }

    #[tokio::test]
    async fn trailing_slash() {
        let body = get_json("/api/v1.0/stations/").await;
        assert_eq!(json!(["USC00513117", "USC00519281", "USC00519397"]), body);
    }

    #[tokio::test]
    async fn empty_dataset() {
        for uri in ["/api/v1.0/precipitation", "/api/v1.0/tobs"] {
            let response = request(test_utils::get_empty_store().await, uri).await;
            assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
            assert_eq!(
                json!({"error": {"message": "no measurements available to determine the most recent date"}}),
                body_json(response).await
            );
        }
        for uri in ["/api/v1.0/stations", "/api/v1.0/2016-01-01"] {
            let response = request(test_utils::get_empty_store().await, uri).await;
            assert_eq!(StatusCode::OK, response.status());
            assert_eq!(json!([]), body_json(response).await);
        }
    }

    #[tokio::test]
    async fn unknown_route() {
        let response = request(test_utils::get_empty_store().await, "/api/v1.0/a/b/c").await;
        assert_eq!(StatusCode::NOT_FOUND, response.status());
    }

    #[tokio::test]
    async fn method_not_allowed() {
        let state = Arc::new(AppState::with_store(test_utils::get_empty_store().await));
        let response = service(state)
            .oneshot(
                Request::builder()
                    .method(http::Method::POST)
                    .uri("/api/v1.0/stations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(StatusCode::METHOD_NOT_ALLOWED, response.status());
    }

    #[tokio::test]
    async fn metrics() {
        let response = request(test_utils::get_empty_store().await, "/metrics").await;
        assert_eq!(StatusCode::OK, response.status());
    }
}
