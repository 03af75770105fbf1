use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::observability::encode_metrics;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod cars;
pub mod packages;
pub mod payments;
pub mod reports;
pub mod service_records;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (axum::http::StatusCode, String) {
    encode_metrics()
}

/// Build the full application router: workflows under `/api`, plus health,
/// metrics and the OpenAPI UI.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/cars", get(cars::list).post(cars::create))
        .route("/api/cars/:plate_number", get(cars::get).put(cars::update).delete(cars::delete))
        .route("/api/packages", get(packages::list).post(packages::create))
        .route(
            "/api/packages/:package_number",
            get(packages::get).put(packages::update).delete(packages::delete),
        )
        .route("/api/service-records", get(service_records::list).post(service_records::create))
        .route(
            "/api/service-records/:record_number",
            get(service_records::get).delete(service_records::delete),
        )
        .route("/api/unpaid-services", get(service_records::unpaid))
        .route("/api/payments", get(payments::list).post(payments::create))
        .route("/api/payments/:payment_number", get(payments::get).delete(payments::delete))
        .route("/api/bill/:record_number", get(payments::bill))
        .route("/api/reports/daily", get(reports::daily))
        .route("/api/reports/monthly", get(reports::monthly))
        .route("/api/dashboard", get(reports::dashboard))
        .with_state(state);

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Compose
    public
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，级别 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
