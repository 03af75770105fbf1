use axum::{extract::State, http::StatusCode, Json};
use models::service_record;
use service::domain::ServiceInput;

use crate::errors::{ApiJson, ApiPath, JsonApiError};
use crate::observability::SERVICES_REGISTERED_TOTAL;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/service-records", tag = "services",
    responses((status = 200, description = "All service records", body = [crate::openapi::ServiceRecordDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<service_record::Model>>, JsonApiError> {
    Ok(Json(state.service.list_service_records().await?))
}

#[utoipa::path(
    post, path = "/api/service-records", tag = "services",
    request_body = crate::openapi::ServiceInputDoc,
    responses(
        (status = 201, description = "Registered", body = crate::openapi::ServiceRecordDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Unknown car or package")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ServiceInput>,
) -> Result<(StatusCode, Json<service_record::Model>), JsonApiError> {
    let created = state.service.register_service(input).await?;
    SERVICES_REGISTERED_TOTAL.inc();
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/service-records/{record_number}", tag = "services",
    params(("record_number" = i32, Path, description = "Record number")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ServiceRecordDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    ApiPath(number): ApiPath<i32>,
) -> Result<Json<service_record::Model>, JsonApiError> {
    Ok(Json(state.service.get_service_record(number).await?))
}

#[utoipa::path(
    delete, path = "/api/service-records/{record_number}", tag = "services",
    params(("record_number" = i32, Path, description = "Record number")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Record has a payment")
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(number): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    state.service.delete_service(number).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/unpaid-services", tag = "services",
    responses((status = 200, description = "Service records without a payment", body = [crate::openapi::ServiceRecordDoc]))
)]
pub async fn unpaid(State(state): State<AppState>) -> Result<Json<Vec<service_record::Model>>, JsonApiError> {
    Ok(Json(state.service.list_unpaid().await?))
}
