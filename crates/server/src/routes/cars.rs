use axum::{extract::State, http::StatusCode, Json};
use models::car;
use service::domain::{CarInput, CarPatch};
use tracing::info;

use crate::errors::{ApiJson, ApiPath, JsonApiError};
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/cars", tag = "cars",
    responses((status = 200, description = "All cars by plate number", body = [crate::openapi::CarDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<car::Model>>, JsonApiError> {
    Ok(Json(state.service.list_cars().await?))
}

#[utoipa::path(
    post, path = "/api/cars", tag = "cars",
    request_body = crate::openapi::CarDoc,
    responses(
        (status = 201, description = "Registered", body = crate::openapi::CarDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Plate number already registered")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CarInput>,
) -> Result<(StatusCode, Json<car::Model>), JsonApiError> {
    let created = state.service.register_car(input).await?;
    info!(plate = %created.plate_number, "car created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/cars/{plate_number}", tag = "cars",
    params(("plate_number" = String, Path, description = "Plate number")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CarDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, ApiPath(plate): ApiPath<String>) -> Result<Json<car::Model>, JsonApiError> {
    Ok(Json(state.service.get_car(&plate).await?))
}

#[utoipa::path(
    put, path = "/api/cars/{plate_number}", tag = "cars",
    params(("plate_number" = String, Path, description = "Plate number")),
    request_body = crate::openapi::CarPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CarDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(plate): ApiPath<String>,
    ApiJson(patch): ApiJson<CarPatch>,
) -> Result<Json<car::Model>, JsonApiError> {
    Ok(Json(state.service.update_car(&plate, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/cars/{plate_number}", tag = "cars",
    params(("plate_number" = String, Path, description = "Plate number")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Car has service records")
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(plate): ApiPath<String>) -> Result<StatusCode, JsonApiError> {
    state.service.delete_car(&plate).await?;
    Ok(StatusCode::NO_CONTENT)
}
