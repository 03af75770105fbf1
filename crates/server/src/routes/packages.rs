use axum::{extract::State, http::StatusCode, Json};
use models::package;
use service::domain::{PackageInput, PackagePatch};

use crate::errors::{ApiJson, ApiPath, JsonApiError};
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/packages", tag = "packages",
    responses((status = 200, description = "All packages", body = [crate::openapi::PackageDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<package::Model>>, JsonApiError> {
    Ok(Json(state.service.list_packages().await?))
}

#[utoipa::path(
    post, path = "/api/packages", tag = "packages",
    request_body = crate::openapi::PackageInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::PackageDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PackageInput>,
) -> Result<(StatusCode, Json<package::Model>), JsonApiError> {
    let created = state.service.create_package(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/packages/{package_number}", tag = "packages",
    params(("package_number" = i32, Path, description = "Package number")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PackageDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, ApiPath(number): ApiPath<i32>) -> Result<Json<package::Model>, JsonApiError> {
    Ok(Json(state.service.get_package(number).await?))
}

#[utoipa::path(
    put, path = "/api/packages/{package_number}", tag = "packages",
    params(("package_number" = i32, Path, description = "Package number")),
    request_body = crate::openapi::PackagePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PackageDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(number): ApiPath<i32>,
    ApiJson(patch): ApiJson<PackagePatch>,
) -> Result<Json<package::Model>, JsonApiError> {
    Ok(Json(state.service.update_package(number, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/packages/{package_number}", tag = "packages",
    params(("package_number" = i32, Path, description = "Package number")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Package has service records")
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(number): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    state.service.delete_package(number).await?;
    Ok(StatusCode::NO_CONTENT)
}
