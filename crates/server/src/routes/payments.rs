use axum::{extract::State, http::StatusCode, Json};
use models::payment;
use service::domain::{BillView, PaymentInput};
use tracing::info;

use crate::errors::{ApiJson, ApiPath, JsonApiError};
use crate::observability::{PAYMENTS_RECORDED_TOTAL, PAYMENTS_REVERSED_TOTAL};
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/payments", tag = "payments",
    responses((status = 200, description = "All payments", body = [crate::openapi::PaymentDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<payment::Model>>, JsonApiError> {
    Ok(Json(state.service.list_payments().await?))
}

#[utoipa::path(
    post, path = "/api/payments", tag = "payments",
    request_body = crate::openapi::PaymentInputDoc,
    responses(
        (status = 201, description = "Recorded", body = crate::openapi::PaymentDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Unknown service record"),
        (status = 409, description = "Service record already paid")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PaymentInput>,
) -> Result<(StatusCode, Json<payment::Model>), JsonApiError> {
    let created = state.service.record_payment(input).await?;
    PAYMENTS_RECORDED_TOTAL.inc();
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/payments/{payment_number}", tag = "payments",
    params(("payment_number" = i32, Path, description = "Payment number")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PaymentDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, ApiPath(number): ApiPath<i32>) -> Result<Json<payment::Model>, JsonApiError> {
    Ok(Json(state.service.get_payment(number).await?))
}

#[utoipa::path(
    delete, path = "/api/payments/{payment_number}", tag = "payments",
    params(("payment_number" = i32, Path, description = "Payment number")),
    responses(
        (status = 204, description = "Reversed; the service record is unpaid again"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(number): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    let reversed = state.service.delete_payment(number).await?;
    PAYMENTS_REVERSED_TOTAL.inc();
    info!(payment_number = number, record_number = reversed.record_number, "payment reversed");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/bill/{record_number}", tag = "payments",
    params(("record_number" = i32, Path, description = "Paid service record")),
    responses(
        (status = 200, description = "Bill", body = crate::openapi::BillDoc),
        (status = 404, description = "Record has no payment")
    )
)]
pub async fn bill(State(state): State<AppState>, ApiPath(record): ApiPath<i32>) -> Result<Json<BillView>, JsonApiError> {
    Ok(Json(state.service.build_bill(record).await?))
}
