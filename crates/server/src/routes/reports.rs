use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use service::domain::{Dashboard, DailyReport, MonthlyReport};

use crate::errors::{ApiQuery, JsonApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DailyQuery {
    /// Calendar day, `YYYY-MM-DD`
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthlyQuery {
    /// 1..=12
    pub month: u32,
    pub year: i32,
}

#[utoipa::path(
    get, path = "/api/reports/daily", tag = "reports",
    params(DailyQuery),
    responses(
        (status = 200, description = "Payments of the day grouped by service", body = crate::openapi::DailyReportDoc),
        (status = 400, description = "Missing or malformed date")
    )
)]
pub async fn daily(State(state): State<AppState>, ApiQuery(q): ApiQuery<DailyQuery>) -> Result<Json<DailyReport>, JsonApiError> {
    Ok(Json(state.service.daily_report(q.date).await?))
}

#[utoipa::path(
    get, path = "/api/reports/monthly", tag = "reports",
    params(MonthlyQuery),
    responses(
        (status = 200, description = "Payments of the month by day and service", body = crate::openapi::MonthlyReportDoc),
        (status = 400, description = "Month outside 1..=12 or malformed query")
    )
)]
pub async fn monthly(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<MonthlyQuery>,
) -> Result<Json<MonthlyReport>, JsonApiError> {
    Ok(Json(state.service.monthly_report(q.month, q.year).await?))
}

#[utoipa::path(
    get, path = "/api/dashboard", tag = "reports",
    responses((status = 200, description = "Totals and revenue by service", body = crate::openapi::DashboardDoc))
)]
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, JsonApiError> {
    Ok(Json(state.service.dashboard().await?))
}
