use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::observability::WORKFLOW_FAILURES_TOTAL;

/// JSON error body: `{"error": <title>, "kind": <machine kind>, "message": <text>}`.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub kind: String,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, message: Option<String>) -> Self {
        let kind = match status {
            StatusCode::BAD_REQUEST => "bad_request",
            StatusCode::NOT_FOUND => "not_found",
            StatusCode::CONFLICT => "conflict",
            _ => "internal",
        };
        Self { status, error: error.to_string(), kind: kind.to_string(), message }
    }

    fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        WORKFLOW_FAILURES_TOTAL.with_label_values(&[e.kind()]).inc();
        let (status, title) = match &e {
            ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error"),
            ServiceError::NotFound(..) => (StatusCode::NOT_FOUND, "Not Found"),
            ServiceError::DuplicateKey(..) => (StatusCode::CONFLICT, "Duplicate Key"),
            ServiceError::AlreadyPaid(_) => (StatusCode::CONFLICT, "Already Paid"),
            ServiceError::HasDependents(..) => (StatusCode::CONFLICT, "Has Dependents"),
            ServiceError::Db(_) => {
                error!(err = %e, code = e.code(), "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };
        JsonApiError::new(status, title, Some(e.to_string())).with_kind(e.kind())
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Body", Some(r.body_text())).with_kind("validation")
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Query", Some(r.body_text())).with_kind("validation")
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Path", Some(r.body_text())).with_kind("validation")
    }
}

/// `Json` extractor whose rejections use the JSON error body.
#[derive(axum::extract::FromRequest)]
#[from_request(via(axum::Json), rejection(JsonApiError))]
pub struct ApiJson<T>(pub T);

#[derive(axum::extract::FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(JsonApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(axum::extract::FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(JsonApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::EntityKind;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::not_found(EntityKind::Car, "RAA111A"), StatusCode::NOT_FOUND),
            (ServiceError::DuplicateKey(EntityKind::Car, "RAA111A".into()), StatusCode::CONFLICT),
            (ServiceError::AlreadyPaid(1), StatusCode::CONFLICT),
            (ServiceError::HasDependents(EntityKind::Package, "1".into(), "service records"), StatusCode::CONFLICT),
            (ServiceError::Db("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (e, status) in cases {
            let kind = e.kind();
            let api: JsonApiError = e.into();
            assert_eq!(api.status, status);
            assert_eq!(api.kind, kind);
        }
    }

    #[test]
    fn body_has_error_kind_message() {
        let api: JsonApiError = ServiceError::AlreadyPaid(3).into();
        let v = serde_json::to_value(&api).unwrap();
        assert_eq!(v["error"], "Already Paid");
        assert_eq!(v["kind"], "already_paid");
        assert_eq!(v["message"], "service record 3 is already paid");
        assert!(v.get("status").is_none());
    }
}
