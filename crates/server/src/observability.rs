use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static SERVICES_REGISTERED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "carwash_services_registered_total",
        "Total service records registered"
    )
    .expect("register services_registered_total")
});

pub static PAYMENTS_RECORDED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "carwash_payments_recorded_total",
        "Total payments recorded"
    )
    .expect("register payments_recorded_total")
});

pub static PAYMENTS_REVERSED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "carwash_payments_reversed_total",
        "Total payments deleted"
    )
    .expect("register payments_reversed_total")
});

pub static WORKFLOW_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "carwash_workflow_failures_total",
        "Workflow requests rejected, by error kind",
        &["kind"]
    )
    .expect("register workflow_failures_total")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
