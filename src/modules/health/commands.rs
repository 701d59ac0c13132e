use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::application::dto::HealthReport;
use super::application::service::HealthService;

pub async fn health_check(
    State(health_service): State<Arc<HealthService>>,
) -> (StatusCode, Json<HealthReport>) {
    let report = health_service.check().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
