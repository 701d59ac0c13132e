use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::CONTENT_LENGTH;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::shared::config::AppConfig;
use crate::shared::errors::ErrorReport;
use crate::{log_error, log_warn};

/// Logs every error response produced by an `AppError` and, in development,
/// swaps the body for one that carries the underlying error.
pub async fn report_errors(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    if report.status.is_server_error() {
        log_error!(
            "{} {} -> {} {}: {}",
            method,
            path,
            report.status.as_u16(),
            report.code,
            report.detail
        );
    } else {
        log_warn!(
            "{} {} -> {} {}: {}",
            method,
            path,
            report.status.as_u16(),
            report.code,
            report.detail
        );
    }

    if !config.environment.is_development() {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    (parts, Json(report.detailed_body())).into_response()
}
