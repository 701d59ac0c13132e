use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::app_error::AppError;

/// Generic message returned for internal failures; the detail stays in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error body as seen by clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Attached to every error response so the reporting middleware can log it
/// and decide how much detail the body carries.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub detail: String,
}

impl ErrorReport {
    /// Body without internal details.
    pub fn public_body(&self) -> ErrorBody {
        if self.status.is_server_error() {
            ErrorBody {
                error: self.message.clone(),
                code: None,
                details: None,
            }
        } else {
            ErrorBody {
                error: self.message.clone(),
                code: Some(self.code.to_string()),
                details: None,
            }
        }
    }

    /// Body including the underlying error, for development environments.
    pub fn detailed_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message.clone(),
            code: Some(self.code.to_string()),
            details: Some(self.detail.clone()),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_)
            | AppError::InternalError(_)
            | AppError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn report(&self) -> ErrorReport {
        let status = self.status_code();
        let message = if self.is_internal() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.message().to_string()
        };

        ErrorReport {
            status,
            code: self.code(),
            message,
            detail: self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = self.report();
        let mut response = (report.status, Json(report.public_body())).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::ValidationError("File is too large".to_string())
        } else {
            AppError::ValidationError(format!("Invalid multipart body: {}", err.body_text()))
        }
    }
}
