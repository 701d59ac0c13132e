use diesel::result::DatabaseErrorKind;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Message meant for the caller, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            AppError::DatabaseError(m)
            | AppError::NotFound(m)
            | AppError::InvalidInput(m)
            | AppError::Conflict(m)
            | AppError::InternalError(m)
            | AppError::SerializationError(m)
            | AppError::ValidationError(m)
            | AppError::ServiceUnavailable(m) => m,
        }
    }

    /// Stable machine-readable code used in error bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InternalError(_) => "INTERNAL_ERROR",
            AppError::SerializationError(_) => "SERIALIZATION_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Expected errors are surfaced to the caller as-is; the rest are internal.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_)
                | AppError::InternalError(_)
                | AppError::SerializationError(_)
        )
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => {
                AppError::NotFound("Record not found in database".to_string())
            }
            diesel::result::Error::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation => AppError::Conflict(
                    info.constraint_name()
                        .map(|c| format!("Unique constraint {} violated", c))
                        .unwrap_or_else(|| info.message().to_string()),
                ),
                DatabaseErrorKind::ForeignKeyViolation => AppError::ValidationError(
                    "Referenced record does not exist".to_string(),
                ),
                DatabaseErrorKind::CheckViolation => {
                    AppError::ValidationError(info.message().to_string())
                }
                _ => AppError::DatabaseError(info.message().to_string()),
            },
            _ => AppError::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        AppError::DatabaseError(format!("Database pool error: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("Blocking task failed: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("Invalid UUID: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Rewrites the message of a store-level conflict into one fit for the caller.
pub trait ConflictContext<T> {
    fn on_conflict(self, message: &str) -> AppResult<T>;
}

impl<T> ConflictContext<T> for AppResult<T> {
    fn on_conflict(self, message: &str) -> AppResult<T> {
        self.map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict(message.to_string()),
            other => other,
        })
    }
}
