pub mod api_error;
pub mod app_error;

pub use api_error::{ErrorBody, ErrorReport, INTERNAL_ERROR_MESSAGE};
pub use app_error::{AppError, AppResult, ConflictContext};
