use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;

use super::application::service::{UploadService, UploadedImage};
use crate::shared::errors::{AppError, AppResult};

/// Expects the image in the multipart field `file`; other fields are ignored.
pub async fn upload_image(
    State(upload_service): State<Arc<UploadService>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadedImage>> {
    let mut multipart = multipart
        .map_err(|e| AppError::ValidationError(format!("Invalid upload: {}", e.body_text())))?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await?;
        let image = upload_service.to_data_url(content_type.as_deref(), &bytes)?;
        return Ok(Json(image));
    }

    Err(AppError::ValidationError("No file provided".to_string()))
}
