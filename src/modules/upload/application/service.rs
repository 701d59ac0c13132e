use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;

use crate::shared::config::UploadConfig;
use crate::shared::errors::{AppError, AppResult};

const BYTES_PER_MB: usize = 1024 * 1024;
/// Room for the JSON fields around an inline image.
const JSON_ENVELOPE_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedImage {
    pub url: String,
}

/// Turns uploaded image files into inline `data:` URLs. Nothing is stored.
#[derive(Debug, Clone)]
pub struct UploadService {
    max_bytes: usize,
}

impl UploadService {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            max_bytes: config.max_image_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Largest JSON body that can carry a data URL produced by `to_data_url`.
    pub fn max_json_body_bytes(&self) -> usize {
        self.max_bytes
            .div_ceil(3)
            .saturating_mul(4)
            .saturating_add(JSON_ENVELOPE_BYTES)
    }

    pub fn to_data_url(&self, content_type: Option<&str>, bytes: &[u8]) -> AppResult<UploadedImage> {
        let content_type = content_type
            .map(str::trim)
            .filter(|ct| ct.starts_with("image/"))
            .ok_or_else(|| AppError::ValidationError("File must be an image".to_string()))?;

        if bytes.len() > self.max_bytes {
            return Err(self.too_large());
        }

        let payload = general_purpose::STANDARD.encode(bytes);
        Ok(UploadedImage {
            url: format!("data:{};base64,{}", content_type, payload),
        })
    }

    pub fn too_large(&self) -> AppError {
        AppError::ValidationError(format!(
            "File size must be less than {}MB",
            self.max_bytes.div_ceil(BYTES_PER_MB)
        ))
    }
}
