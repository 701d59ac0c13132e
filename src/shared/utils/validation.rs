use regex::Regex;
use uuid::Uuid;

use crate::shared::errors::{AppError, AppResult};

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_TEXT_ICON_LENGTH: usize = 32;
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

const IMAGE_REFERENCE_PATTERN: &str = r"^(https?://\S+|data:image/[A-Za-z0-9.+-]+(;[^,]*)?,\S*)$";

pub struct Validator;

impl Validator {
    /// Returns the trimmed title.
    pub fn validate_movie_title(title: Option<&str>) -> AppResult<String> {
        let title = title.map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err(AppError::ValidationError("Title is required".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Title too long (max {} characters)",
                MAX_TITLE_LENGTH
            )));
        }
        Ok(title.to_string())
    }

    /// Returns the trimmed name.
    pub fn validate_user_name(name: Option<&str>) -> AppResult<String> {
        let name = name.map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Name too long (max {} characters)",
                MAX_NAME_LENGTH
            )));
        }
        Ok(name.to_string())
    }

    /// An empty string means "no image".
    pub fn normalize_image(image: Option<&str>) -> AppResult<Option<String>> {
        match image.map(str::trim) {
            None | Some("") => Ok(None),
            Some(reference) => {
                if Self::is_image_reference(reference)? {
                    Ok(Some(reference.to_string()))
                } else {
                    Err(AppError::ValidationError(
                        "Image must be an http(s) URL or an image data URL".to_string(),
                    ))
                }
            }
        }
    }

    /// Icons are either a short text/emoji or an image reference.
    pub fn validate_icon(icon: Option<&str>) -> AppResult<String> {
        let icon = icon.map(str::trim).unwrap_or_default();
        if icon.is_empty() {
            return Err(AppError::ValidationError("Icon is required".to_string()));
        }
        if Self::is_image_reference(icon)? || icon.chars().count() <= MAX_TEXT_ICON_LENGTH {
            return Ok(icon.to_string());
        }
        Err(AppError::ValidationError(format!(
            "Icon must be an emoji, short text (max {} characters) or an image URL",
            MAX_TEXT_ICON_LENGTH
        )))
    }

    pub fn validate_rating(rating: i32) -> AppResult<i32> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::ValidationError(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
        Ok(rating)
    }

    /// Validates an optional score; `None` passes through.
    pub fn validate_optional_rating(rating: Option<i32>) -> AppResult<Option<i32>> {
        rating.map(Self::validate_rating).transpose()
    }

    /// Parses a required id from a request body.
    pub fn require_id(field: &str, value: Option<&str>) -> AppResult<Uuid> {
        match value.map(str::trim) {
            None | Some("") => Err(AppError::ValidationError(format!("{} is required", field))),
            Some(raw) => Self::parse_id(field, raw),
        }
    }

    pub fn parse_id(field: &str, raw: &str) -> AppResult<Uuid> {
        Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::ValidationError(format!("{} must be a valid id", field)))
    }

    pub fn parse_ids(field: &str, raw: &[String]) -> AppResult<Vec<Uuid>> {
        let mut ids = Vec::with_capacity(raw.len());
        for value in raw {
            let id = Self::parse_id(field, value)?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Trims free text; blank text becomes `None`.
    pub fn normalize_text(text: Option<&str>) -> Option<String> {
        text.map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    fn is_image_reference(value: &str) -> AppResult<bool> {
        let re = Regex::new(IMAGE_REFERENCE_PATTERN)
            .map_err(|e| AppError::InternalError(format!("Invalid image pattern: {}", e)))?;
        Ok(re.is_match(value))
    }
}
