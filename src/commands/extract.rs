//! Extractors whose rejections are reported as `AppError`, so malformed
//! bodies, paths and query strings get the same JSON error shape as
//! everything else.

use axum::extract::{FromRequest, FromRequestParts};
use serde::Serialize;

use crate::shared::errors::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Body returned by every successful delete.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Deleted {
    pub success: bool,
}

impl Deleted {
    pub const OK: Deleted = Deleted { success: true };
}
