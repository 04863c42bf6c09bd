//! HTTP request handlers organized by domain.

pub mod aircheck;
pub mod batch;
pub mod folder;
pub mod health;
pub mod media;
pub mod sync;

use mediahub_core::error::AppError;

use crate::error::ApiError;

/// Method fallback of every route: a JSON 405.
pub async fn method_not_allowed() -> ApiError {
    AppError::method_not_allowed().into()
}
