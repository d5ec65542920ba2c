pub mod pages;
pub mod public;

use axum::http::Uri;

use crate::error::ApiError;

pub use public::*;

/// Fallback for paths outside the route table
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No page at '{}'", uri.path()))
}
