//! JSON responses for unmatched routes and methods.

use axum::http::Method;

use crate::error::AppError;

/// Router fallback: no route matches the path.
pub async fn not_found() -> AppError {
    AppError::ResourceNotFound
}

/// The path matched but not for this method.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method)
}
