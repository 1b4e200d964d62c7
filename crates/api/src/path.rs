//! Path parameter extraction.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use greenlight_core::types::DbId;

use crate::error::AppError;

/// The `{id}` segment of a route, parsed as a positive integer.
///
/// Anything else (non-numeric, zero, negative, overflowing) is treated as a
/// missing resource and rejected with 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParam(pub DbId);

/// Parse a raw id segment. Only positive integers are accepted.
pub fn parse_id(raw: &str) -> Option<DbId> {
    raw.parse::<DbId>().ok().filter(|id| *id > 0)
}

impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::ResourceNotFound)?;
        parse_id(&raw).map(IdParam).ok_or(AppError::ResourceNotFound)
    }
}
