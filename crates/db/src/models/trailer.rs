//! Trailer entity model and DTOs.

use greenlight_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::is_zero;

/// Full row from the `trailers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trailer {
    pub id: DbId,
    pub trailer_name: String,
    /// Seconds.
    #[serde(skip_serializing_if = "is_zero")]
    pub duration: i32,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub premier_date: String,
    pub version: i32,
}

/// Request body for creating a trailer.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateTrailer {
    pub trailer_name: String,
    pub duration: i32,
    pub premier_date: String,
}
