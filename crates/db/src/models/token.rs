//! Token entity model.

use greenlight_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Row from the `tokens` table. Only the SHA-256 hash of the plaintext is kept.
#[derive(Debug, Clone, FromRow)]
pub struct Token {
    pub hash: String,
    pub user_id: DbId,
    pub expiry: Timestamp,
    pub scope: String,
}
