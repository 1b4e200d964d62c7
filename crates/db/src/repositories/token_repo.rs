//! Repository for the `tokens` table.

use greenlight_core::types::{DbId, Timestamp};
use greenlight_core::user::TokenScope;
use sqlx::PgPool;

use crate::models::token::Token;

pub struct TokenRepo;

impl TokenRepo {
    /// Store a token hash for `user_id`.
    pub async fn insert(
        pool: &PgPool,
        hash: &str,
        user_id: DbId,
        expiry: Timestamp,
        scope: TokenScope,
    ) -> Result<Token, sqlx::Error> {
        sqlx::query_as::<_, Token>(
            "INSERT INTO tokens (hash, user_id, expiry, scope)
             VALUES ($1, $2, $3, $4)
             RETURNING hash, user_id, expiry, scope",
        )
        .bind(hash)
        .bind(user_id)
        .bind(expiry)
        .bind(scope.as_str())
        .fetch_one(pool)
        .await
    }

    /// Delete every token of `scope` belonging to `user_id`.
    /// Returns the number of deleted rows.
    pub async fn delete_all_for_user(
        pool: &PgPool,
        scope: TokenScope,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tokens WHERE scope = $1 AND user_id = $2")
            .bind(scope.as_str())
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every token whose expiry has passed. Returns the number of deleted rows.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tokens WHERE expiry <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
