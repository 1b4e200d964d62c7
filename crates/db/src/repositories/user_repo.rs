//! Repository for the `users` table.

use greenlight_core::user::TokenScope;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at, name, email, password_hash, activated, version";

/// Name of the unique index on `lower(email)`.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "uq_users_email";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new (not yet activated) user, returning the created row.
    pub async fn insert(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Write back `user` and bump its version.
    ///
    /// Returns `None` if the stored version no longer matches (edit conflict).
    pub async fn update(pool: &PgPool, user: &User) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = $3,
                email = $4,
                password_hash = $5,
                activated = $6,
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(user.version)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.activated)
            .fetch_optional(pool)
            .await
    }

    /// Find the owner of an unexpired token with the given hash and scope.
    pub async fn get_for_token(
        pool: &PgPool,
        scope: TokenScope,
        token_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT users.id, users.created_at, users.name, users.email,
                    users.password_hash, users.activated, users.version
             FROM users
             INNER JOIN tokens ON users.id = tokens.user_id
             WHERE tokens.hash = $1
               AND tokens.scope = $2
               AND tokens.expiry > NOW()",
        )
        .bind(token_hash)
        .bind(scope.as_str())
        .fetch_optional(pool)
        .await
    }
}
