//! One-time tokens for account activation and authentication.
//!
//! The plaintext is a random UUID v4 in simple form (32 hex chars). It is
//! sent to the client once; only its SHA-256 hex digest is persisted.

use chrono::{Duration, Utc};
use greenlight_core::types::{DbId, Timestamp};
use greenlight_core::user::TokenScope;
use greenlight_db::repositories::TokenRepo;
use greenlight_db::DbPool;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Activation tokens stay valid for 3 days.
pub const ACTIVATION_TTL_HOURS: i64 = 72;

pub const AUTHENTICATION_TTL_HOURS: i64 = 24;

/// A freshly generated token. Serializes as `{"token": ..., "expiry": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    #[serde(rename = "token")]
    pub plaintext: String,
    #[serde(skip)]
    pub hash: String,
    pub expiry: Timestamp,
    #[serde(skip)]
    pub scope: TokenScope,
    #[serde(skip)]
    pub user_id: DbId,
}

/// Compute the SHA-256 hex digest of a token plaintext.
pub fn hash_token(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn generate_token(user_id: DbId, ttl: Duration, scope: TokenScope) -> IssuedToken {
    let plaintext = Uuid::new_v4().simple().to_string();
    IssuedToken {
        hash: hash_token(&plaintext),
        plaintext,
        expiry: Utc::now() + ttl,
        scope,
        user_id,
    }
}

/// Generate a token and persist its hash.
pub async fn issue_token(
    pool: &DbPool,
    user_id: DbId,
    ttl: Duration,
    scope: TokenScope,
) -> Result<IssuedToken, sqlx::Error> {
    let token = generate_token(user_id, ttl, scope);
    TokenRepo::insert(pool, &token.hash, token.user_id, token.expiry, token.scope).await?;
    tracing::debug!(user_id, scope = scope.as_str(), "Token issued");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use greenlight_core::user::TOKEN_PLAINTEXT_LEN;
    use greenlight_core::validator::Validator;

    use super::*;

    #[test]
    fn plaintext_is_32_hex_chars() {
        let token = generate_token(1, Duration::hours(1), TokenScope::Activation);
        assert_eq!(token.plaintext.len(), TOKEN_PLAINTEXT_LEN);
        assert!(token.plaintext.chars().all(|c| c.is_ascii_hexdigit()));

        let mut v = Validator::new();
        greenlight_core::user::validate_token_plaintext(&mut v, &token.plaintext);
        assert!(v.valid());
    }

    #[test]
    fn hash_matches_plaintext() {
        let token = generate_token(1, Duration::hours(1), TokenScope::Authentication);
        assert_eq!(token.hash, hash_token(&token.plaintext));
        assert_eq!(token.hash.len(), 64);
        assert_ne!(token.hash, token.plaintext);
    }

    #[test]
    fn tokens_are_unique() {
        let a = generate_token(1, Duration::hours(1), TokenScope::Activation);
        let b = generate_token(1, Duration::hours(1), TokenScope::Activation);
        assert_ne!(a.plaintext, b.plaintext);
    }

    #[test]
    fn expiry_is_in_the_future() {
        let ttl = Duration::hours(AUTHENTICATION_TTL_HOURS);
        let token = generate_token(1, ttl, TokenScope::Authentication);
        assert!(token.expiry > Utc::now() + Duration::hours(AUTHENTICATION_TTL_HOURS - 1));
    }

    #[test]
    fn serializes_only_public_fields() {
        let token = generate_token(9, Duration::hours(1), TokenScope::Authentication);
        let json = serde_json::to_value(&token).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["token"], token.plaintext.as_str());
        assert!(obj.contains_key("expiry"));
    }
}
