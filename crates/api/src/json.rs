//! Strict JSON request body decoding.
//!
//! [`ReadJson`] replaces `axum::Json` for request bodies. It caps the body
//! size, accepts exactly one JSON value, and turns every decoding failure into
//! a client-facing message (see [`JsonBodyError`]). Unknown keys are rejected
//! when the target type uses `#[serde(deny_unknown_fields)]`.

use std::error::Error as StdError;

use axum::extract::{FromRequest, Request};
use http_body_util::LengthLimitError;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::AppError;

/// Largest accepted request body (1 MiB).
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Why a request body could not be decoded. The `Display` text is sent to
/// the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonBodyError {
    #[error("body must not be empty")]
    Empty,

    #[error("body contains badly-formed JSON (at line {line}, column {column})")]
    Syntax { line: usize, column: usize },

    #[error("body contains badly-formed JSON")]
    UnexpectedEof,

    #[error("body contains incorrect JSON type (at line {line}, column {column})")]
    IncorrectType { line: usize, column: usize },

    #[error("body contains unknown key \"{0}\"")]
    UnknownKey(String),

    #[error("body must not be larger than {0} bytes")]
    TooLarge(usize),

    #[error("body must only contain a single JSON value")]
    TrailingData,

    #[error("body contains invalid JSON: {0}")]
    Invalid(String),

    #[error("body could not be read")]
    Unreadable,
}

/// Decode exactly one JSON value of type `T` from `bytes`.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, JsonBodyError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(JsonBodyError::Empty);
    }

    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value: T = serde::Deserialize::deserialize(&mut de).map_err(classify)?;
    de.end().map_err(|_| JsonBodyError::TrailingData)?;
    Ok(value)
}

fn classify(err: serde_json::Error) -> JsonBodyError {
    let (line, column) = (err.line(), err.column());
    match err.classify() {
        Category::Eof => JsonBodyError::UnexpectedEof,
        Category::Syntax => JsonBodyError::Syntax { line, column },
        Category::Io => JsonBodyError::Unreadable,
        Category::Data => {
            let message = err.to_string();
            if let Some(key) = unknown_field(&message) {
                JsonBodyError::UnknownKey(key.to_string())
            } else if message.starts_with("invalid type") || message.starts_with("invalid value") {
                JsonBodyError::IncorrectType { line, column }
            } else {
                let detail = message
                    .rsplit_once(" at line ")
                    .map_or(message.as_str(), |(head, _)| head);
                JsonBodyError::Invalid(detail.to_string())
            }
        }
    }
}

/// Extract `name` from serde's "unknown field `name`, expected ..." message.
fn unknown_field(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("unknown field `")?;
    rest.split_once('`').map(|(name, _)| name)
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

/// Request body extractor with the checks described in the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadJson<T>(pub T);

impl<T, S> FromRequest<S> for ReadJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| {
                if is_length_limit(&e) {
                    JsonBodyError::TooLarge(MAX_BODY_BYTES)
                } else {
                    JsonBodyError::Unreadable
                }
            })?;

        Ok(ReadJson(decode_json(&bytes)?))
    }
}
