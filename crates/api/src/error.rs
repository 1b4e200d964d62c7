use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use greenlight_core::error::CoreError;
use greenlight_core::validator::ValidationErrors;
use greenlight_db::repositories::movie_repo::ListError;
use serde_json::{json, Value};

use crate::auth::password::PasswordError;
use crate::json::JsonBodyError;

pub const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";

pub const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{"error": ...}` with a matching status code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `greenlight_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body could not be decoded.
    #[error(transparent)]
    Json(#[from] JsonBodyError),

    /// Password hashing or verification failed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route (or no record behind a route parameter) matches the request.
    #[error("Resource not found")]
    ResourceNotFound,

    /// The path exists but does not accept this method.
    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    /// The request ran past the configured timeout.
    #[error("Request timed out")]
    RequestTimeout,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// A failed validation carrying a single field error.
    pub fn field(key: &str, message: &str) -> Self {
        let mut errors = ValidationErrors::new();
        errors.insert(key.to_string(), message.to_string());
        AppError::Core(CoreError::FailedValidation(errors))
    }
}

impl From<ListError> for AppError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::Core(e) => AppError::Core(e),
            ListError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut challenge = false;

        let (status, error): (StatusCode, Value) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id, "Record not found");
                    (StatusCode::NOT_FOUND, json!(NOT_FOUND_MESSAGE))
                }
                CoreError::FailedValidation(errors) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, json!(errors))
                }
                CoreError::EditConflict => (
                    StatusCode::CONFLICT,
                    json!("unable to update the record due to an edit conflict, please try again"),
                ),
                CoreError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    json!("invalid authentication credentials"),
                ),
                CoreError::InvalidAuthenticationToken => {
                    challenge = true;
                    (
                        StatusCode::UNAUTHORIZED,
                        json!("invalid or missing authentication token"),
                    )
                }
                CoreError::AuthenticationRequired => (
                    StatusCode::UNAUTHORIZED,
                    json!("you must be authenticated to access this resource"),
                ),
                CoreError::InactiveAccount => (
                    StatusCode::FORBIDDEN,
                    json!("your user account must be activated to access this resource"),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    server_error()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::Json(err) => (StatusCode::BAD_REQUEST, json!(err.to_string())),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!(msg)),
            AppError::ResourceNotFound => (StatusCode::NOT_FOUND, json!(NOT_FOUND_MESSAGE)),
            AppError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!(format!(
                    "the {method} method is not supported for this resource"
                )),
            ),
            AppError::RequestTimeout => (
                StatusCode::REQUEST_TIMEOUT,
                json!("the server timed out while processing your request"),
            ),
            AppError::Password(err) => {
                tracing::error!(error = %err, "Password hashing error");
                server_error()
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                server_error()
            }
        };

        let mut response = (status, axum::Json(json!({ "error": error }))).into_response();
        if challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

fn server_error() -> (StatusCode, Value) {
    (StatusCode::INTERNAL_SERVER_ERROR, json!(SERVER_ERROR_MESSAGE))
}

/// Classify a sqlx error into an HTTP status and error body.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, Value) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, json!(NOT_FOUND_MESSAGE)),
        other => {
            tracing::error!(error = %other, "Database error");
            server_error()
        }
    }
}
