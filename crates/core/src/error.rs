use crate::types::DbId;
use crate::validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed for {} field(s)", .0.len())]
    FailedValidation(ValidationErrors),

    #[error("Edit conflict")]
    EditConflict,

    #[error("Invalid authentication credentials")]
    InvalidCredentials,

    #[error("Invalid or missing authentication token")]
    InvalidAuthenticationToken,

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Inactive account")]
    InactiveAccount,

    #[error("Internal error: {0}")]
    Internal(String),
}
