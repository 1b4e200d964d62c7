//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- resolves the user behind an `Authorization: Bearer` token.
//! - [`auth::RequireActivated`] -- additionally requires an activated account.

pub mod auth;
