//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers validate input with a [`Validator`](greenlight_core::validator::Validator),
//! delegate to the matching repository in `greenlight_db`, and map failures
//! through [`AppError`](crate::error::AppError).

pub mod actors;
pub mod fallback;
pub mod movies;
pub mod tokens;
pub mod trailers;
pub mod users;
