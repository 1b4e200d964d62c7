//! Pure domain logic for the greenlight API.
//!
//! Nothing in this crate touches the database or HTTP. It holds the input
//! [`validator::Validator`], pagination and sorting [`filters::Filters`], the
//! per-entity validation rules, and the shared [`error::CoreError`] type.

pub mod actor;
pub mod error;
pub mod filters;
pub mod movie;
pub mod trailer;
pub mod types;
pub mod user;
pub mod validator;
