//! Greenlight API server library.
//!
//! Exposes the building blocks (config, state, error handling, JSON codec,
//! routes) so integration tests and the binary entrypoint can both use them.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod json;
pub mod mailer;
pub mod middleware;
pub mod path;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
