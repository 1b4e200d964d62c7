//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- random one-time tokens stored as SHA-256 hashes.

pub mod password;
pub mod token;
