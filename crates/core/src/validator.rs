//! Field-level input validation.
//!
//! A [`Validator`] is created per request, fed with checks, and then either
//! inspected with [`Validator::valid`] or converted into a
//! [`CoreError::FailedValidation`] carrying every collected message.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::hash::Hash;

use validator::ValidateEmail;

use crate::error::CoreError;

/// Field name -> error message. Ordered so responses are stable.
pub type ValidationErrors = BTreeMap<String, String>;

/// Accumulates one error message per field.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no errors have been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` for `key` unless that key already has an error.
    ///
    /// The first failure for a field wins.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `key` when `ok` is false.
    pub fn check(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_error(key, message);
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// `Ok(())` when valid, otherwise a [`CoreError::FailedValidation`]
    /// with every recorded error.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.valid() {
            Ok(())
        } else {
            Err(CoreError::FailedValidation(self.errors))
        }
    }
}

/// `true` if `value` is one of `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

/// `true` if every item in `values` is distinct.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}

/// `true` if `value` looks like an email address (HTML5 rules).
pub fn is_email(value: &str) -> bool {
    value.validate_email()
}
