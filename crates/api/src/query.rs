//! Query string readers for list endpoints.
//!
//! [`QueryValues`] captures the raw `?key=value` pairs. The `read_*` helpers
//! fall back to a default when a key is absent and record malformed values
//! on a [`Validator`] so that every problem is reported in one response.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use greenlight_core::filters::{Filters, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use greenlight_core::validator::Validator;

use crate::error::AppError;

/// Raw query string parameters.
#[derive(Debug, Clone, Default)]
pub struct QueryValues(pub HashMap<String, String>);

impl QueryValues {
    /// The value for `key`, or `default` when absent or empty.
    pub fn read_string(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => default.to_string(),
        }
    }

    /// Comma-separated values for `key`, or `default` when absent or empty.
    pub fn read_csv(&self, key: &str, default: &[&str]) -> Vec<String> {
        match self.0.get(key) {
            Some(value) if !value.is_empty() => {
                value.split(',').map(str::to_string).collect()
            }
            _ => default.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Integer value for `key`, or `default` when absent or empty.
    ///
    /// A value that is not an integer records `must be an integer value`
    /// under `key` and yields `default`.
    pub fn read_int(&self, key: &str, default: i64, v: &mut Validator) -> i64 {
        match self.0.get(key) {
            Some(value) if !value.is_empty() => value.parse().unwrap_or_else(|_| {
                v.add_error(key, "must be an integer value");
                default
            }),
            _ => default,
        }
    }

    /// Read `page`, `page_size` and `sort` into [`Filters`].
    ///
    /// Values are only parsed here; range and safelist checks happen in
    /// [`greenlight_core::filters::validate_filters`].
    pub fn read_filters(
        &self,
        default_sort: &str,
        sort_safelist: &'static [&'static str],
        v: &mut Validator,
    ) -> Filters {
        Filters {
            page: self.read_int("page", DEFAULT_PAGE, v),
            page_size: self.read_int("page_size", DEFAULT_PAGE_SIZE, v),
            sort: self.read_string("sort", default_sort),
            sort_safelist,
        }
    }
}

impl<S> FromRequestParts<S> for QueryValues
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(values) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(QueryValues(values))
    }
}
