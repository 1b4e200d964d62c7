//! Pagination and sorting parameters for list endpoints.
//!
//! Sort tokens arrive from the client as `column` (ascending) or `-column`
//! (descending). They are only ever turned into SQL through
//! [`Filters::sort_column`], which refuses anything outside the safelist.

use serde::Serialize;

use crate::error::CoreError;
use crate::validator::{permitted_value, Validator};

// ---------------------------------------------------------------------------
// Pagination bounds
// ---------------------------------------------------------------------------

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE: i64 = 10_000_000;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Sort direction for an `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Requested page, page size and sort order, plus the allowed sort tokens.
#[derive(Debug, Clone)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
    pub sort_safelist: &'static [&'static str],
}

impl Filters {
    /// Column name for `ORDER BY`, with any leading `-` removed.
    ///
    /// Fails when the sort token is not in the safelist, so an unvalidated
    /// value can never reach the query text.
    pub fn sort_column(&self) -> Result<&str, CoreError> {
        if !permitted_value(&self.sort.as_str(), self.sort_safelist) {
            return Err(CoreError::Internal(format!(
                "unsafe sort parameter: {}",
                self.sort
            )));
        }
        Ok(self.sort.trim_start_matches('-'))
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    /// `ORDER BY` body, with `id ASC` as a tie-breaker for stable paging.
    pub fn order_by(&self) -> Result<String, CoreError> {
        let column = self.sort_column()?;
        let direction = self.sort_direction().as_sql();
        if column == "id" {
            Ok(format!("id {direction}"))
        } else {
            Ok(format!("{column} {direction}, id ASC"))
        }
    }
}

/// Report every out-of-range value in `filters` through `v`.
pub fn validate_filters(v: &mut Validator, filters: &Filters) {
    v.check(filters.page > 0, "page", "must be greater than zero");
    v.check(
        filters.page <= MAX_PAGE,
        "page",
        "must be a maximum of 10 million",
    );
    v.check(filters.page_size > 0, "page_size", "must be greater than zero");
    v.check(
        filters.page_size <= MAX_PAGE_SIZE,
        "page_size",
        "must be a maximum of 100",
    );
    v.check(
        permitted_value(&filters.sort.as_str(), filters.sort_safelist),
        "sort",
        "invalid sort value",
    );
}

// ---------------------------------------------------------------------------
// Response metadata
// ---------------------------------------------------------------------------

/// Pagination details returned alongside a list.
///
/// All-zero (the `Default`) when the query matched nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl Metadata {
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records == 0 || page_size <= 0 {
            return Self::default();
        }

        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: (total_records + page_size - 1) / page_size,
            total_records,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const SAFELIST: &[&str] = &["id", "title", "-id", "-title"];

    fn filters(page: i64, page_size: i64, sort: &str) -> Filters {
        Filters {
            page,
            page_size,
            sort: sort.to_string(),
            sort_safelist: SAFELIST,
        }
    }

    fn errors_for(f: &Filters) -> Vec<String> {
        let mut v = Validator::new();
        validate_filters(&mut v, f);
        v.errors().keys().cloned().collect()
    }

    #[test]
    fn default_filters_are_valid() {
        let f = filters(1, 20, "id");
        assert!(errors_for(&f).is_empty());
        assert_eq!(f.offset(), 0);
        assert_eq!(f.limit(), 20);
    }

    #[test]
    fn offset_uses_previous_pages() {
        let f = filters(3, 25, "id");
        assert_eq!(f.offset(), 50);
        assert_eq!(f.limit(), 25);
    }

    #[test]
    fn descending_prefix_is_stripped() {
        let f = filters(1, 20, "-id");
        assert_eq!(f.sort_column().unwrap(), "id");
        assert_eq!(f.sort_direction(), SortDirection::Desc);

        let f = filters(1, 20, "id");
        assert_eq!(f.sort_column().unwrap(), "id");
        assert_eq!(f.sort_direction(), SortDirection::Asc);
    }

    #[test]
    fn sort_outside_safelist_is_rejected() {
        for token in ["name", "-name", "id; DROP TABLE movies", "", "--id", "ID"] {
            let f = filters(1, 20, token);
            assert_eq!(errors_for(&f), vec!["sort"], "token {token:?}");
            assert_matches!(f.sort_column(), Err(CoreError::Internal(_)));
        }
    }

    #[test]
    fn page_size_bounds() {
        for size in [0, -1, -100, 101, 1_000] {
            assert_eq!(errors_for(&filters(1, size, "id")), vec!["page_size"]);
        }
        assert!(errors_for(&filters(1, 1, "id")).is_empty());
        assert!(errors_for(&filters(1, 100, "id")).is_empty());
    }

    #[test]
    fn page_bounds() {
        assert_eq!(errors_for(&filters(0, 20, "id")), vec!["page"]);
        assert_eq!(errors_for(&filters(MAX_PAGE + 1, 20, "id")), vec!["page"]);
        assert!(errors_for(&filters(MAX_PAGE, 20, "id")).is_empty());
    }

    #[test]
    fn every_bad_parameter_is_reported() {
        assert_eq!(
            errors_for(&filters(0, 0, "bogus")),
            vec!["page", "page_size", "sort"]
        );
    }

    #[test]
    fn order_by_adds_id_tie_breaker() {
        assert_eq!(filters(1, 20, "-title").order_by().unwrap(), "title DESC, id ASC");
        assert_eq!(filters(1, 20, "-id").order_by().unwrap(), "id DESC");
    }

    #[test]
    fn metadata_empty_without_records() {
        let m = Metadata::calculate(0, 1, 20);
        assert!(m.is_empty());
    }

    #[test]
    fn metadata_rounds_last_page_up() {
        let m = Metadata::calculate(21, 2, 20);
        assert_eq!(
            m,
            Metadata {
                current_page: 2,
                page_size: 20,
                first_page: 1,
                last_page: 2,
                total_records: 21,
            }
        );

        assert_eq!(Metadata::calculate(40, 1, 20).last_page, 2);
        assert_eq!(Metadata::calculate(1, 1, 20).last_page, 1);
    }
}
