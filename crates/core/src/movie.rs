//! Movie validation rules and list sorting.

use chrono::Datelike;

use crate::validator::{unique, Validator};

/// Year of the earliest surviving motion picture.
pub const MIN_YEAR: i32 = 1888;

pub const MAX_TITLE_BYTES: usize = 500;

pub const MAX_GENRES: usize = 5;

/// Sort tokens accepted by `GET /v1/movies`.
pub const SORT_SAFELIST: &[&str] = &[
    "id", "title", "year", "runtime", "-id", "-title", "-year", "-runtime",
];

/// Validate the user-editable fields of a movie.
pub fn validate_movie(v: &mut Validator, title: &str, year: i32, runtime: i32, genres: &[String]) {
    v.check(!title.is_empty(), "title", "must be provided");
    v.check(
        title.len() <= MAX_TITLE_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );

    let current_year = chrono::Utc::now().year();
    v.check(year != 0, "year", "must be provided");
    v.check(year >= MIN_YEAR, "year", "must be greater than 1888");
    v.check(year <= current_year, "year", "must not be in the future");

    v.check(runtime != 0, "runtime", "must be provided");
    v.check(runtime > 0, "runtime", "must be a positive integer");

    v.check(!genres.is_empty(), "genres", "must contain at least 1 genre");
    v.check(
        genres.len() <= MAX_GENRES,
        "genres",
        "must not contain more than 5 genres",
    );
    v.check(unique(genres), "genres", "must not contain duplicate values");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn check(title: &str, year: i32, runtime: i32, g: &[&str]) -> Validator {
        let mut v = Validator::new();
        validate_movie(&mut v, title, year, runtime, &genres(g));
        v
    }

    #[test]
    fn valid_movie() {
        let v = check("Casablanca", 1942, 102, &["drama", "romance", "war"]);
        assert!(v.valid(), "{:?}", v.errors());
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let v = check("", 0, 0, &[]);
        let errors = v.errors();
        assert_eq!(errors["title"], "must be provided");
        assert_eq!(errors["year"], "must be provided");
        assert_eq!(errors["runtime"], "must be provided");
        assert_eq!(errors["genres"], "must contain at least 1 genre");
    }

    #[test]
    fn title_length_limit() {
        let long = "x".repeat(MAX_TITLE_BYTES + 1);
        let v = check(&long, 1942, 102, &["drama"]);
        assert_eq!(v.errors()["title"], "must not be more than 500 bytes long");
    }

    #[test]
    fn year_bounds() {
        assert_eq!(
            check("Old", 1800, 10, &["drama"]).errors()["year"],
            "must be greater than 1888"
        );
        let next_year = chrono::Utc::now().year() + 1;
        assert_eq!(
            check("Future", next_year, 10, &["drama"]).errors()["year"],
            "must not be in the future"
        );
    }

    #[test]
    fn negative_runtime() {
        assert_eq!(
            check("Casablanca", 1942, -5, &["drama"]).errors()["runtime"],
            "must be a positive integer"
        );
    }

    #[test]
    fn genre_rules() {
        assert_eq!(
            check("A", 1942, 1, &["a", "b", "c", "d", "e", "f"]).errors()["genres"],
            "must not contain more than 5 genres"
        );
        assert_eq!(
            check("A", 1942, 1, &["drama", "drama"]).errors()["genres"],
            "must not contain duplicate values"
        );
    }
}
