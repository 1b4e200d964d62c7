//! Actor validation rules.

use chrono::Datelike;

use crate::validator::{unique, Validator};

pub const MAX_NAME_BYTES: usize = 500;

/// Earliest plausible birth year for a screen actor.
pub const MIN_BIRTH_YEAR: i32 = 1850;

pub fn validate_actor(
    v: &mut Validator,
    first_name: &str,
    last_name: &str,
    date_of_birth: Option<i32>,
    movies_casted: &[String],
) {
    v.check(!first_name.is_empty(), "firstName", "must be provided");
    v.check(
        first_name.len() <= MAX_NAME_BYTES,
        "firstName",
        "must not be more than 500 bytes long",
    );
    v.check(!last_name.is_empty(), "lastName", "must be provided");
    v.check(
        last_name.len() <= MAX_NAME_BYTES,
        "lastName",
        "must not be more than 500 bytes long",
    );

    if let Some(year) = date_of_birth {
        v.check(
            year >= MIN_BIRTH_YEAR,
            "dateOfBirth",
            "must be greater than 1850",
        );
        v.check(
            year <= chrono::Utc::now().year(),
            "dateOfBirth",
            "must not be in the future",
        );
    }

    v.check(
        movies_casted.iter().all(|m| !m.is_empty()),
        "moviesCasted",
        "must not contain empty titles",
    );
    v.check(
        unique(movies_casted),
        "moviesCasted",
        "must not contain duplicate values",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn valid_actor_without_optional_fields() {
        let mut v = Validator::new();
        validate_actor(&mut v, "David", "Johnson", None, &[]);
        assert!(v.valid());
    }

    #[test]
    fn names_required() {
        let mut v = Validator::new();
        validate_actor(&mut v, "", "", Some(1970), &titles(&["Titanic"]));
        assert_eq!(v.errors()["firstName"], "must be provided");
        assert_eq!(v.errors()["lastName"], "must be provided");
        assert_eq!(v.errors().len(), 2);
    }

    #[test]
    fn birth_year_bounds() {
        let mut v = Validator::new();
        validate_actor(&mut v, "A", "B", Some(1700), &[]);
        assert_eq!(v.errors()["dateOfBirth"], "must be greater than 1850");

        let mut v = Validator::new();
        validate_actor(&mut v, "A", "B", Some(chrono::Utc::now().year() + 1), &[]);
        assert_eq!(v.errors()["dateOfBirth"], "must not be in the future");
    }

    #[test]
    fn duplicate_movies_rejected() {
        let mut v = Validator::new();
        validate_actor(&mut v, "A", "B", None, &titles(&["Titanic", "Titanic"]));
        assert_eq!(v.errors()["moviesCasted"], "must not contain duplicate values");
    }
}
