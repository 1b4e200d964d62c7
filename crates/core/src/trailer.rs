//! Trailer validation rules and list sorting.

use chrono::NaiveDate;

use crate::validator::Validator;

pub const MAX_NAME_BYTES: usize = 500;

/// Premiere dates are stored as text in this format.
pub const PREMIER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Sort tokens accepted by `GET /v1/trailers`.
pub const SORT_SAFELIST: &[&str] = &[
    "id",
    "trailer_name",
    "duration",
    "premier_date",
    "-id",
    "-trailer_name",
    "-duration",
    "-premier_date",
];

pub fn validate_trailer(v: &mut Validator, trailer_name: &str, duration: i32, premier_date: &str) {
    v.check(!trailer_name.is_empty(), "trailer_name", "must be provided");
    v.check(
        trailer_name.len() <= MAX_NAME_BYTES,
        "trailer_name",
        "must not be more than 500 bytes long",
    );

    v.check(duration != 0, "duration", "must be provided");
    v.check(duration > 0, "duration", "must be a positive integer");

    v.check(!premier_date.is_empty(), "premier_date", "must be provided");
    v.check(
        NaiveDate::parse_from_str(premier_date, PREMIER_DATE_FORMAT).is_ok(),
        "premier_date",
        "must be a date in YYYY-MM-DD format",
    );
}
