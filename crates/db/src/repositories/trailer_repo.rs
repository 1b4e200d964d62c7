//! Repository for the `trailers` table.

use greenlight_core::filters::Filters;
use sqlx::PgPool;

use super::movie_repo::ListError;
use crate::models::trailer::{CreateTrailer, Trailer};
use crate::models::{split_counted, Counted};

const COLUMNS: &str = "id, trailer_name, duration, premier_date, version";

pub struct TrailerRepo;

impl TrailerRepo {
    /// Insert a new trailer, returning the created row.
    pub async fn insert(pool: &PgPool, input: &CreateTrailer) -> Result<Trailer, sqlx::Error> {
        let query = format!(
            "INSERT INTO trailers (trailer_name, duration, premier_date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trailer>(&query)
            .bind(&input.trailer_name)
            .bind(input.duration)
            .bind(&input.premier_date)
            .fetch_one(pool)
            .await
    }

    /// List one page of trailers whose name matches `trailer_name`
    /// (full-text, English), or all trailers when it is empty.
    pub async fn get_all(
        pool: &PgPool,
        trailer_name: &str,
        filters: &Filters,
    ) -> Result<(Vec<Trailer>, i64), ListError> {
        let query = format!(
            "SELECT count(*) OVER() AS total_records, {COLUMNS}
             FROM trailers
             WHERE (to_tsvector('english', trailer_name) @@ plainto_tsquery('english', $1) OR $1 = '')
             ORDER BY {order_by}
             LIMIT $2 OFFSET $3",
            order_by = filters.order_by()?,
        );
        let rows = sqlx::query_as::<_, Counted<Trailer>>(&query)
            .bind(trailer_name)
            .bind(filters.limit())
            .bind(filters.offset())
            .fetch_all(pool)
            .await?;
        Ok(split_counted(rows))
    }
}
