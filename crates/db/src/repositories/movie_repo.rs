//! Repository for the `movies` table.

use greenlight_core::error::CoreError;
use greenlight_core::filters::Filters;
use greenlight_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{CreateMovie, Movie};
use crate::models::{split_counted, Counted};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at, title, year, runtime, genres, version";

/// Errors from a filtered list query: the sort token or the query itself.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    pub async fn insert(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, year, runtime, genres)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(input.year)
            .bind(input.runtime)
            .bind(&input.genres)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by ID.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Write back `movie` and bump its version.
    ///
    /// Only succeeds if the stored version still equals `movie.version`.
    /// Returns `None` when the row was changed or deleted in the meantime.
    pub async fn update(pool: &PgPool, movie: &Movie) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = $3,
                year = $4,
                runtime = $5,
                genres = $6,
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(movie.id)
            .bind(movie.version)
            .bind(&movie.title)
            .bind(movie.year)
            .bind(movie.runtime)
            .bind(&movie.genres)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List one page of movies, returning the page and the total match count.
    ///
    /// An empty `title` matches every title; an empty `genres` list matches
    /// every movie. Otherwise a movie must contain all listed genres.
    pub async fn get_all(
        pool: &PgPool,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, i64), ListError> {
        let query = format!(
            "SELECT count(*) OVER() AS total_records, {COLUMNS}
             FROM movies
             WHERE (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '')
               AND (genres @> $2 OR $2 = '{{}}')
             ORDER BY {order_by}
             LIMIT $3 OFFSET $4",
            order_by = filters.order_by()?,
        );
        let rows = sqlx::query_as::<_, Counted<Movie>>(&query)
            .bind(title)
            .bind(genres)
            .bind(filters.limit())
            .bind(filters.offset())
            .fetch_all(pool)
            .await?;
        Ok(split_counted(rows))
    }
}
