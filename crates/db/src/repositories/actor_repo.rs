//! Repository for the `actors` table.

use greenlight_core::types::DbId;
use sqlx::PgPool;

use crate::models::actor::{Actor, CreateActor};

const COLUMNS: &str = "id, first_name, last_name, date_of_birth, movies_casted";

pub struct ActorRepo;

impl ActorRepo {
    /// Insert a new actor, returning the created row.
    pub async fn insert(pool: &PgPool, input: &CreateActor) -> Result<Actor, sqlx::Error> {
        let query = format!(
            "INSERT INTO actors (first_name, last_name, date_of_birth, movies_casted)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.date_of_birth)
            .bind(&input.movies_casted)
            .fetch_one(pool)
            .await
    }

    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE id = $1");
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
