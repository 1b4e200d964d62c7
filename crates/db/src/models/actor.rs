//! Actor entity model and DTOs.

use greenlight_core::types::DbId;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Full row from the `actors` table. Serialized with camelCase keys.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    /// Year of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub movies_casted: Vec<String>,
}

/// Request body for creating an actor.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateActor {
    pub first_name: String,
    pub last_name: String,
    /// `0` and `null` both mean "not given".
    #[serde(deserialize_with = "zero_as_none")]
    pub date_of_birth: Option<i32>,
    pub movies_casted: Vec<String>,
}

fn zero_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.filter(|year| *year != 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_round_trip() {
        let input: CreateActor = serde_json::from_str(
            r#"{"firstName": "David", "lastName": "Johnson", "moviesCasted": ["Titanic"]}"#,
        )
        .unwrap();
        assert_eq!(input.first_name, "David");
        assert_eq!(input.date_of_birth, None);

        let actor = Actor {
            id: 3,
            first_name: input.first_name,
            last_name: input.last_name,
            date_of_birth: input.date_of_birth,
            movies_casted: input.movies_casted,
        };
        let json = serde_json::to_value(actor).unwrap();
        assert_eq!(json["lastName"], "Johnson");
        assert_eq!(json["moviesCasted"][0], "Titanic");
        assert!(json.get("dateOfBirth").is_none());
    }

    #[test]
    fn zero_birth_year_means_absent() {
        for body in [
            r#"{"firstName": "Ada", "lastName": "Lovelace", "dateOfBirth": 0}"#,
            r#"{"firstName": "Ada", "lastName": "Lovelace", "dateOfBirth": null}"#,
            r#"{"firstName": "Ada", "lastName": "Lovelace"}"#,
        ] {
            let input: CreateActor = serde_json::from_str(body).unwrap();
            assert_eq!(input.date_of_birth, None, "{body}");
        }

        let input: CreateActor =
            serde_json::from_str(r#"{"firstName": "Ada", "lastName": "L", "dateOfBirth": 1815}"#)
                .unwrap();
        assert_eq!(input.date_of_birth, Some(1815));
    }
}
