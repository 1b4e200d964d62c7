pub mod actor;
pub mod movie;
pub mod token;
pub mod trailer;
pub mod user;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// A row from a list query that also selects `count(*) OVER() AS total_records`.
#[derive(Debug, Clone)]
pub struct Counted<T> {
    pub total_records: i64,
    pub item: T,
}

impl<'r, T> FromRow<'r, PgRow> for Counted<T>
where
    T: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            total_records: row.try_get("total_records")?,
            item: T::from_row(row)?,
        })
    }
}

/// Split counted rows into the items and the total matching record count.
///
/// The total is 0 when the page is empty.
pub fn split_counted<T>(rows: Vec<Counted<T>>) -> (Vec<T>, i64) {
    let total = rows.first().map_or(0, |r| r.total_records);
    (rows.into_iter().map(|r| r.item).collect(), total)
}

pub(crate) fn is_zero(n: &i32) -> bool {
    *n == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_counted_takes_total_from_first_row() {
        let rows = vec![
            Counted { total_records: 7, item: "a" },
            Counted { total_records: 7, item: "b" },
        ];
        let (items, total) = split_counted(rows);
        assert_eq!(items, vec!["a", "b"]);
        assert_eq!(total, 7);
    }

    #[test]
    fn split_counted_empty_page() {
        let (items, total) = split_counted::<i64>(Vec::new());
        assert!(items.is_empty());
        assert_eq!(total, 0);
    }
}
