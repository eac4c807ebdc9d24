//! Mapping between domain models and table rows.

use daily_domain::Model;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::Sqlite;

/// A model stored as one row of one table.
///
/// `COLUMNS` lists every column in storage order with `id` first, and
/// [`Record::values`] must yield values in that same order. Every table carries
/// `created_at` so listings can be ordered consistently.
pub trait Record: Model {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn values(&self) -> Vec<SqlValue>;

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error>;

    fn has_column(column: &str) -> bool {
        Self::COLUMNS.contains(&column)
    }
}

/// A bindable column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
    Bool(bool),
}

impl SqlValue {
    pub(crate) fn bind<'q>(
        self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        match self {
            Self::Null => query.bind(None::<String>),
            Self::Integer(v) => query.bind(v),
            Self::Text(v) => query.bind(v),
            Self::Bool(v) => query.bind(v),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&String> for SqlValue {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
