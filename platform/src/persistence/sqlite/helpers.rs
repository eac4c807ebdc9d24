//! Shared encode/decode helpers for SQLite ↔ domain type conversions.
//!
//! Timestamps are stored as unix seconds, calendar dates as `YYYY-MM-DD` text
//! and JSON documents as compact text.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::persistence::SqlValue;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn decode_error(column: &str, source: impl Into<sqlx::error::BoxDynError>) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: source.into(),
    }
}

// ── Timestamps ─────────────────────────────────────────────────────────

pub fn encode_timestamp(at: &DateTime<Utc>) -> SqlValue {
    SqlValue::Integer(at.timestamp())
}

pub fn encode_optional_timestamp(at: &Option<DateTime<Utc>>) -> SqlValue {
    at.as_ref().map_or(SqlValue::Null, encode_timestamp)
}

pub fn timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    let secs: i64 = row.try_get(column)?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| decode_error(column, format!("timestamp {secs} out of range")))
}

pub fn optional_timestamp(
    row: &SqliteRow,
    column: &str,
) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    let secs: Option<i64> = row.try_get(column)?;
    secs.map(|secs| {
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| decode_error(column, format!("timestamp {secs} out of range")))
    })
    .transpose()
}

// ── Dates ──────────────────────────────────────────────────────────────

pub fn encode_date(date: &NaiveDate) -> SqlValue {
    SqlValue::Text(date.format(DATE_FORMAT).to_string())
}

pub fn date(row: &SqliteRow, column: &str) -> Result<NaiveDate, sqlx::Error> {
    let text: String = row.try_get(column)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|e| decode_error(column, e))
}

// ── JSON ───────────────────────────────────────────────────────────────

pub fn encode_json(value: &Value) -> SqlValue {
    SqlValue::Text(value.to_string())
}

pub fn json(row: &SqliteRow, column: &str) -> Result<Value, sqlx::Error> {
    let text: String = row.try_get(column)?;
    serde_json::from_str(&text).map_err(|e| decode_error(column, e))
}
