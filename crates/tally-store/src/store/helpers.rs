//! Helper functions for store module

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::path::PathBuf;
use tally_core::UsageRecord;

/// Format a timestamp for storage
///
/// Fixed microsecond precision with a `Z` suffix keeps lexical order equal
/// to chronological order, so range filters can compare strings.
pub(crate) fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Serialization(format!("invalid timestamp '{value}': {e}")))
}

pub(crate) fn to_sql_count(value: u64, field: &str) -> Result<i64> {
    i64::try_from(value)
        .map_err(|_| Error::Serialization(format!("{field} out of range: {value}")))
}

fn from_sql_count(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| Error::Serialization(format!("negative {field} in store: {value}")))
}

/// Convert a SQLite row to a UsageRecord
pub(crate) fn row_to_record(row: SqliteRow) -> Result<UsageRecord> {
    let id: i64 = row.get("id");
    let prompt_tokens: i64 = row.get("prompt_tokens");
    let completion_tokens: i64 = row.get("completion_tokens");
    let total_tokens: i64 = row.get("total_tokens");
    let timestamp_str: String = row.get("timestamp");

    Ok(UsageRecord {
        id: Some(id),
        provider: row.get("provider"),
        model: row.get("model"),
        prompt_tokens: from_sql_count(prompt_tokens, "prompt_tokens")?,
        completion_tokens: from_sql_count(completion_tokens, "completion_tokens")?,
        total_tokens: from_sql_count(total_tokens, "total_tokens")?,
        cost: row.get("cost"),
        timestamp: parse_timestamp(&timestamp_str)?,
        notes: row.get("notes"),
    })
}

/// Get the default data directory for Tally
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".tally"))
        .unwrap_or_else(|| PathBuf::from(".tally"))
}

/// Get the default database path
pub fn default_db_path() -> PathBuf {
    default_data_dir().join("usage.db")
}
