//! Versioned export envelope and lenient parsing of external todo data.
//!
//! Export wraps the collection with a timestamp and a format version; parse
//! accepts anything that decodes to an object with a `todos` array, filling
//! in absent ids and timestamps. Parse does **not** run text validation;
//! that is [`TodoStore::import`](crate::store::TodoStore::import)'s job.
//! The two deliberately disagree: `parse` re-keys incomplete records while
//! `import` takes records as-is.

use crate::model::{Todo, DEFAULT_PRIORITY};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Version tag written into every export envelope.
pub const EXPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    todos: &'a [Todo],
    exported_at: DateTime<Utc>,
    version: &'static str,
}

/// Outcome of a successful [`parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExport {
    pub todos: Vec<Todo>,
    pub imported_at: DateTime<Utc>,
    /// `version` field of the envelope, or `"unknown"` if absent.
    pub original_version: String,
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid format: todos array not found")]
    MissingTodos,
}

/// Serialize the collection to the portable export format (indented JSON).
pub fn export(todos: &[Todo]) -> String {
    let envelope = ExportEnvelope {
        todos,
        exported_at: Utc::now(),
        version: EXPORT_VERSION,
    };
    // An envelope of plain data types cannot fail to serialize.
    serde_json::to_string_pretty(&envelope).unwrap_or_default()
}

/// Parse serialized export data back into todos.
///
/// Records that are not JSON objects with a string `text` are dropped;
/// surviving records get a generated id and current timestamps where those
/// fields are absent or unreadable.
pub fn parse(payload: &str) -> Result<ParsedExport, CodecError> {
    let data: Value = serde_json::from_str(payload)?;
    let records = data
        .get("todos")
        .and_then(Value::as_array)
        .ok_or(CodecError::MissingTodos)?;

    let todos = records.iter().filter_map(coerce_record).collect();
    let original_version = data
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    Ok(ParsedExport {
        todos,
        imported_at: Utc::now(),
        original_version,
    })
}

/// Coerce a loose JSON value into a [`Todo`].
///
/// The shape check requires an object carrying a string `text`; everything
/// else is filled from defaults: absent id → fresh uuid, absent or
/// unparseable timestamps → now, absent completed/priority → defaults.
/// Returns `None` when the shape check fails.
pub fn coerce_record(value: &Value) -> Option<Todo> {
    let obj = value.as_object()?;
    let text = obj.get("text")?.as_str()?.to_string();

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let created_at = coerce_timestamp(obj.get("createdAt"));
    let updated_at = coerce_timestamp(obj.get("updatedAt"));
    let completed = obj
        .get("completed")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let priority = obj
        .get("priority")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PRIORITY)
        .to_string();

    Some(Todo {
        id,
        text,
        completed,
        created_at,
        updated_at,
        priority,
    })
}

fn coerce_timestamp(value: Option<&Value>) -> DateTime<Utc> {
    value
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}
