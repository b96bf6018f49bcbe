//! Column extraction
//!
//! Columns are dot paths into the row source
//! `{id, name, location, description, subscription_id}`, followed by an
//! optional transform and a coercion to the column type.

use super::registry::{ColumnDef, ColumnType, Transform};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

/// Look up a value using a dot-notation path; numeric segments index arrays
pub fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = item;

    for part in path.split('.') {
        // Handle array index
        current = match part.parse::<usize>() {
            Ok(idx) if current.is_array() => current.get(idx)?,
            _ => current.get(part)?,
        };
    }

    Some(current)
}

/// Apply a column transform. Non-string inputs pass through untouched.
pub fn apply_transform(transform: Transform, value: Value) -> Value {
    let Value::String(s) = value else {
        return value;
    };

    match transform {
        Transform::Lower => Value::String(s.to_lowercase()),
        Transform::LastPathSegment => {
            Value::String(s.rsplit('/').next().unwrap_or(&s).to_string())
        }
        Transform::IdToAkas => id_to_akas(&s),
    }
}

/// `["azure://{id}", "azure://{lower(id)}"]`
pub fn id_to_akas(id: &str) -> Value {
    json!([format!("azure://{}", id), format!("azure://{}", id.to_lowercase())])
}

/// Coerce an extracted value to a column type.
///
/// Values that cannot be represented in the column type become `null`.
pub fn coerce(column_type: ColumnType, value: Value) -> Value {
    match (column_type, value) {
        (_, Value::Null) => Value::Null,
        (ColumnType::Json, v) => v,

        (ColumnType::String, Value::String(s)) => Value::String(s),
        (ColumnType::String, Value::Number(n)) => Value::String(n.to_string()),
        (ColumnType::String, Value::Bool(b)) => Value::String(b.to_string()),
        (ColumnType::String, v) => Value::String(v.to_string()),

        (ColumnType::Bool, Value::Bool(b)) => Value::Bool(b),
        (ColumnType::Bool, Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Null,
        },

        (ColumnType::Int, Value::Number(n)) => n
            .as_i64()
            .map(Value::from)
            .or_else(|| n.as_f64().map(|f| Value::from(f as i64)))
            .unwrap_or(Value::Null),
        (ColumnType::Int, Value::String(s)) => {
            s.trim().parse::<i64>().map(Value::from).unwrap_or(Value::Null)
        }

        (ColumnType::Double, Value::Number(n)) => {
            n.as_f64().map(Value::from).unwrap_or(Value::Null)
        }
        (ColumnType::Double, Value::String(s)) => {
            s.trim().parse::<f64>().map(Value::from).unwrap_or(Value::Null)
        }

        (ColumnType::Timestamp, Value::String(s)) => normalize_timestamp(&s)
            .map(Value::String)
            .unwrap_or(Value::Null),

        _ => Value::Null,
    }
}

/// RFC 3339 timestamp in UTC, e.g. `2024-01-15T10:30:00Z`
fn normalize_timestamp(s: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Extract, transform and coerce one column from a row source
pub fn column_value(column: &ColumnDef, source: &Value) -> Value {
    let raw = lookup(source, &column.path).cloned().unwrap_or(Value::Null);
    let value = match column.transform {
        Some(transform) => apply_transform(transform, raw),
        None => raw,
    };
    coerce(column.column_type, value)
}
