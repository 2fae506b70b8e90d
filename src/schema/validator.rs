//! Record shape validation
//!
//! Rules:
//! - The document must be a JSON object
//! - `name` is a required string of at least one character
//! - `id`, when present, is a hyphenated UUID string in either letter case,
//!   kept exactly as stored
//! - `description` and `created_at`, when present, are strings
//! - `status`, when present, is `"active"` or `"inactive"`; absent means active
//! - `null` is rejected for every declared field
//! - Undeclared fields are stripped, not rejected
//!
//! All issues are collected before failing, so a client sees every bad
//! field at once. The validator never mutates its input.

use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::record::{Record, Status};

/// Validate a raw document and return the typed record.
///
/// The single validation entry point: the listing filters failures out,
/// the write path turns them into a client error.
pub fn parse_record(document: &Value) -> SchemaResult<Record> {
    let obj = document.as_object().ok_or_else(|| {
        SchemaError::ValidationFailed(vec![ValidationDetails::type_mismatch(
            "$root",
            "object",
            json_type_name(document),
        )])
    })?;

    let mut issues = Vec::new();

    let id = optional_string(obj, "id", &mut issues).and_then(|raw| {
        if is_hyphenated_uuid(raw) {
            Some(raw.to_string())
        } else {
            issues.push(ValidationDetails::new("id", "uuid", format!("'{}'", raw)));
            None
        }
    });

    let name = match obj.get("name") {
        None => {
            issues.push(ValidationDetails::missing_field("name"));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            issues.push(ValidationDetails::new("name", "at least 1 character", "empty string"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(mismatch("name", "string", other));
            None
        }
    };

    let description = optional_string(obj, "description", &mut issues).map(str::to_string);

    let status = match optional_string(obj, "status", &mut issues) {
        None => Status::default(),
        Some(raw) => Status::parse(raw).unwrap_or_else(|| {
            issues.push(ValidationDetails::new(
                "status",
                "one of 'active', 'inactive'",
                format!("'{}'", raw),
            ));
            Status::default()
        }),
    };

    let created_at = optional_string(obj, "created_at", &mut issues).map(str::to_string);

    match name {
        Some(name) if issues.is_empty() => Ok(Record {
            id,
            name,
            description,
            status,
            created_at,
        }),
        _ => Err(SchemaError::ValidationFailed(issues)),
    }
}

/// `8-4-4-4-12` hex groups only; the simple, braced and URN forms are rejected.
fn is_hyphenated_uuid(raw: &str) -> bool {
    raw.len() == 36 && Uuid::try_parse(raw).is_ok()
}

/// Read an optional string field, recording an issue for null or non-strings.
fn optional_string<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    issues: &mut Vec<ValidationDetails>,
) -> Option<&'a str> {
    match obj.get(field) {
        None => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Null) => {
            issues.push(ValidationDetails::null_value(field));
            None
        }
        Some(other) => {
            issues.push(mismatch(field, "string", other));
            None
        }
    }
}

fn mismatch(field: &str, expected: &str, actual: &Value) -> ValidationDetails {
    ValidationDetails::type_mismatch(field, expected, json_type_name(actual))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
