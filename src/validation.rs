//! Schema checks on untrusted request bodies.
//!
//! The raw body is checked for shape first (an object whose fields are present
//! and carry the right JSON types). The field constraints themselves are
//! declared on [`NoteCreateRequest`] and checked with `validator`. A rejected
//! body reports every violated constraint, in schema order.

use serde_json::{Map, Number, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::{FieldViolation, NoteCreateRequest};

pub const TITLE_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Integer,
    String,
}

/// Body fields in schema order: JSON name, struct field, expected type.
const FIELDS: &[(&str, &str, Kind)] = &[
    ("accountId", "account_id", Kind::Integer),
    ("userId", "user_id", Kind::Integer),
    ("title", "title", Kind::String),
    ("content", "content", Kind::String),
];

/// Validates a note creation body and returns the typed request.
pub fn note_create(body: &Value) -> Result<NoteCreateRequest, Vec<FieldViolation>> {
    let Some(fields) = body.as_object() else {
        return Err(vec![FieldViolation::new(
            "",
            format!("Expected object, received {}", type_name(body)),
        )]);
    };

    let mut violations = Vec::new();
    let mut typed = Map::new();

    for (name, _, kind) in FIELDS {
        let value = match check_type(fields.get(*name), *kind) {
            Ok(value) => value,
            Err(message) => {
                violations.push(FieldViolation::new(*name, message));
                // Stand-in that satisfies every constraint, so only
                // well-typed fields are checked below.
                placeholder(*kind)
            }
        };
        typed.insert((*name).to_string(), value);
    }

    let request: NoteCreateRequest = serde_json::from_value(Value::Object(typed))
        .map_err(|e| vec![FieldViolation::new("", e.to_string())])?;

    if let Err(errors) = request.validate() {
        violations.extend(self::violations(&errors));
    }

    if violations.is_empty() {
        return Ok(request);
    }

    violations.sort_by_key(|v| position(&v.path));
    Err(violations)
}

/// Flattens `validator` errors into field violations in schema order.
pub fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let field_errors = errors.field_errors();

    FIELDS
        .iter()
        .flat_map(|(name, field, _)| {
            field_errors
                .get(*field)
                .into_iter()
                .flat_map(|errors| errors.iter())
                .map(move |error| FieldViolation::new(*name, describe(error)))
        })
        .collect()
}

fn position(path: &str) -> usize {
    FIELDS
        .iter()
        .position(|(name, _, _)| *name == path)
        .unwrap_or(usize::MAX)
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "length" => {
            let bound = |key: &str| error.params.get(key).and_then(Value::as_u64);
            let length = error
                .params
                .get("value")
                .and_then(Value::as_str)
                .map(|value| value.chars().count() as u64);

            match (length, bound("min"), bound("max")) {
                (Some(length), Some(min), _) if length < min => {
                    format!("String must contain at least {min} character(s)")
                }
                (Some(length), _, Some(max)) if length > max => {
                    format!("String must contain at most {max} character(s)")
                }
                (None, Some(min), None) => {
                    format!("String must contain at least {min} character(s)")
                }
                _ => "String length is out of range".to_string(),
            }
        }
        code => format!("Invalid value ({code})"),
    }
}

fn check_type(value: Option<&Value>, kind: Kind) -> Result<Value, String> {
    let Some(value) = value else {
        return Err("Required".to_string());
    };

    match (kind, value) {
        (Kind::Integer, Value::Number(number)) => integer(number).map(Value::from),
        (Kind::Integer, other) => Err(format!(
            "Expected number, received {}",
            type_name(other)
        )),
        (Kind::String, Value::String(_)) => Ok(value.clone()),
        (Kind::String, other) => Err(format!(
            "Expected string, received {}",
            type_name(other)
        )),
    }
}

/// Whole numbers written as floats (`3.0`) are accepted.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integer(number: &Number) -> Result<i64, String> {
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }

    let too_large = || format!("Number must be less than or equal to {}", i64::MAX);

    if number.is_u64() {
        return Err(too_large());
    }

    let value = number.as_f64().unwrap_or(f64::NAN);
    if value.fract() != 0.0 {
        return Err("Expected integer, received float".to_string());
    }
    if value >= i64::MAX as f64 {
        return Err(too_large());
    }
    if value < i64::MIN as f64 {
        return Err(format!(
            "Number must be greater than or equal to {}",
            i64::MIN
        ));
    }

    Ok(value as i64)
}

fn placeholder(kind: Kind) -> Value {
    match kind {
        Kind::Integer => Value::from(1),
        Kind::String => Value::from("-"),
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
