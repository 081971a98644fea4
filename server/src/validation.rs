//! Field rules shared by create and update.
//!
//! # Design
//! The request body is inspected as a raw `serde_json::Value` instead of a
//! typed payload so every rule runs and reports independently. A body that is
//! missing, not JSON, or not an object behaves like `{}` and fails every rule.
//!
//! Integer fields accept JSON integers, integral floats and strings holding a
//! base-10 integer. Values `u64` cannot hold are rejected, never clamped.
//! The date rule only checks three two-digit groups; the message still
//! advertises a four-digit year.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::model::{ExerciseFields, Unit};

static NULL: Value = Value::Null;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{2}$").expect("date pattern is a valid regex")
});

const NAME_MESSAGE: &str = "Name must be at least 1 character.";
const REPS_MESSAGE: &str = "Reps must be greater than 0";
const WEIGHT_MESSAGE: &str = "Weight must be greater than 0";
const UNIT_MESSAGE: &str = "Units must be kg or lbs";
const DATE_MESSAGE: &str = "Must be in XX-XX-XXXX date format";

/// One violated field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every rule violated by a single request body, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Parse a raw request body and validate it. Only `application/json`
/// bodies are read; any other content type counts as an empty body.
pub fn validate_body(
    content_type: Option<&str>,
    body: &[u8],
) -> Result<ExerciseFields, ValidationErrors> {
    let value = if content_type.is_some_and(is_json) {
        serde_json::from_slice::<Value>(body).unwrap_or(Value::Null)
    } else {
        Value::Null
    };
    validate(&value)
}

fn is_json(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json")
}

/// Check all five field rules against a JSON document.
pub fn validate(body: &Value) -> Result<ExerciseFields, ValidationErrors> {
    let mut errors = Vec::new();

    let name = match field(body, "name").as_str() {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => {
            errors.push(FieldError { field: "name", message: NAME_MESSAGE });
            None
        }
    };

    let reps = positive_int(field(body, "reps"));
    if reps.is_none() {
        errors.push(FieldError { field: "reps", message: REPS_MESSAGE });
    }

    let weight = positive_int(field(body, "weight"));
    if weight.is_none() {
        errors.push(FieldError { field: "weight", message: WEIGHT_MESSAGE });
    }

    let unit = field(body, "unit").as_str().and_then(Unit::parse);
    if unit.is_none() {
        errors.push(FieldError { field: "unit", message: UNIT_MESSAGE });
    }

    let date = match field(body, "date").as_str() {
        Some(s) if DATE_PATTERN.is_match(s) => Some(s.to_string()),
        _ => {
            errors.push(FieldError { field: "date", message: DATE_MESSAGE });
            None
        }
    };

    match (name, reps, weight, unit, date) {
        (Some(name), Some(reps), Some(weight), Some(unit), Some(date)) => Ok(ExerciseFields {
            name,
            reps,
            weight,
            unit,
            date,
        }),
        _ => Err(ValidationErrors { errors }),
    }
}

fn field<'a>(body: &'a Value, name: &str) -> &'a Value {
    body.get(name).unwrap_or(&NULL)
}

/// 2^64: the first float `u64` cannot hold.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

fn positive_int(value: &Value) -> Option<u64> {
    let n = match value {
        Value::Number(n) => match n.as_u64() {
            Some(n) => Some(n),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f < U64_LIMIT)
                .map(|f| f as u64),
        },
        Value::String(s) => parse_int_str(s),
        _ => None,
    }?;
    (n >= 1).then_some(n)
}

fn parse_int_str(s: &str) -> Option<u64> {
    let digits = s.strip_prefix('+').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
