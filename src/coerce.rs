//! Default per-kind coercers.
//!
//! Each schema kind owns a coercer that converts a raw [`Value`] into the
//! destination type; these are the defaults, overridable per schema via
//! `with_coercer`. Coercion is deliberately lenient about representation
//! (numeric strings parse, integral floats narrow) and strict about shape.

use crate::error::CoerceError;
use crate::value::{FilePart, Value};

/// The coercion contract every schema consumes: raw value in, typed value
/// or [`CoerceError`] out.
pub type Coercer<T> = Box<dyn Fn(&Value) -> Result<T, CoerceError> + Send + Sync>;

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("string \"{}\"", s),
        other => other.type_name().to_string(),
    }
}

/// Coerces into a string: strings pass through, numbers and booleans
/// format.
pub fn string(value: &Value) -> Result<String, CoerceError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(CoerceError::new("string", describe(other))),
    }
}

/// Coerces into an integer: integers pass through, integral floats narrow,
/// numeric strings parse.
pub fn integer(value: &Value) -> Result<i64, CoerceError> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Float(f) if f.fract() == 0.0 => Ok(*f as i64),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| CoerceError::new("integer", describe(value))),
        other => Err(CoerceError::new("integer", describe(other))),
    }
}

/// Coerces into a float: integers widen, floats pass through, numeric
/// strings parse.
pub fn float(value: &Value) -> Result<f64, CoerceError> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Float(f) => Ok(*f),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoerceError::new("float", describe(value))),
        other => Err(CoerceError::new("float", describe(other))),
    }
}

/// Coerces into a boolean: booleans pass through, `"true"`/`"false"` and
/// `"1"`/`"0"` parse.
pub fn boolean(value: &Value) -> Result<bool, CoerceError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(CoerceError::new("boolean", describe(value))),
        },
        other => Err(CoerceError::new("boolean", describe(other))),
    }
}

/// Coerces into a file part: only [`Value::File`] qualifies.
pub fn file(value: &Value) -> Result<FilePart, CoerceError> {
    match value {
        Value::File(f) => Ok(f.clone()),
        other => Err(CoerceError::new("file", describe(other))),
    }
}

/// Normalizes a raw value into an element list for array parsing.
///
/// Sequences pass through; a bare scalar coerces to a one-element list so
/// single-valued form fields still satisfy array schemas. Maps do not
/// flatten.
pub fn element_list(value: &Value) -> Result<Vec<Value>, CoerceError> {
    match value {
        Value::Seq(items) => Ok(items.clone()),
        Value::Map(_) | Value::Null => Err(CoerceError::new("sequence", describe(value))),
        scalar => Ok(vec![scalar.clone()]),
    }
}
