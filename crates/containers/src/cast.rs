//! Explicit coercion policy for type-restricted lists
//!
//! `cast` is a pure function from (target type, value) to the coerced value.
//! Each allowed conversion is spelled out; everything else fails.
//!
//! | Target | Allowed sources | Rejected with `CastError` |
//! |--------|-----------------|---------------------------|
//! | boolean | everything (truthiness) | none |
//! | integer | bool, double, numeric string, null | array, object, resource, non-numeric string, non-finite double |
//! | double | integer, numeric string, null | boolean, array, object, resource, non-numeric string |
//! | string | bool, integer, double, null | array, object, resource |
//!
//! Array, object and resource targets are not castable; mismatches against
//! them fail with `TypeMismatch`.

use collection_core::{is_numeric, ElementType, Error, Result, Value};

/// Coerce `value` into `target`
///
/// Values already of the target type are returned unchanged.
pub fn cast(target: ElementType, value: Value) -> Result<Value> {
    if value.is_of(target) {
        return Ok(value);
    }

    match target {
        ElementType::Boolean => Ok(Value::Bool(value.is_truthy())),
        ElementType::Integer => to_integer(&value).map(Value::Int),
        ElementType::Double => to_double(&value).map(Value::Float),
        ElementType::String => to_text(&value).map(Value::String),
        ElementType::Any => Ok(value),
        ElementType::Array | ElementType::Object | ElementType::Resource => {
            Err(Error::TypeMismatch {
                expected: target.name(),
                actual: value.type_name(),
            })
        }
    }
}

fn cast_error(value: &Value, target: ElementType) -> Error {
    Error::CastError {
        from: value.type_name(),
        to: target.name(),
    }
}

fn to_integer(value: &Value) -> Result<i64> {
    match value {
        Value::Null => Ok(0),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Int(i) => Ok(*i),
        Value::Float(f) => truncate(*f).ok_or_else(|| cast_error(value, ElementType::Integer)),
        Value::String(s) => parse_numeric(s)
            .and_then(|n| match n {
                Numeric::Int(i) => Some(i),
                Numeric::Float(f) => truncate(f),
            })
            .ok_or_else(|| cast_error(value, ElementType::Integer)),
        Value::Array(_) | Value::Object(_) | Value::Resource(_) => {
            Err(cast_error(value, ElementType::Integer))
        }
    }
}

fn to_double(value: &Value) -> Result<f64> {
    match value {
        Value::Null => Ok(0.0),
        Value::Int(i) => Ok(*i as f64),
        Value::Float(f) => Ok(*f),
        Value::String(s) => parse_numeric(s)
            .map(|n| match n {
                Numeric::Int(i) => i as f64,
                Numeric::Float(f) => f,
            })
            .ok_or_else(|| cast_error(value, ElementType::Double)),
        // true -> 1.0 carries no meaning
        Value::Bool(_) => Err(cast_error(value, ElementType::Double)),
        Value::Array(_) | Value::Object(_) | Value::Resource(_) => {
            Err(cast_error(value, ElementType::Double))
        }
    }
}

fn to_text(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(true) => Ok("1".to_string()),
        Value::Bool(false) => Ok(String::new()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(format_float(*f)),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) | Value::Resource(_) => {
            Err(cast_error(value, ElementType::String))
        }
    }
}

enum Numeric {
    Int(i64),
    Float(f64),
}

fn parse_numeric(s: &str) -> Option<Numeric> {
    if !is_numeric(s) {
        return None;
    }
    let trimmed = s.trim();
    match trimmed.parse::<i64>() {
        Ok(i) => Some(Numeric::Int(i)),
        Err(_) => trimmed.parse::<f64>().ok().map(Numeric::Float),
    }
}

fn truncate(f: f64) -> Option<i64> {
    let t = f.trunc();
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

/// Shortest string form; integral values print without a fraction
fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NAN".to_string()
    } else if f.is_infinite() {
        let repr = if f > 0.0 { "INF" } else { "-INF" };
        repr.to_string()
    } else if f == f.trunc() && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}
