//! Conversion between [`Value`] and `serde_json::Value`.
//!
//! The mapping is structural: tables become objects in key order, datetimes
//! become strings. JSON has no infinities or NaN, so non-finite floats map to
//! `null`; TOML has no null, so reading a JSON `null` is an error.

use crate::{Error, Result, TomlMap, Value};
use serde_json::{Map, Number, Value as JsonValue};

/// Converts a TOML value to a JSON value.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{parse, to_json};
///
/// let root = parse("[server]\nport = 8080\nhosts = [\"a\", \"b\"]").unwrap();
/// assert_eq!(
///     to_json(&root),
///     serde_json::json!({ "server": { "port": 8080, "hosts": ["a", "b"] } })
/// );
/// ```
pub fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::String(s) | Value::Datetime(s) => JsonValue::String(s.clone()),
        Value::Integer(i) => JsonValue::Number(Number::from(*i)),
        Value::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Array(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        Value::Table(table) => {
            let mut object = Map::with_capacity(table.len());
            for (key, item) in table.iter() {
                object.insert(key.clone(), to_json(item));
            }
            JsonValue::Object(object)
        }
    }
}

/// Converts a JSON value to a TOML value.
///
/// Integers that fit `i64` become [`Value::Integer`]; other numbers become
/// [`Value::Float`]. Strings are never promoted to datetimes.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] if `null` appears anywhere in the input.
pub fn from_json(json: &JsonValue) -> Result<Value> {
    match json {
        JsonValue::Null => Err(Error::invalid_value("TOML has no null value")),
        JsonValue::Bool(b) => Ok(Value::Boolean(*b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Integer(i)),
            None => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| Error::invalid_value(&format!("unrepresentable number {}", n))),
        },
        JsonValue::String(s) => Ok(Value::String(s.clone())),
        JsonValue::Array(items) => items
            .iter()
            .map(from_json)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        JsonValue::Object(object) => {
            let mut table = TomlMap::with_capacity(object.len());
            for (key, item) in object {
                table.insert(key.clone(), from_json(item)?);
            }
            Ok(Value::Table(table))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_non_finite_floats_become_null() {
        let json = to_json(&Value::Array(vec![
            Value::Float(f64::INFINITY),
            Value::Float(f64::NAN),
            Value::Float(0.5),
        ]));
        assert_eq!(json, json!([null, null, 0.5]));
    }

    #[test]
    fn test_datetime_becomes_string() {
        let json = to_json(&Value::Datetime("1979-05-27T07:32:00Z".into()));
        assert_eq!(json, json!("1979-05-27T07:32:00Z"));
    }

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(from_json(&json!(-3)).unwrap(), Value::Integer(-3));
        assert_eq!(from_json(&json!(1.25)).unwrap(), Value::Float(1.25));
        assert_eq!(
            from_json(&json!(u64::MAX)).unwrap(),
            Value::Float(u64::MAX as f64)
        );
    }

    #[test]
    fn test_from_json_rejects_nested_null() {
        let err = from_json(&json!({ "a": [1, null] })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_object_order_is_kept() {
        let value = from_json(&json!({ "z": 1, "a": 2, "m": 3 })).unwrap();
        let keys: Vec<&String> = value.as_table().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
