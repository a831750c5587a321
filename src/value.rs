//! Dynamic value representation for TOML documents.
//!
//! [`Value`] is the tree produced by [`parse`](crate::parse) and consumed by
//! the serializers. It has one variant per TOML kind; tables and arrays own
//! their children outright, so a tree is torn down by ordinary drops.
//!
//! ## Reading a Parsed Document
//!
//! ```rust
//! use serde_toml_lite::parse;
//!
//! let root = parse("[server]\nport = 8080\nname = \"x\"").unwrap();
//! let server = root.get("server").unwrap();
//! assert_eq!(server.get("port").and_then(|v| v.as_integer()), Some(8080));
//! assert_eq!(server.get("name").and_then(|v| v.as_str()), Some("x"));
//!
//! // Lookups never fail loudly: wrong type and missing key both yield `None`.
//! assert!(root.get("nope").is_none());
//! assert!(server.get("port").unwrap().get("x").is_none());
//! ```
//!
//! ## Building Values
//!
//! ```rust
//! use serde_toml_lite::{toml, Value};
//!
//! let value = toml!({ "title": "demo", "ports": [80, 443] });
//! assert_eq!(value.get("ports").and_then(|p| p.get_index(1)), Some(&Value::Integer(443)));
//! ```

use crate::{Error, Result, TomlMap};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of any TOML value.
///
/// Datetimes are kept as the literal text found in the source; use
/// [`Value::parse_datetime`] to interpret offset datetimes on demand.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Datetime(String),
    Array(Vec<Value>),
    Table(TomlMap),
}

impl Default for Value {
    fn default() -> Self {
        Value::Table(TomlMap::new())
    }
}

impl Value {
    /// Looks up `key` when this value is a table.
    ///
    /// Returns `None` both when the key is missing and when `self` is not a
    /// table.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Table(table) => table.get(key),
            _ => None,
        }
    }

    /// Bounds-checked element access when this value is an array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::Value;
    ///
    /// let arr = Value::Array(vec![Value::from(1), Value::from(2)]);
    /// assert_eq!(arr.get_index(1), Some(&Value::Integer(2)));
    /// assert_eq!(arr.get_index(2), None);
    /// assert_eq!(Value::from(1).get_index(0), None);
    /// ```
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Looks up a required key, failing with [`Error::MissingKey`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::{parse, ErrorKind};
    ///
    /// let root = parse("port = 80").unwrap();
    /// assert!(root.require("port").is_ok());
    /// assert_eq!(root.require("host").unwrap_err().kind(), ErrorKind::MissingKey);
    /// ```
    pub fn require(&self, key: &str) -> Result<&Value> {
        self.get(key).ok_or_else(|| Error::missing_key(key))
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn type_str(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Datetime(_) => "datetime",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Value::Datetime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float, widening integers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::Value;
    ///
    /// assert_eq!(Value::Float(0.5).as_float(), Some(0.5));
    /// assert_eq!(Value::Integer(2).as_float(), Some(2.0));
    /// assert_eq!(Value::from("2").as_float(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the literal datetime text.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&str> {
        match self {
            Value::Datetime(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&TomlMap> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Interprets an offset datetime (`1979-05-27T07:32:00-08:00`) with chrono.
    ///
    /// The parser keeps datetimes as opaque text; this is the only place they
    /// are validated. Local dates and times, which carry no offset, return
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::parse;
    ///
    /// let root = parse("at = 1979-05-27 07:32:00Z\nday = 1979-05-27").unwrap();
    /// let at = root.get("at").and_then(|v| v.parse_datetime()).unwrap();
    /// assert_eq!(at.timestamp(), 296_638_320);
    /// assert!(root.get("day").and_then(|v| v.parse_datetime()).is_none());
    /// ```
    #[must_use]
    pub fn parse_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let text = self.as_datetime()?;
        let normalized = match text.as_bytes().get(10) {
            Some(b' ') | Some(b't') => format!("{}T{}", &text[..10], &text[11..]),
            _ => text.to_string(),
        };
        DateTime::parse_from_rfc3339(&normalized).ok()
    }

    /// Renders this value as TOML-like text.
    ///
    /// A root table becomes one `key = value` line per entry; nested tables
    /// are written inline. The output is lossy: section headers, comments and
    /// string escapes other than `\"` are not reproduced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::parse;
    ///
    /// let root = parse("[server]\nport = 8080").unwrap();
    /// assert_eq!(root.to_toml_string(), "server = { port = 8080 }\n");
    /// ```
    #[must_use]
    pub fn to_toml_string(&self) -> String {
        crate::ser::TomlWriter::render(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_toml_string())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) | Value::Datetime(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Array(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Table(table) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (k, v) in table.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Unexpected, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any TOML-compatible value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(Value::Integer(i)),
                    Err(_) => Ok(Value::Float(value as f64)),
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E>
            where
                E: de::Error,
            {
                Err(E::invalid_type(Unexpected::Unit, &self))
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E>
            where
                E: de::Error,
            {
                Err(E::invalid_type(Unexpected::Option, &self))
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = TomlMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Table(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(Error::invalid_value(&format!(
                "expected integer, found {}",
                other.type_str()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Integer(i) => Ok(i as f64),
            other => Err(Error::invalid_value(&format!(
                "expected float, found {}",
                other.type_str()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(Error::invalid_value(&format!(
                "expected boolean, found {}",
                other.type_str()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) | Value::Datetime(s) => Ok(s),
            other => Err(Error::invalid_value(&format!(
                "expected string, found {}",
                other.type_str()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<TomlMap> for Value {
    fn from(value: TomlMap) -> Self {
        Value::Table(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_on_non_table_is_none() {
        assert_eq!(Value::Integer(1).get("a"), None);
        assert_eq!(Value::Array(vec![]).get("a"), None);
        let mut table = TomlMap::new();
        table.insert("a".to_string(), Value::Integer(1));
        let value = Value::Table(table);
        assert_eq!(value.get("a"), Some(&Value::Integer(1)));
        assert_eq!(value.get("b"), None);
    }

    #[test]
    fn test_tryfrom() {
        assert_eq!(i64::try_from(Value::Integer(42)).unwrap(), 42);
        assert!(i64::try_from(Value::Float(42.0)).is_err());
        assert_eq!(f64::try_from(Value::Integer(2)).unwrap(), 2.0);
        assert!(bool::try_from(Value::Boolean(true)).unwrap());
        assert!(bool::try_from(Value::Integer(1)).is_err());
        assert_eq!(String::try_from(Value::from("hi")).unwrap(), "hi");
        assert!(String::try_from(Value::Integer(1)).is_err());
    }

    #[test]
    fn test_type_str() {
        assert_eq!(Value::Datetime("1979-05-27".into()).type_str(), "datetime");
        assert_eq!(Value::default().type_str(), "table");
    }

    #[test]
    fn test_parse_datetime_offset_forms() {
        let utc = Value::Datetime("1979-05-27T07:32:00Z".to_string());
        let shifted = Value::Datetime("1979-05-27T00:32:00-07:00".to_string());
        assert_eq!(utc.parse_datetime(), shifted.parse_datetime());
        assert!(Value::Datetime("07:32:00".to_string())
            .parse_datetime()
            .is_none());
        assert!(Value::from("1979-05-27T07:32:00Z").parse_datetime().is_none());
    }

    #[test]
    fn test_deserialize_rejects_null() {
        let err = serde_json::from_str::<Value>("null").unwrap_err();
        assert!(err.to_string().contains("TOML-compatible"));
    }
}
