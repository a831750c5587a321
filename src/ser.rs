//! TOML serialization.
//!
//! Two pieces live here:
//!
//! - [`TomlWriter`] renders a [`Value`] as flat, TOML-like text. The root
//!   table becomes one `key = value` line per entry and nested tables are
//!   written inline, so `[section]` headers never appear in the output.
//! - [`ValueSerializer`] turns any `T: Serialize` into a [`Value`]. TOML has
//!   no null, so `None` and unit fields of structs and maps are dropped, while
//!   a null at the root or inside an array is an invalid value.
//!
//! ## Usage
//!
//! ```rust
//! use serde_toml_lite::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Server { host: String, port: u16, tags: Vec<&'static str> }
//!
//! let server = Server { host: "localhost".into(), port: 8080, tags: vec!["a", "b"] };
//! assert_eq!(
//!     to_string(&server).unwrap(),
//!     "host = \"localhost\"\nport = 8080\ntags = [\"a\", \"b\"]\n"
//! );
//! ```

use crate::{Error, Result, TomlMap, Value};
use serde::{ser, Serialize};

/// Renders values as lossy TOML-like text.
pub struct TomlWriter {
    output: String,
}

impl TomlWriter {
    pub fn new() -> Self {
        TomlWriter {
            output: String::with_capacity(256),
        }
    }

    /// Renders `value`; a table is written as a document of `key = value` lines.
    pub fn render(value: &Value) -> String {
        let mut writer = TomlWriter::new();
        match value {
            Value::Table(table) => writer.write_document(table),
            other => writer.write_value(other),
        }
        writer.into_inner()
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn write_document(&mut self, table: &TomlMap) {
        for (key, value) in table.iter() {
            self.write_key(key);
            self.output.push_str(" = ");
            self.write_value(value);
            self.output.push('\n');
        }
    }

    fn write_value(&mut self, value: &Value) {
        match value {
            Value::String(s) => self.write_string(s),
            Value::Integer(i) => self.output.push_str(&i.to_string()),
            Value::Float(f) => self.write_float(*f),
            Value::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Datetime(s) => self.output.push_str(s),
            Value::Array(items) => {
                self.output.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_value(item);
                }
                self.output.push(']');
            }
            Value::Table(table) => {
                if table.is_empty() {
                    self.output.push_str("{}");
                    return;
                }
                self.output.push_str("{ ");
                for (i, (key, item)) in table.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_key(key);
                    self.output.push_str(" = ");
                    self.write_value(item);
                }
                self.output.push_str(" }");
            }
        }
    }

    fn write_key(&mut self, key: &str) {
        let bare = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        if bare {
            self.output.push_str(key);
        } else {
            self.write_string(key);
        }
    }

    /// Only `"` is escaped; other characters are written as they are.
    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            if ch == '"' {
                self.output.push_str("\\\"");
            } else {
                self.output.push(ch);
            }
        }
        self.output.push('"');
    }

    /// Floats always carry a `.` or exponent so they read back as floats.
    fn write_float(&mut self, f: f64) {
        if f.is_nan() {
            self.output.push_str("nan");
        } else if f.is_infinite() {
            self.output.push_str(if f > 0.0 { "inf" } else { "-inf" });
        } else {
            self.output.push_str(&format!("{:?}", f));
        }
    }
}

impl Default for TomlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes Rust values into [`Value`] trees.
///
/// The output is `None` for values that have no TOML representation (`None`,
/// `()`, unit structs); containers decide whether that is an error.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: TomlMap,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

/// Converts a non-null value, as required for array elements.
fn to_element<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value
        .serialize(ValueSerializer)?
        .ok_or_else(|| Error::invalid_value("arrays cannot contain null values"))
}

/// Wraps enum payloads in a single-key table, `{ variant = payload }`.
fn tag(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(name) => {
            let mut table = TomlMap::with_capacity(1);
            table.insert(name.to_string(), value);
            Value::Table(table)
        }
        None => value,
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Option<Value>> {
        Ok(Some(Value::Boolean(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Option<Value>> {
        Ok(Some(Value::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Option<Value>> {
        i64::try_from(v)
            .map(|i| Some(Value::Integer(i)))
            .map_err(|_| Error::invalid_value(&format!("integer {} exceeds i64 range", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Option<Value>> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Option<Value>> {
        Ok(Some(Value::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Option<Value>> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Option<Value>> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Option<Value>> {
        let vec = v.iter().map(|&b| Value::Integer(i64::from(b))).collect();
        Ok(Some(Value::Array(vec)))
    }

    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<Value>> {
        Ok(Some(Value::String(variant.to_string())))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        let payload = value
            .serialize(ValueSerializer)?
            .ok_or_else(|| Error::invalid_value("enum payload cannot be null"))?;
        Ok(Some(tag(Some(variant), payload)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_element(value)?);
        Ok(())
    }

    fn finish(self) -> Result<Option<Value>> {
        Ok(Some(tag(self.variant, Value::Array(self.vec))))
    }
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: TomlMap::new(),
            current_key: None,
            variant,
        }
    }

    /// Null fields are dropped rather than rejected.
    fn field<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(value) = value.serialize(ValueSerializer)? {
            self.map.insert(key, value);
        }
        Ok(())
    }

    fn finish(self) -> Result<Option<Value>> {
        Ok(Some(tag(self.variant, Value::Table(self.map))))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Some(Value::String(s)) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::invalid_value("table keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.field(key, value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}
