//! Deserialization from [`Value`] trees.
//!
//! Text is parsed by [`crate::Parser`] first; this module only walks the
//! resulting tree and feeds it to a Serde visitor.
//!
//! ## Usage
//!
//! ```rust
//! use serde_toml_lite::{from_value, parse};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, tags: Vec<String> }
//!
//! let root = parse("x = 1\ntags = [\"a\"]").unwrap();
//! let data: Data = from_value(root).unwrap();
//! assert_eq!(data, Data { x: 1, tags: vec!["a".into()] });
//! ```
//!
//! ## Mapping
//!
//! - Datetimes are handed to visitors as their source text.
//! - TOML has no null: `Option` fields are `Some` when present and `None`
//!   when the key is absent.
//! - Enums are read from a string (unit variants) or a single-key table
//!   `{ Variant = payload }`.

use crate::{Error, Result, TomlMap, Value};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// A Serde deserializer over an owned [`Value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) | Value::Datetime(s) => visitor.visit_string(s),
            Value::Integer(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Boolean(b) => visitor.visit_bool(b),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Table(table) => {
                let mut iter = table.into_iter();
                match (iter.next(), iter.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(Error::invalid_value(
                        "enum table must have exactly one key naming the variant",
                    )),
                }
            }
            other => Err(Error::invalid_value(&format!(
                "expected enum, found {}",
                other.type_str()
            ))),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(self)
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(table: TomlMap) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Table(table) if table.is_empty() => Ok(()),
            _ => Err(Error::invalid_value("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::invalid_value("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            _ => Err(Error::invalid_value("expected struct variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{from_str, ErrorKind};
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Database {
        url: String,
        pool: Option<u32>,
        replicas: Option<Vec<String>>,
    }

    #[test]
    fn test_optional_fields() {
        let db: Database = from_str("url = \"pg://\"\npool = 5").unwrap();
        assert_eq!(
            db,
            Database {
                url: "pg://".into(),
                pool: Some(5),
                replicas: None,
            }
        );
    }

    #[test]
    fn test_integer_narrowing_is_checked() {
        #[derive(Deserialize, Debug)]
        struct Small {
            #[allow(dead_code)]
            n: u8,
        }
        let err = from_str::<Small>("n = 300").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        let err = from_str::<Small>("n = \"x\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_datetime_into_string_field() {
        #[derive(Deserialize)]
        struct Stamp {
            at: String,
        }
        let stamp: Stamp = from_str("at = 1979-05-27T07:32:00Z").unwrap();
        assert_eq!(stamp.at, "1979-05-27T07:32:00Z");
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Mode {
        Fast,
        Limited(u32),
        Window { w: i64, h: i64 },
    }

    #[test]
    fn test_enum_forms() {
        let modes: HashMap<String, Mode> =
            from_str("a = \"Fast\"\nb = { Limited = 3 }\nc.Window = { w = 1, h = 2 }").unwrap();
        assert_eq!(modes["a"], Mode::Fast);
        assert_eq!(modes["b"], Mode::Limited(3));
        assert_eq!(modes["c"], Mode::Window { w: 1, h: 2 });
    }

    #[test]
    fn test_enum_table_with_two_keys() {
        let err = from_str::<HashMap<String, Mode>>("a = { Fast = {}, Limited = 1 }").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_array_of_tables_into_vec() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Product {
            name: String,
            sku: i64,
        }
        #[derive(Deserialize)]
        struct Catalog {
            products: Vec<Product>,
        }
        let catalog: Catalog = from_str(
            "[[products]]\nname = \"Hammer\"\nsku = 1\n\n[[products]]\nname = \"Nail\"\nsku = 2\n",
        )
        .unwrap();
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.products[1].name, "Nail");
    }
}
