//! Ordered map type for TOML tables.
//!
//! [`TomlMap`] wraps [`IndexMap`] so that table keys keep the order in which
//! they appeared in the source. Serializers walk tables in that order, which
//! keeps `to_toml_string` and `to_json` output stable.
//!
//! ## Examples
//!
//! ```rust
//! use serde_toml_lite::{TomlMap, Value};
//!
//! let mut map = TomlMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to TOML values.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{TomlMap, Value};
///
/// let mut map = TomlMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TomlMap(IndexMap<String, crate::Value>);

impl TomlMap {
    /// Creates an empty `TomlMap`.
    #[must_use]
    pub fn new() -> Self {
        TomlMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TomlMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is replaced and
    /// returned. The parser never relies on this: it checks for an existing
    /// key first and reports a duplicate instead.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::Value> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Gets the entry for `key` for in-place inspection or insertion.
    pub fn entry(&mut self, key: String) -> Entry<'_, String, crate::Value> {
        self.0.entry(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for TomlMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        TomlMap(map.into_iter().collect())
    }
}

impl From<TomlMap> for HashMap<String, crate::Value> {
    fn from(map: TomlMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for TomlMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TomlMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for TomlMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        TomlMap(IndexMap::from_iter(iter))
    }
}
