//! Ordered map type for TOML tables.
//!
//! [`TomlMap`] wraps an [`IndexMap`] so that keys keep their insertion order.
//! Parsing inserts keys in document order and the stringifier walks them in the
//! same order, so a parsed document re-serializes with its keys where the author
//! put them.
//!
//! The map also owns the deep-merge operation the grammar uses to fold a run of
//! `key = value` lines into one table.
//!
//! ## Examples
//!
//! ```rust
//! use serde_toml_lite::{TomlMap, TomlValue};
//!
//! let mut map = TomlMap::new();
//! map.insert("name".to_string(), TomlValue::from("Alice"));
//! map.insert("age".to_string(), TomlValue::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::TomlValue;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to TOML values.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{TomlMap, TomlValue};
///
/// let mut map = TomlMap::new();
/// map.insert("first".to_string(), TomlValue::from(1));
/// map.insert("second".to_string(), TomlValue::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TomlMap(IndexMap<String, TomlValue>);

impl TomlMap {
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
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    pub fn insert(&mut self, key: String, value: TomlValue) -> Option<TomlValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TomlValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut TomlValue> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, TomlValue> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, TomlValue> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, TomlValue> {
        self.0.iter()
    }

    /// Recursively merges `other` into `self`.
    ///
    /// Where both sides hold a table under the same key the tables are merged;
    /// any other collision is won by `other`. Arrays are replaced, never
    /// concatenated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::{toml, TomlValue};
    ///
    /// let TomlValue::Table(left) = toml!({ "a": { "b": 1, "c": 2 } }) else { unreachable!() };
    /// let TomlValue::Table(right) = toml!({ "a": { "c": 3 }, "d": 4 }) else { unreachable!() };
    ///
    /// let merged = left.merge(right);
    /// assert_eq!(TomlValue::Table(merged), toml!({ "a": { "b": 1, "c": 3 }, "d": 4 }));
    /// ```
    #[must_use]
    pub fn merge(mut self, other: TomlMap) -> TomlMap {
        for (key, incoming) in other {
            let incoming = match (self.0.get_mut(&key), incoming) {
                (Some(TomlValue::Table(existing)), TomlValue::Table(incoming)) => {
                    let current = std::mem::take(existing);
                    *existing = current.merge(incoming);
                    continue;
                }
                (_, incoming) => incoming,
            };
            self.0.insert(key, incoming);
        }
        self
    }
}

impl From<HashMap<String, TomlValue>> for TomlMap {
    fn from(map: HashMap<String, TomlValue>) -> Self {
        TomlMap(map.into_iter().collect())
    }
}

impl From<TomlMap> for HashMap<String, TomlValue> {
    fn from(map: TomlMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for TomlMap {
    type Item = (String, TomlValue);
    type IntoIter = indexmap::map::IntoIter<String, TomlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TomlMap {
    type Item = (&'a String, &'a TomlValue);
    type IntoIter = indexmap::map::Iter<'a, String, TomlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, TomlValue)> for TomlMap {
    fn from_iter<T: IntoIterator<Item = (String, TomlValue)>>(iter: T) -> Self {
        TomlMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: Vec<(&str, TomlValue)>) -> TomlMap {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_merge_nested_tables() {
        let left = table(vec![("a", TomlValue::Table(table(vec![("b", 1.into())])))]);
        let right = table(vec![("a", TomlValue::Table(table(vec![("c", 2.into())])))]);

        let merged = left.merge(right);
        let inner = merged.get("a").and_then(TomlValue::as_table).unwrap();
        assert_eq!(inner.get("b"), Some(&TomlValue::from(1)));
        assert_eq!(inner.get("c"), Some(&TomlValue::from(2)));
    }

    #[test]
    fn test_merge_right_overrides_leaves() {
        let left = table(vec![("a", 1.into()), ("b", 2.into())]);
        let right = table(vec![("a", "x".into())]);

        let merged = left.merge(right);
        assert_eq!(merged.get("a"), Some(&TomlValue::from("x")));
        assert_eq!(merged.get("b"), Some(&TomlValue::from(2)));
    }

    #[test]
    fn test_merge_replaces_arrays() {
        let left = table(vec![("a", TomlValue::Array(vec![1.into(), 2.into()]))]);
        let right = table(vec![("a", TomlValue::Array(vec![3.into()]))]);

        let merged = left.merge(right);
        assert_eq!(merged.get("a"), Some(&TomlValue::Array(vec![3.into()])));
    }

    #[test]
    fn test_merge_keeps_key_order() {
        let left = table(vec![("a", 1.into()), ("b", 2.into()), ("c", 3.into())]);
        let right = table(vec![("a", 10.into()), ("d", 4.into())]);

        let merged = left.merge(right);
        let keys: Vec<_> = merged.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c", "d"]);
        assert_eq!(merged.get("a"), Some(&TomlValue::from(10)));
    }
}
