//! Ordered map type for flat-path objects.
//!
//! This module provides [`FlatMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order for object children. Order matters here: the
//! first input line that introduces a key fixes that key's position, and
//! downstream binding may depend on deterministic ordering (for example
//! positional constructor binding).
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatpath::{FlatMap, FlatValue};
//!
//! let mut map = FlatMap::new();
//! map.insert("name".to_string(), FlatValue::from("Alice"));
//! map.insert("age".to_string(), FlatValue::from("30"));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to flat-path values.
///
/// # Examples
///
/// ```rust
/// use serde_flatpath::{FlatMap, FlatValue};
///
/// let mut map = FlatMap::new();
/// map.insert("first".to_string(), FlatValue::from("1"));
/// map.insert("second".to_string(), FlatValue::from("2"));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatMap(IndexMap<String, crate::FlatValue>);

impl FlatMap {
    /// Creates an empty `FlatMap`.
    #[must_use]
    pub fn new() -> Self {
        FlatMap(IndexMap::new())
    }

    /// Creates an empty `FlatMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FlatMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value if the key was
    /// already present. An existing key keeps its original position.
    pub fn insert(&mut self, key: String, value: crate::FlatValue) -> Option<crate::FlatValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::FlatValue> {
        self.0.get(key)
    }

    /// Removes the value for `key`, preserving the order of the remaining
    /// entries.
    pub fn shift_remove(&mut self, key: &str) -> Option<crate::FlatValue> {
        self.0.shift_remove(key)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::FlatValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::FlatValue> {
        self.0.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::FlatValue> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::FlatValue>> for FlatMap {
    fn from(map: HashMap<String, crate::FlatValue>) -> Self {
        FlatMap(map.into_iter().collect())
    }
}

impl From<FlatMap> for HashMap<String, crate::FlatValue> {
    fn from(map: FlatMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, crate::FlatValue);
    type IntoIter = indexmap::map::IntoIter<String, crate::FlatValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatMap {
    type Item = (&'a String, &'a crate::FlatValue);
    type IntoIter = indexmap::map::Iter<'a, String, crate::FlatValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::FlatValue)> for FlatMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::FlatValue)>>(iter: T) -> Self {
        FlatMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatValue;

    #[test]
    fn insertion_order_is_preserved() {
        let mut map = FlatMap::new();
        map.insert("zebra".to_string(), FlatValue::from("1"));
        map.insert("apple".to_string(), FlatValue::from("2"));
        map.insert("mango".to_string(), FlatValue::from("3"));

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn reinsert_keeps_position() {
        let mut map = FlatMap::new();
        map.insert("b".to_string(), FlatValue::from("1"));
        map.insert("c".to_string(), FlatValue::from("2"));
        let old = map.insert("b".to_string(), FlatValue::from("3"));

        assert_eq!(old, Some(FlatValue::from("1")));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }
}
