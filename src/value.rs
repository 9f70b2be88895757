//! Dynamic value representation for flat-path documents.
//!
//! This module provides the [`FlatValue`] enum, the tree model a flat
//! document is materialized into before traversal. It is useful for working
//! with documents whose structure isn't known at compile time.
//!
//! ## Core shape
//!
//! - [`FlatValue::Leaf`]: terminal scalar text
//! - [`FlatValue::Object`]: insertion-ordered keyed children
//! - [`FlatValue::Array`]: indexed children, ascending by discovered index
//! - [`FlatValue::Branch`]: a node that received a direct value assignment
//!   *and* has descendants, e.g. from `p=first` followed by `p.x=1`
//!
//! A branch's own value always logically precedes its children during
//! traversal; it is addressed as an empty-string key when the node is bound
//! through serde.
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatpath::{from_str, FlatValue};
//!
//! let value: FlatValue = from_str("name=Alice\nserver.host=db1").unwrap();
//! assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("Alice"));
//!
//! let host = value.get("server").and_then(|s| s.get("host"));
//! assert_eq!(host.and_then(|v| v.as_str()), Some("db1"));
//! ```

use crate::FlatMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed node of a flat-path document tree.
///
/// # Examples
///
/// ```rust
/// use serde_flatpath::{FlatMap, FlatValue};
///
/// let leaf = FlatValue::from("hello");
/// assert!(leaf.is_leaf());
///
/// let mut map = FlatMap::new();
/// map.insert("greeting".to_string(), leaf);
/// let object = FlatValue::Object(map);
/// assert!(object.is_object());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum FlatValue {
    /// Terminal scalar text.
    Leaf(String),
    /// Keyed children in first-seen order.
    Object(FlatMap),
    /// Indexed children in ascending index order.
    Array(Vec<FlatValue>),
    /// A value assignment that is also the prefix of child paths. The
    /// children node is always an `Object` or an `Array`.
    Branch {
        value: String,
        children: Box<FlatValue>,
    },
}

impl Default for FlatValue {
    fn default() -> Self {
        FlatValue::Object(FlatMap::new())
    }
}

impl FlatValue {
    /// Returns `true` if the value is a leaf scalar.
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, FlatValue::Leaf(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, FlatValue::Object(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, FlatValue::Array(_))
    }

    /// Returns `true` if the value is a branch (a scalar with descendants).
    #[inline]
    #[must_use]
    pub const fn is_branch(&self) -> bool {
        matches!(self, FlatValue::Branch { .. })
    }

    /// If the value is a leaf or a branch, returns its scalar text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatpath::FlatValue;
    ///
    /// assert_eq!(FlatValue::from("x").as_str(), Some("x"));
    /// assert_eq!(FlatValue::Array(vec![]).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlatValue::Leaf(s) => Some(s),
            FlatValue::Branch { value, .. } => Some(value),
            _ => None,
        }
    }

    /// If the value is an object (or a branch over an object), returns its
    /// children map.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&FlatMap> {
        match self {
            FlatValue::Object(map) => Some(map),
            FlatValue::Branch { children, .. } => children.as_object(),
            _ => None,
        }
    }

    /// If the value is an array (or a branch over an array), returns its
    /// elements.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<FlatValue>> {
        match self {
            FlatValue::Array(items) => Some(items),
            FlatValue::Branch { children, .. } => children.as_array(),
            _ => None,
        }
    }

    /// Looks up a keyed child, seeing through a branch.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FlatValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up an indexed child, seeing through a branch.
    #[inline]
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&FlatValue> {
        self.as_array().and_then(|items| items.get(index))
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatValue::Leaf(s) => write!(f, "{}", s),
            FlatValue::Object(map) => write!(f, "{{object: {} children}}", map.len()),
            FlatValue::Array(items) => write!(f, "[array: {} elements]", items.len()),
            FlatValue::Branch { value, .. } => write!(f, "{}", value),
        }
    }
}

impl From<String> for FlatValue {
    fn from(value: String) -> Self {
        FlatValue::Leaf(value)
    }
}

impl From<&str> for FlatValue {
    fn from(value: &str) -> Self {
        FlatValue::Leaf(value.to_string())
    }
}

impl From<Vec<FlatValue>> for FlatValue {
    fn from(value: Vec<FlatValue>) -> Self {
        FlatValue::Array(value)
    }
}

impl From<FlatMap> for FlatValue {
    fn from(value: FlatMap) -> Self {
        FlatValue::Object(value)
    }
}

impl Serialize for FlatValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FlatValue::Leaf(s) => serializer.serialize_str(s),
            FlatValue::Object(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    m.serialize_entry(k, v)?;
                }
                m.end()
            }
            FlatValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FlatValue::Branch { value, children } => match children.as_ref() {
                FlatValue::Object(map) => {
                    // self value first, addressed by the empty key
                    let mut m = serializer.serialize_map(Some(map.len() + 1))?;
                    m.serialize_entry("", value)?;
                    for (k, v) in map.iter() {
                        m.serialize_entry(k, v)?;
                    }
                    m.end()
                }
                FlatValue::Array(items) => {
                    let mut seq = serializer.serialize_seq(Some(items.len() + 1))?;
                    seq.serialize_element(value)?;
                    for item in items {
                        seq.serialize_element(item)?;
                    }
                    seq.end()
                }
                _ => Err(serde::ser::Error::custom(
                    "branch children must be an object or an array",
                )),
            },
        }
    }
}

impl<'de> Deserialize<'de> for FlatValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct FlatValueVisitor;

        impl<'de> Visitor<'de> for FlatValueVisitor {
            type Value = FlatValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a flat-path document value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(FlatValue::Leaf(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(FlatValue::Leaf(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(FlatValue::Leaf(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(FlatValue::Leaf(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(FlatValue::Leaf(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(FlatValue::Leaf(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(FlatValue::Leaf(String::new()))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(FlatValue::Leaf(String::new()))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    items.push(elem);
                }
                Ok(FlatValue::Array(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut children = FlatMap::new();
                let mut branch_value: Option<String> = None;
                while let Some((key, value)) = map.next_entry::<String, FlatValue>()? {
                    if key.is_empty() {
                        if let FlatValue::Leaf(text) = value {
                            branch_value = Some(text);
                            continue;
                        }
                    }
                    children.insert(key, value);
                }
                match branch_value {
                    Some(value) => Ok(FlatValue::Branch {
                        value,
                        children: Box::new(FlatValue::Object(children)),
                    }),
                    None => Ok(FlatValue::Object(children)),
                }
            }
        }

        deserializer.deserialize_any(FlatValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let leaf = FlatValue::from("42");
        assert!(leaf.is_leaf());
        assert_eq!(leaf.as_str(), Some("42"));
        assert_eq!(leaf.as_object(), None);

        let mut map = FlatMap::new();
        map.insert("x".to_string(), FlatValue::from("1"));
        let object = FlatValue::Object(map);
        assert!(object.is_object());
        assert_eq!(object.get("x").and_then(|v| v.as_str()), Some("1"));
        assert_eq!(object.get("missing"), None);
    }

    #[test]
    fn branch_sees_through_to_children() {
        let mut map = FlatMap::new();
        map.insert("b".to_string(), FlatValue::from("second"));
        let branch = FlatValue::Branch {
            value: "first".to_string(),
            children: Box::new(FlatValue::Object(map)),
        };

        assert!(branch.is_branch());
        assert_eq!(branch.as_str(), Some("first"));
        assert_eq!(branch.get("b").and_then(|v| v.as_str()), Some("second"));
    }

    #[test]
    fn array_access() {
        let array = FlatValue::Array(vec![FlatValue::from("a"), FlatValue::from("b")]);
        assert_eq!(array.get_index(1).and_then(|v| v.as_str()), Some("b"));
        assert_eq!(array.get_index(2), None);
    }
}
