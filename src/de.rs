//! Flat-path deserialization.
//!
//! Reading happens in two stages. First the whole document is materialized
//! into one [`FlatValue`] tree: each line is split into a key path and a
//! value, the path is segmented, and the pair is merged into the tree (input
//! size bounds the memory cost; this is a documented trade-off, not a
//! streaming decoder). Then the [`Deserializer`] drains that tree through a
//! [`Cursor`] event stream to drive any `serde::de::Visitor`.
//!
//! Blank lines and lines starting with `#` or `!` are skipped. A line
//! without the key/value separator is a key with an empty value. Scalars are
//! untyped text; typed deserialization parses them on demand, so `port=8080`
//! binds equally to a `String` or a `u16`.
//!
//! ## Usage
//!
//! ```rust
//! use serde_flatpath::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str("x=1\ny=2").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```

use crate::cursor::{Cursor, Event};
use crate::escape::unescape_value;
use crate::path::split_path;
use crate::tree::TreeBuilder;
use crate::{Error, FlatOptions, FlatValue, Result};
use serde::de::{self, IntoDeserializer};

/// Strips the configured key prefix (plus the following separator) from a
/// key. `None` means the line falls outside the document's subtree and is
/// skipped.
fn strip_key_prefix<'s>(key: &'s str, options: &FlatOptions) -> Option<&'s str> {
    if options.key_prefix.is_empty() {
        return Some(key);
    }
    let rest = key.strip_prefix(options.key_prefix.as_str())?;
    if rest.is_empty() {
        Some(rest)
    } else if options.path_separator.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(options.path_separator.as_str())
    }
}

/// Parses a whole document into its tree model.
pub(crate) fn parse_document(input: &str, options: &FlatOptions) -> Result<FlatValue> {
    let mut builder = TreeBuilder::new();
    for (line_idx, raw_line) in input.lines().enumerate() {
        let line_no = line_idx + 1;
        let raw_line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        // only ASCII blanks are layout; other whitespace is key/value text
        let blank = |c: char| c == ' ' || c == '\t';
        let line = raw_line.trim_start_matches(blank);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let (key, value) = match line.find(options.key_value_separator.as_str()) {
            Some(pos) => (
                &line[..pos],
                &line[pos + options.key_value_separator.len()..],
            ),
            None => (line, ""),
        };
        let key = key.trim_end_matches(blank);
        let value = value.trim_start_matches(blank);

        let key = match strip_key_prefix(key, options) {
            Some(key) => key,
            None => continue,
        };
        let value = unescape_value(value, line_no)?;
        if key.is_empty() {
            // a line with no key addresses the document root itself
            builder.assign_root(value.into_owned());
            continue;
        }
        let segments = split_path(key, options, line_no)?;
        builder.insert(&segments, value.into_owned(), key, line_no)?;
    }
    builder.finish(options)
}

fn unexpected(event: Option<Event<'_>>, expected: &str) -> Error {
    let found = match event {
        Some(event) => event.describe(),
        None => "end of input",
    };
    Error::type_mismatch(expected, found)
}

/// The flat-path deserializer.
///
/// Walks a materialized [`FlatValue`] tree as a structural event stream.
/// Created via [`Deserializer::from_value`]; the `from_str` family in the
/// crate root builds the tree and drives this for you.
pub struct Deserializer<'de> {
    cursor: Cursor<'de>,
    peeked: Option<Event<'de>>,
}

impl<'de> Deserializer<'de> {
    /// Creates a deserializer over an already-built tree.
    #[must_use]
    pub fn from_value(value: &'de FlatValue) -> Self {
        Deserializer {
            cursor: Cursor::new(value),
            peeked: None,
        }
    }

    fn peek(&mut self) -> Option<Event<'de>> {
        if self.peeked.is_none() {
            self.peeked = self.cursor.next_event();
        }
        self.peeked
    }

    fn next(&mut self) -> Option<Event<'de>> {
        self.peeked.take().or_else(|| self.cursor.next_event())
    }

    fn next_scalar(&mut self) -> Result<&'de str> {
        match self.next() {
            Some(Event::Scalar(s)) => Ok(s),
            other => Err(unexpected(other, "a scalar")),
        }
    }

    /// Consumes one complete value: a scalar, or a container with everything
    /// inside it.
    fn skip_value(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.next() {
                None => return Err(unexpected(None, "a value")),
                Some(Event::Scalar(_)) => {
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(Event::StartObject) | Some(Event::StartArray) => depth += 1,
                Some(Event::EndObject) | Some(Event::EndArray) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(Event::Key(_)) => {}
            }
        }
    }
}

macro_rules! deserialize_parsed {
    ($method:ident, $ty:ty, $visit:ident, $expected:expr) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value>
        where
            V: de::Visitor<'de>,
        {
            let s = self.next_scalar()?;
            match s.parse::<$ty>() {
                Ok(v) => visitor.$visit(v),
                Err(_) => Err(Error::type_mismatch($expected, s)),
            }
        }
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.peek() {
            Some(Event::Scalar(_)) => {
                let s = self.next_scalar()?;
                visitor.visit_borrowed_str(s)
            }
            Some(Event::StartObject) => {
                self.next();
                visitor.visit_map(FlatMapAccess { de: self })
            }
            Some(Event::StartArray) => {
                self.next();
                visitor.visit_seq(FlatSeqAccess { de: self })
            }
            other => Err(unexpected(other, "a value")),
        }
    }

    deserialize_parsed!(deserialize_i8, i8, visit_i8, "an integer");
    deserialize_parsed!(deserialize_i16, i16, visit_i16, "an integer");
    deserialize_parsed!(deserialize_i32, i32, visit_i32, "an integer");
    deserialize_parsed!(deserialize_i64, i64, visit_i64, "an integer");
    deserialize_parsed!(deserialize_u8, u8, visit_u8, "an unsigned integer");
    deserialize_parsed!(deserialize_u16, u16, visit_u16, "an unsigned integer");
    deserialize_parsed!(deserialize_u32, u32, visit_u32, "an unsigned integer");
    deserialize_parsed!(deserialize_u64, u64, visit_u64, "an unsigned integer");
    deserialize_parsed!(deserialize_f32, f32, visit_f32, "a number");
    deserialize_parsed!(deserialize_f64, f64, visit_f64, "a number");

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.next_scalar()? {
            "true" => visitor.visit_bool(true),
            "false" => visitor.visit_bool(false),
            other => Err(Error::type_mismatch("a boolean", other)),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let s = self.next_scalar()?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::type_mismatch("a single character", s)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let s = self.next_scalar()?;
        visitor.visit_borrowed_str(s)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // a key that made it into the tree always carries a value; absent
        // keys never reach the deserializer at all
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.skip_value()?;
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.peek() {
            Some(Event::StartArray) => {
                self.next();
                visitor.visit_seq(FlatSeqAccess { de: self })
            }
            other => Err(unexpected(other, "an array")),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.peek() {
            Some(Event::StartObject) => {
                self.next();
                visitor.visit_map(FlatMapAccess { de: self })
            }
            other => Err(unexpected(other, "an object")),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
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
        match self.peek() {
            Some(Event::Scalar(_)) => {
                let s = self.next_scalar()?;
                visitor.visit_enum(s.into_deserializer())
            }
            Some(Event::StartObject) => {
                self.next();
                let variant = match self.next() {
                    Some(Event::Key(key)) => key,
                    other => return Err(unexpected(other, "a variant key")),
                };
                let value = visitor.visit_enum(FlatEnumAccess {
                    de: &mut *self,
                    variant,
                })?;
                match self.next() {
                    Some(Event::EndObject) => Ok(value),
                    other => Err(unexpected(other, "end of the variant object")),
                }
            }
            other => Err(unexpected(other, "an enum")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.skip_value()?;
        visitor.visit_unit()
    }
}

struct FlatMapAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
}

impl<'de> de::MapAccess<'de> for FlatMapAccess<'_, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.de.next() {
            Some(Event::Key(key)) => seed
                .deserialize(de::value::BorrowedStrDeserializer::new(key))
                .map(Some),
            Some(Event::EndObject) => Ok(None),
            other => Err(unexpected(other, "a key")),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        seed.deserialize(&mut *self.de)
    }
}

struct FlatSeqAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
}

impl<'de> de::SeqAccess<'de> for FlatSeqAccess<'_, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.de.peek() {
            Some(Event::EndArray) => {
                self.de.next();
                Ok(None)
            }
            _ => seed.deserialize(&mut *self.de).map(Some),
        }
    }
}

struct FlatEnumAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    variant: &'de str,
}

impl<'de> de::EnumAccess<'de> for FlatEnumAccess<'_, 'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(de::value::BorrowedStrDeserializer::new(self.variant))?;
        Ok((variant, self))
    }
}

impl<'de> de::VariantAccess<'de> for FlatEnumAccess<'_, 'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        self.de.skip_value()
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(&mut *self.de)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(&mut *self.de, visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_map(&mut *self.de, visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let options = FlatOptions::default();
        let tree = parse_document("# comment\n\n! also a comment\na=1\n", &options).unwrap();
        assert_eq!(tree.get("a").and_then(|v| v.as_str()), Some("1"));
        assert_eq!(tree.as_object().map(|m| m.len()), Some(1));
    }

    #[test]
    fn missing_separator_means_empty_value() {
        let options = FlatOptions::default();
        let tree = parse_document("flag", &options).unwrap();
        assert_eq!(tree.get("flag").and_then(|v| v.as_str()), Some(""));
    }

    #[test]
    fn whitespace_around_separator_is_trimmed() {
        let options = FlatOptions::default();
        let tree = parse_document("key = value with spaces\n", &options).unwrap();
        assert_eq!(
            tree.get("key").and_then(|v| v.as_str()),
            Some("value with spaces")
        );
    }

    #[test]
    fn prefix_scopes_the_document() {
        let options = FlatOptions::new().with_key_prefix("app");
        let tree = parse_document("app.name=demo\nother.name=skipped\napp=root\n", &options)
            .unwrap();
        assert_eq!(tree.get("name").and_then(|v| v.as_str()), Some("demo"));
        assert!(tree.get("other").is_none());
        // the bare prefix line addresses the document root itself
        assert!(tree.is_branch());
        assert_eq!(tree.as_str(), Some("root"));
    }

    #[test]
    fn empty_key_assigns_the_root() {
        let options = FlatOptions::default();
        let tree = parse_document("=5\n", &options).unwrap();
        assert_eq!(tree, FlatValue::Leaf("5".to_string()));
    }

    #[test]
    fn crlf_lines_are_handled() {
        let options = FlatOptions::default();
        let tree = parse_document("a=1\r\nb=2\r\n", &options).unwrap();
        assert_eq!(tree.get("b").and_then(|v| v.as_str()), Some("2"));
    }
}
