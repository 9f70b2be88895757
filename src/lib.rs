//! # serde_flatpath
//!
//! A Serde-compatible codec between a flat, line-oriented key/value text
//! format and structured Rust data.
//!
//! ## What is a flat-path document?
//!
//! One key path and one scalar value per line. Paths are dot-separated
//! segments, with array positions written either as bare numbers or inside
//! index markers. The format has no nesting syntax of its own; all structure
//! lives in the keys:
//!
//! ```text
//! name=demo
//! server.host=db1
//! server.port=5432
//! replicas.1=a
//! replicas.2=b
//! ```
//!
//! ## Key Features
//!
//! - **Serde compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **Order preserving**: object keys keep first-seen order and array
//!   elements are reassembled in ascending index order, whatever the line
//!   order of the input
//! - **Branch values**: a path can be both a value and the prefix of deeper
//!   paths (`p=first` + `p.x=1`), as real-world property files require
//! - **Configurable surface**: separator, escape character, index markers,
//!   key prefix, key/value separator, line ending, and more via
//!   [`FlatOptions`]
//! - **Streaming writes**: serialization emits one line per scalar and never
//!   materializes a tree
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_flatpath::{to_string, from_str};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let server = Server {
//!     host: "db1".to_string(),
//!     port: 5432,
//! };
//!
//! let flat = to_string(&server).unwrap();
//! assert_eq!(flat, "host=db1\nport=5432\n");
//!
//! let back: Server = from_str(&flat).unwrap();
//! assert_eq!(server, back);
//! ```
//!
//! ## Nested data
//!
//! ```rust
//! use serde::Serialize;
//! use serde_flatpath::to_string;
//!
//! #[derive(Serialize)]
//! struct Record { x: i32, y: i32 }
//!
//! #[derive(Serialize)]
//! struct Doc { p: Vec<Record> }
//!
//! let doc = Doc { p: vec![Record { x: 1, y: 2 }, Record { x: 3, y: 4 }] };
//! let flat = to_string(&doc).unwrap();
//! assert_eq!(flat, "p.1.x=1\np.1.y=2\np.2.x=3\np.2.y=4\n");
//! ```
//!
//! ## Dynamic values
//!
//! When the structure isn't known at compile time, deserialize into
//! [`FlatValue`] or build one with the [`flat!`] macro:
//!
//! ```rust
//! use serde_flatpath::{from_str, FlatValue};
//!
//! let value: FlatValue = from_str("server.host=db1").unwrap();
//! let host = value.get("server").and_then(|s| s.get("host"));
//! assert_eq!(host.and_then(|v| v.as_str()), Some("db1"));
//! ```
//!
//! ## Reading the format description
//!
//! See the [`format`] module for the full description of keys, escaping,
//! branch values, and array index handling.

pub mod cursor;
pub mod de;
pub mod error;
mod escape;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
mod path;
pub mod ser;
mod tree;
pub mod value;

pub use cursor::{Cursor, Event};
pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::FlatMap;
pub use options::{FlatOptions, IndexMarker};
pub use ser::{FlatValueSerializer, Serializer};
pub use value::FlatValue;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io;

/// Serialize any `T: Serialize` to a flat key/value string.
///
/// # Examples
///
/// ```rust
/// use serde_flatpath::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let flat = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(flat, "x=1\ny=2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (e.g., a map key that
/// is not string-like).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, FlatOptions::default())
}

/// Serialize any `T: Serialize` to a flat key/value string with custom
/// options.
///
/// # Examples
///
/// ```rust
/// use serde_flatpath::{to_string_with_options, FlatOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let options = FlatOptions::new().with_key_prefix("origin");
/// let flat = to_string_with_options(&Point { x: 1, y: 2 }, options).unwrap();
/// assert_eq!(flat, "origin.x=1\norigin.y=2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: FlatOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serialize any `T: Serialize` to a writer as flat key/value lines.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, FlatOptions::default())
}

/// Serialize any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: FlatOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let flat = to_string_with_options(value, options)?;
    writer
        .write_all(flat.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Convert any `T: Serialize` to a [`FlatValue`] tree.
///
/// # Examples
///
/// ```rust
/// use serde_flatpath::{to_value, FlatValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// assert_eq!(value.get("x").and_then(|v| v.as_str()), Some("1"));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<FlatValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(FlatValueSerializer)
}

/// Deserialize an instance of type `T` from flat key/value text.
///
/// The whole document is materialized into one tree before binding begins,
/// so lines may arrive in any order.
///
/// # Examples
///
/// ```rust
/// use serde_flatpath::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("y=2\nx=1").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error on malformed index markers, structural conflicts between
/// keys, or when the data cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, FlatOptions::default())
}

/// Deserialize an instance of type `T` from flat key/value text with custom
/// options.
///
/// # Examples
///
/// ```rust
/// use serde_flatpath::{from_str_with_options, FlatOptions};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let options = FlatOptions::new().with_key_value_separator(": ");
/// let point: Point = from_str_with_options("x: 1\ny: 2", options).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is malformed or cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: FlatOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let tree = de::parse_document(s, &options)?;
    from_value(&tree)
}

/// Deserialize an instance of type `T` from an I/O stream of flat key/value
/// lines.
///
/// # Errors
///
/// Returns an error if reading fails, the input is malformed, or the data
/// cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of flat key/value text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, the input is
/// malformed, or the data cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an already-built [`FlatValue`]
/// tree.
///
/// String fields may borrow from the tree.
///
/// # Examples
///
/// ```rust
/// use serde_flatpath::{flat, from_value};
///
/// let tree = flat!({ "x": 1, "y": 2 });
/// let pair: (i32, i32) = (
///     from_value(tree.get("x").unwrap()).unwrap(),
///     from_value(tree.get("y").unwrap()).unwrap(),
/// );
/// assert_eq!(pair, (1, 2));
/// ```
///
/// # Errors
///
/// Returns an error if the tree cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<'a, T>(value: &'a FlatValue) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_value(value);
    T::deserialize(&mut deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Service {
        name: String,
        port: u16,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn roundtrip_point() {
        let point = Point { x: 1, y: 2 };
        let flat = to_string(&point).unwrap();
        let back: Point = from_str(&flat).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn roundtrip_service() {
        let service = Service {
            name: "ingest".to_string(),
            port: 8080,
            active: true,
            tags: vec!["edge".to_string(), "v2".to_string()],
        };

        let flat = to_string(&service).unwrap();
        assert_eq!(
            flat,
            "name=ingest\nport=8080\nactive=true\ntags.1=edge\ntags.2=v2\n"
        );
        let back: Service = from_str(&flat).unwrap();
        assert_eq!(service, back);
    }

    #[test]
    fn roundtrip_root_sequence() {
        let numbers = vec![1, 2, 3];
        let flat = to_string(&numbers).unwrap();
        assert_eq!(flat, "1=1\n2=2\n3=3\n");
        let back: Vec<i32> = from_str(&flat).unwrap();
        assert_eq!(numbers, back);
    }

    #[test]
    fn to_value_produces_tree() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();
        assert_eq!(value.get("x").and_then(|v| v.as_str()), Some("1"));
        assert_eq!(value.get("y").and_then(|v| v.as_str()), Some("2"));
    }

    #[test]
    fn from_reader_and_slice() {
        let input = b"x=3\ny=4";
        let from_slice: Point = crate::from_slice(input).unwrap();
        let from_reader: Point = crate::from_reader(std::io::Cursor::new(input)).unwrap();
        assert_eq!(from_slice, Point { x: 3, y: 4 });
        assert_eq!(from_reader, from_slice);
    }

    #[test]
    fn writer_output_matches_string() {
        let point = Point { x: 1, y: 2 };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &point).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), to_string(&point).unwrap());
    }
}
