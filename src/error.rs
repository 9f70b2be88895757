//! Error types for flat-path serialization and deserialization.
//!
//! All structural errors carry the originating key path and input line so a
//! failing document can be diagnosed without re-parsing it. Structural errors
//! are never retried internally: they describe bad input data, not transient
//! I/O conditions, and abort the current read or write operation. I/O errors
//! from an underlying reader or writer are passed through as [`Error::Io`]
//! without wrapping.
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatpath::{from_str, Error, FlatValue};
//!
//! // `a` cannot be both an object and an array
//! let result: Result<FlatValue, Error> = from_str("a.b=1\na[0]=2");
//! assert!(result.is_err());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding
/// flat-path documents.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// An index marker was opened in a key segment but never closed
    #[error("malformed index marker in key `{path}` at line {line}")]
    MalformedIndexMarker { path: String, line: usize },

    /// A path implies one container kind at a position already committed to another
    #[error("key `{path}` at line {line} requires {requested} but the position already holds {existing}")]
    StructuralConflict {
        path: String,
        line: usize,
        existing: String,
        requested: String,
    },

    /// Strict mode only: an array is missing a contiguous index
    #[error("array at `{path}` has an index gap: expected {expected}, found {found}")]
    ArrayIndexGap {
        path: String,
        expected: u64,
        found: u64,
    },

    /// A `\uXXXX` value escape was cut short or names an invalid code point
    #[error("unterminated or invalid escape sequence at line {line}")]
    UnterminatedEscape { line: usize },

    /// Type mismatch during deserialization
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Unsupported type for serialization
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a malformed-index-marker error for the given key and line.
    pub fn malformed_index_marker(path: &str, line: usize) -> Self {
        Error::MalformedIndexMarker {
            path: path.to_string(),
            line,
        }
    }

    /// Creates a structural conflict error citing the offending key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatpath::Error;
    ///
    /// let err = Error::conflict("a.b", 3, "array", "object");
    /// assert!(err.to_string().contains("a.b"));
    /// ```
    pub fn conflict(path: &str, line: usize, existing: &str, requested: &str) -> Self {
        Error::StructuralConflict {
            path: path.to_string(),
            line,
            existing: existing.to_string(),
            requested: requested.to_string(),
        }
    }

    /// Creates an array-index-gap error (strict mode).
    pub fn index_gap(path: &str, expected: u64, found: u64) -> Self {
        Error::ArrayIndexGap {
            path: path.to_string(),
            expected,
            found,
        }
    }

    /// Creates an unterminated-escape error for the given line.
    pub fn unterminated_escape(line: usize) -> Self {
        Error::UnterminatedEscape { line }
    }

    /// Creates a type mismatch error when deserialization meets an
    /// incompatible shape or an unparsable scalar.
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error for values that cannot be written as
    /// flat lines.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
