//! Configuration options for flat-path encoding and decoding.
//!
//! This module provides types to customize the key/value line format:
//!
//! - [`FlatOptions`]: Main configuration struct
//! - [`IndexMarker`]: Open/close delimiter pair for explicit array indexes
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatpath::{FlatOptions, IndexMarker, to_string_with_options};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { values: Vec<i32> }
//!
//! let data = Data { values: vec![10, 20] };
//!
//! // Implicit 1-based indexes (default): values.1=10, values.2=20
//! let flat = to_string_with_options(&data, FlatOptions::new()).unwrap();
//! assert_eq!(flat, "values.1=10\nvalues.2=20\n");
//!
//! // Explicit markers, numbered from 0: values[0]=10, values[1]=20
//! let options = FlatOptions::new()
//!     .with_write_index_using_markers(true)
//!     .with_first_array_offset(0);
//! let flat = to_string_with_options(&data, options).unwrap();
//! assert_eq!(flat, "values[0]=10\nvalues[1]=20\n");
//! ```

/// Open/close delimiter pair recognized as an explicit array index.
///
/// The default pair is `[` / `]`, so `servers[2].host` addresses the host of
/// the third server (when numbering from 0). Both sides may be multi-character
/// strings.
///
/// # Examples
///
/// ```rust
/// use serde_flatpath::IndexMarker;
///
/// let marker = IndexMarker::default();
/// assert_eq!(marker.open, "[");
/// assert_eq!(marker.close, "]");
///
/// let angle = IndexMarker::new("<", ">");
/// assert_eq!(angle.open, "<");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexMarker {
    pub open: String,
    pub close: String,
}

impl IndexMarker {
    /// Creates a marker pair from the given open and close strings.
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        IndexMarker {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for IndexMarker {
    fn default() -> Self {
        IndexMarker {
            open: "[".to_string(),
            close: "]".to_string(),
        }
    }
}

/// Configuration options for flat-path encoding and decoding.
///
/// Controls path segmentation, array index handling, escaping, and the
/// surface details of emitted lines. One immutable `FlatOptions` value is
/// supplied per read or write session.
///
/// # Examples
///
/// ```rust
/// use serde_flatpath::FlatOptions;
///
/// // Defaults: "." separator, backslash escaping, "[" "]" markers read but
/// // not written, "=" between key and value
/// let options = FlatOptions::new();
/// assert_eq!(options.path_separator, ".");
/// assert_eq!(options.key_value_separator, "=");
///
/// // Scope the whole document under a prefix and use ": " between key and value
/// let options = FlatOptions::new()
///     .with_key_prefix("server")
///     .with_key_value_separator(": ");
/// ```
#[derive(Clone, Debug)]
pub struct FlatOptions {
    /// Separator between path segments. Empty disables segmentation entirely:
    /// the whole key is a single segment.
    pub path_separator: String,
    /// Escape character protecting literal separator/marker occurrences inside
    /// key segments. `None` makes segmentation unconditional.
    pub separator_escape_char: Option<char>,
    /// Delimiter pair recognized as an explicit array index, e.g. `[2]`.
    pub index_marker: Option<IndexMarker>,
    /// When true, a bare all-digit segment is read as an implicit array index.
    pub parse_simple_indexes: bool,
    /// When true (and a marker is configured), array indexes are written
    /// wrapped in the marker envelope, numbered from `first_array_offset`.
    pub write_index_using_markers: bool,
    /// Index assigned to the first array element in marker-mode writing.
    /// Implicit (marker-less) writing is always numbered from 1.
    pub first_array_offset: u64,
    /// Constant path prefix prepended on write and stripped on read. Lines
    /// outside the prefix are skipped on read.
    pub key_prefix: String,
    /// Text between the key path and the value on each line.
    pub key_value_separator: String,
    /// Line terminator appended after every emitted line.
    pub line_ending: String,
    /// Text emitted at the start of every line.
    pub line_indentation: String,
    /// Text emitted verbatim once, before the first line.
    pub header: Option<String>,
    /// Strict mode: reject arrays whose discovered indexes are not contiguous.
    pub require_contiguous_indexes: bool,
}

impl Default for FlatOptions {
    fn default() -> Self {
        FlatOptions {
            path_separator: ".".to_string(),
            separator_escape_char: Some('\\'),
            index_marker: Some(IndexMarker::default()),
            parse_simple_indexes: true,
            write_index_using_markers: false,
            first_array_offset: 1,
            key_prefix: String::new(),
            key_value_separator: "=".to_string(),
            line_ending: "\n".to_string(),
            line_indentation: String::new(),
            header: None,
            require_contiguous_indexes: false,
        }
    }
}

impl FlatOptions {
    /// Creates the default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatpath::FlatOptions;
    ///
    /// let options = FlatOptions::new();
    /// assert!(options.parse_simple_indexes);
    /// assert!(!options.write_index_using_markers);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path segment separator. An empty separator disables
    /// segmentation: each whole key becomes one segment.
    #[must_use]
    pub fn with_path_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = separator.into();
        self
    }

    /// Sets the escape character for literal separator/marker occurrences
    /// inside key segments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatpath::FlatOptions;
    ///
    /// let options = FlatOptions::new().with_separator_escape_char('^');
    /// assert_eq!(options.separator_escape_char, Some('^'));
    /// ```
    #[must_use]
    pub fn with_separator_escape_char(mut self, escape: char) -> Self {
        self.separator_escape_char = Some(escape);
        self
    }

    /// Disables segment escaping; segments can then never contain the
    /// separator.
    #[must_use]
    pub fn without_separator_escape(mut self) -> Self {
        self.separator_escape_char = None;
        self
    }

    /// Sets the explicit index marker pair.
    #[must_use]
    pub fn with_index_marker(mut self, marker: IndexMarker) -> Self {
        self.index_marker = Some(marker);
        self
    }

    /// Disables explicit index markers on both read and write.
    #[must_use]
    pub fn without_index_marker(mut self) -> Self {
        self.index_marker = None;
        self
    }

    /// Controls whether bare all-digit segments are read as array indexes.
    #[must_use]
    pub fn with_parse_simple_indexes(mut self, enabled: bool) -> Self {
        self.parse_simple_indexes = enabled;
        self
    }

    /// Controls whether array indexes are written in the marker envelope.
    #[must_use]
    pub fn with_write_index_using_markers(mut self, enabled: bool) -> Self {
        self.write_index_using_markers = enabled;
        self
    }

    /// Sets the index of the first array element in marker-mode writing.
    #[must_use]
    pub fn with_first_array_offset(mut self, offset: u64) -> Self {
        self.first_array_offset = offset;
        self
    }

    /// Sets the constant key prefix scoping the document to a subtree.
    #[must_use]
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Sets the text between key path and value.
    #[must_use]
    pub fn with_key_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.key_value_separator = separator.into();
        self
    }

    /// Sets the line terminator.
    #[must_use]
    pub fn with_line_ending(mut self, ending: impl Into<String>) -> Self {
        self.line_ending = ending.into();
        self
    }

    /// Sets the per-line indentation text.
    #[must_use]
    pub fn with_line_indentation(mut self, indentation: impl Into<String>) -> Self {
        self.line_indentation = indentation.into();
        self
    }

    /// Sets a header written verbatim once before the first line.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Enables the strict contiguous-index check for arrays on read.
    #[must_use]
    pub fn with_require_contiguous_indexes(mut self, enabled: bool) -> Self {
        self.require_contiguous_indexes = enabled;
        self
    }
}
