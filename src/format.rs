//! Flat-Path Format Description
//!
//! This module documents the flat key/value line format as implemented by
//! this library.
//!
//! # Overview
//!
//! A flat-path document is plain text, one `key=value` pair per line. Keys
//! are paths: dot-separated segments optionally carrying array indexes. The
//! document as a whole describes a tree of objects, arrays, and scalar
//! values, without any nesting syntax in the text itself.
//!
//! ```text
//! name=demo
//! server.host=db1
//! server.port=5432
//! servers[1].host=a
//! servers[2].host=b
//! ```
//!
//! # Keys
//!
//! A key is split on the configured separator (default `.`) into segments.
//! Each segment is either an object key or an array index:
//!
//! - `servers[2]` — explicit index, wrapped in the configured marker pair
//!   (default `[` `]`). Markers bind tighter than separators: `a[1][2]` is
//!   `a`, index 1, index 2.
//! - `servers.2` — implicit index: a bare all-digit segment, recognized when
//!   `parse_simple_indexes` is enabled (the default).
//! - anything else — an object key.
//!
//! A marker envelope whose interior is not a non-negative integer, such as
//! `[abc]`, is ordinary key text. An opened marker that never closes is a
//! structural error.
//!
//! ## Escaping in keys
//!
//! Literal occurrences of the separator, the escape character, and the
//! marker-open string inside a key segment are protected by the escape
//! character (default `\`):
//!
//! ```text
//! ab\.c=value        one segment with the literal key "ab.c"
//! price\[usd]=10     one segment with the literal key "price[usd]"
//! ```
//!
//! A lone escape character at the end of a segment is literal. With no
//! escape character configured, segmentation is unconditional and segments
//! can never contain the separator.
//!
//! # Values
//!
//! Values are untyped text. Backslash escapes cover line-structure
//! characters: `\n`, `\r`, `\t`, `\f`, `\\`, `\uXXXX` for other code points,
//! and `\ ` protecting a leading space from separator trimming. Unknown
//! escapes drop the backslash and keep the character.
//!
//! Typed bindings parse scalars on demand, so `port=8080` can bind to a
//! string or an integer alike.
//!
//! # Branch values
//!
//! A path can be both a scalar and the prefix of deeper paths:
//!
//! ```text
//! p=first
//! p.b=second
//! ```
//!
//! `p` is then a *branch*: an object whose own value is `first`. The self
//! value always comes before the children during traversal, addressed by the
//! empty key. Writing mirrors this: an empty map key emits its value at the
//! parent path itself.
//!
//! # Arrays
//!
//! On read, indexes may arrive in any order and from any starting offset;
//! elements are sorted ascending once the document is complete. Gaps are
//! tolerated by default (elements are compacted) and rejected in strict
//! mode. Both index spellings are read simultaneously; which one is
//! *written* is a configuration choice:
//!
//! - implicit (default): `p.1.x=1`, `p.2.x=3` — always numbered from 1
//! - markers: `p[3].x=1`, `p[4].x=3` — numbered from `first_array_offset`
//!
//! # Ordering
//!
//! Object children keep first-seen order: the first line that introduces a
//! key fixes the key's position, even if a later line reassigns its value
//! (last write wins for the value, first write wins for the position).
//!
//! # Document surface
//!
//! Blank lines and lines starting with `#` or `!` are ignored. The key/value
//! separator (default `=`), line ending, per-line indentation, a one-shot
//! header, and a document-scoping key prefix are all configurable. Lines
//! outside the configured prefix are skipped on read.
//!
//! # Limitations
//!
//! - Empty objects and arrays produce no lines and therefore do not
//!   round-trip.
//! - All-digit object keys are indistinguishable from implicit indexes;
//!   disable `parse_simple_indexes` when maps use numeric keys.
//! - A branch over an array serializes its self value as the first element.

// This module contains only documentation; no implementation code
