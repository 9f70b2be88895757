//! Path segmentation: splitting a flat key into key and index segments.
//!
//! A key like `servers[2].host` splits into the segments `servers`, index
//! `2`, `host`. Splitting honors the configured separator, escape character
//! and index-marker pair; an all-digit segment is also read as an index when
//! `parse_simple_indexes` is enabled. Marker envelopes may be embedded
//! without separators (`a[1][2]`, `p[2].y`).

use crate::error::{Error, Result};
use crate::escape::unescape_segment;
use crate::options::FlatOptions;

/// One component of a segmented key path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Segment {
    /// A literal object key, already unescaped.
    Key(String),
    /// An array position.
    Index(u64),
}

/// Finds the byte offset of the first occurrence of `needle` in `haystack`
/// that is not preceded by the escape character. An escape character hides
/// the single character following it.
fn find_unescaped(haystack: &str, needle: &str, escape: Option<char>) -> Option<usize> {
    let esc = match escape {
        Some(c) => c,
        None => return haystack.find(needle),
    };
    let mut i = 0;
    while i < haystack.len() {
        let rest = &haystack[i..];
        if let Some(ch) = rest.chars().next() {
            if ch == esc {
                i += ch.len_utf8();
                if let Some(next) = haystack[i..].chars().next() {
                    i += next.len_utf8();
                }
                continue;
            }
            if rest.starts_with(needle) {
                return Some(i);
            }
            i += ch.len_utf8();
        } else {
            break;
        }
    }
    None
}

fn is_simple_index(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

/// Expands one separator-delimited chunk into segments, peeling embedded
/// index-marker envelopes off literal text.
fn expand_chunk(
    chunk: &str,
    path: &str,
    line: usize,
    options: &FlatOptions,
    out: &mut Vec<Segment>,
) -> Result<()> {
    let esc = options.separator_escape_char;
    let marker = options
        .index_marker
        .as_ref()
        .filter(|m| !m.open.is_empty() && !m.close.is_empty());

    let marker = match marker {
        Some(m) => m,
        None => {
            out.push(plain_segment(chunk, options));
            return Ok(());
        }
    };

    let mut rest = chunk;
    let mut pending = String::new();
    let mut saw_marker = false;
    while let Some(pos) = find_unescaped(rest, &marker.open, esc) {
        let before = &rest[..pos];
        let after_open = &rest[pos + marker.open.len()..];
        let close = find_unescaped(after_open, &marker.close, esc)
            .ok_or_else(|| Error::malformed_index_marker(path, line))?;
        let interior = &after_open[..close];
        let tail = &after_open[close + marker.close.len()..];

        if is_simple_index(interior) {
            saw_marker = true;
            pending.push_str(before);
            if !pending.is_empty() {
                out.push(Segment::Key(
                    unescape_segment(&pending, options).into_owned(),
                ));
                pending.clear();
            }
            let index = interior
                .parse::<u64>()
                .map_err(|_| Error::malformed_index_marker(path, line))?;
            out.push(Segment::Index(index));
        } else {
            // a complete envelope with a non-numeric interior is literal text
            pending.push_str(before);
            pending.push_str(&marker.open);
            pending.push_str(interior);
            pending.push_str(&marker.close);
        }
        rest = tail;
    }
    pending.push_str(rest);

    if !pending.is_empty() || !saw_marker {
        if !saw_marker {
            out.push(plain_segment(&pending, options));
        } else {
            out.push(Segment::Key(
                unescape_segment(&pending, options).into_owned(),
            ));
        }
    }
    Ok(())
}

/// Classifies a whole chunk with no recognized marker envelope.
fn plain_segment(raw: &str, options: &FlatOptions) -> Segment {
    if options.parse_simple_indexes && is_simple_index(raw) {
        if let Ok(index) = raw.parse::<u64>() {
            return Segment::Index(index);
        }
    }
    Segment::Key(unescape_segment(raw, options).into_owned())
}

/// Splits a flat key into an ordered sequence of segments.
///
/// `line` is carried for diagnostics only. With an empty separator the whole
/// key is one unescaped segment.
pub(crate) fn split_path(path: &str, options: &FlatOptions, line: usize) -> Result<Vec<Segment>> {
    let sep = options.path_separator.as_str();
    if sep.is_empty() {
        return Ok(vec![Segment::Key(
            unescape_segment(path, options).into_owned(),
        )]);
    }

    let mut segments = Vec::new();
    let mut rest = path;
    loop {
        match find_unescaped(rest, sep, options.separator_escape_char) {
            Some(pos) => {
                expand_chunk(&rest[..pos], path, line, options, &mut segments)?;
                rest = &rest[pos + sep.len()..];
            }
            None => {
                expand_chunk(rest, path, line, options, &mut segments)?;
                break;
            }
        }
    }
    Ok(segments)
}
