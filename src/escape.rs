//! Escaping for key segments and scalar values.
//!
//! Key segments and values use two independent escape sets. Segment escaping
//! protects the configured path separator, the escape character itself, and
//! the index-marker open string, so that a literal key like `ab.c` survives
//! segmentation as one segment (`ab\.c`). Value escaping is the richer
//! properties-style set (`\n`, `\t`, `\uXXXX`, ...) and needs no separator
//! awareness because values are never segmented.
//!
//! Both directions return [`Cow`] so the common no-escape case costs no
//! allocation. A lone escape character at end of input is a literal character
//! on both read and write.

use crate::error::{Error, Result};
use crate::options::FlatOptions;
use std::borrow::Cow;

/// Escapes a literal key segment so it survives path segmentation.
///
/// Inserts the configured escape character before every occurrence of the
/// path separator, the escape character itself, and the index-marker open
/// string. With no escape character configured the segment is returned
/// unchanged; the caller must then guarantee it contains no separator.
pub(crate) fn escape_segment<'a>(raw: &'a str, options: &FlatOptions) -> Cow<'a, str> {
    let esc = match options.separator_escape_char {
        Some(c) => c,
        None => return Cow::Borrowed(raw),
    };
    let sep = options.path_separator.as_str();
    let open = options
        .index_marker
        .as_ref()
        .map(|m| m.open.as_str())
        .filter(|o| !o.is_empty());

    let needs_escaping = (!sep.is_empty() && raw.contains(sep))
        || raw.contains(esc)
        || open.is_some_and(|o| raw.contains(o));
    if !needs_escaping {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len() + 4);
    let mut rest = raw;
    while let Some(ch) = rest.chars().next() {
        if !sep.is_empty() && rest.starts_with(sep) {
            out.push(esc);
            out.push_str(sep);
            rest = &rest[sep.len()..];
        } else if let Some(o) = open.filter(|o| rest.starts_with(o)) {
            out.push(esc);
            out.push_str(o);
            rest = &rest[o.len()..];
        } else if ch == esc {
            out.push(esc);
            out.push(esc);
            rest = &rest[ch.len_utf8()..];
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    Cow::Owned(out)
}

/// Removes one escape character before each escaped separator, marker-open or
/// escape-character occurrence. Escapes before anything else are kept
/// literally, as is a trailing escape character.
pub(crate) fn unescape_segment<'a>(raw: &'a str, options: &FlatOptions) -> Cow<'a, str> {
    let esc = match options.separator_escape_char {
        Some(c) => c,
        None => return Cow::Borrowed(raw),
    };
    if !raw.contains(esc) {
        return Cow::Borrowed(raw);
    }
    let sep = options.path_separator.as_str();
    let open = options
        .index_marker
        .as_ref()
        .map(|m| m.open.as_str())
        .filter(|o| !o.is_empty());

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(ch) = rest.chars().next() {
        if ch == esc {
            let after = &rest[ch.len_utf8()..];
            if !sep.is_empty() && after.starts_with(sep) {
                out.push_str(sep);
                rest = &after[sep.len()..];
            } else if let Some(o) = open.filter(|o| after.starts_with(o)) {
                out.push_str(o);
                rest = &after[o.len()..];
            } else if after.starts_with(esc) {
                out.push(esc);
                rest = &after[esc.len_utf8()..];
            } else {
                // unrecognized or trailing escape stays literal
                out.push(ch);
                rest = after;
            }
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    Cow::Owned(out)
}

fn value_char_needs_escape(ch: char) -> bool {
    matches!(ch, '\\' | '\n' | '\r' | '\t' | '\u{000C}') || (ch as u32) < 0x20
}

/// Escapes scalar value text for emission on a single line.
///
/// Backslash and the common control characters get two-character escapes;
/// remaining C0 controls become `\uXXXX`. A leading space is escaped so it is
/// not folded into the key/value separator's surrounding whitespace on read.
pub(crate) fn escape_value(raw: &str) -> Cow<'_, str> {
    let leading_space = raw.starts_with(' ');
    if !leading_space && !raw.chars().any(value_char_needs_escape) {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len() + 4);
    for (i, ch) in raw.chars().enumerate() {
        match ch {
            ' ' if i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverses [`escape_value`]. Unknown escapes drop the backslash and keep the
/// following character; a trailing backslash is literal. A truncated or
/// invalid `\uXXXX` sequence is an error, reported against `line`.
pub(crate) fn unescape_value(raw: &str, line: usize) -> Result<Cow<'_, str>> {
    if !raw.contains('\\') {
        return Ok(Cow::Borrowed(raw));
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('f') => out.push('\u{000C}'),
            Some('\\') => out.push('\\'),
            Some('u') => {
                let mut code = 0u32;
                for _ in 0..4 {
                    match chars.next().and_then(|h| h.to_digit(16)) {
                        Some(d) => code = code * 16 + d,
                        None => return Err(Error::unterminated_escape(line)),
                    }
                }
                match char::from_u32(code) {
                    Some(c) => out.push(c),
                    None => return Err(Error::unterminated_escape(line)),
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    Ok(Cow::Owned(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> FlatOptions {
        FlatOptions::default()
    }

    #[test]
    fn segment_without_specials_is_borrowed() {
        let options = opts();
        assert!(matches!(escape_segment("plain", &options), Cow::Borrowed(_)));
        assert!(matches!(
            unescape_segment("plain", &options),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn segment_separator_roundtrip() {
        let options = opts();
        let escaped = escape_segment("ab.c", &options);
        assert_eq!(escaped, "ab\\.c");
        assert_eq!(unescape_segment(&escaped, &options), "ab.c");
    }

    #[test]
    fn segment_escape_char_and_marker_roundtrip() {
        let options = opts();
        let escaped = escape_segment("a\\b[0]", &options);
        assert_eq!(escaped, "a\\\\b\\[0]");
        assert_eq!(unescape_segment(&escaped, &options), "a\\b[0]");
    }

    #[test]
    fn segment_trailing_escape_is_literal() {
        let options = opts();
        assert_eq!(unescape_segment("ab\\", &options), "ab\\");
    }

    #[test]
    fn value_controls_roundtrip() {
        let escaped = escape_value("a\nb\tc\\d");
        assert_eq!(escaped, "a\\nb\\tc\\\\d");
        assert_eq!(unescape_value(&escaped, 1).unwrap(), "a\nb\tc\\d");
    }

    #[test]
    fn value_leading_space_roundtrip() {
        let escaped = escape_value("  two spaces");
        assert_eq!(escaped, "\\  two spaces");
        assert_eq!(unescape_value(&escaped, 1).unwrap(), "  two spaces");
    }

    #[test]
    fn value_unicode_escape() {
        assert_eq!(unescape_value("bell\\u0007", 1).unwrap(), "bell\u{0007}");
        assert_eq!(escape_value("bell\u{0007}"), "bell\\u0007");
    }

    #[test]
    fn value_truncated_unicode_escape_fails() {
        assert!(matches!(
            unescape_value("\\u00", 7),
            Err(Error::UnterminatedEscape { line: 7 })
        ));
    }

    #[test]
    fn value_unknown_escape_keeps_char() {
        assert_eq!(unescape_value("a\\qb", 1).unwrap(), "aqb");
        assert_eq!(unescape_value("tail\\", 1).unwrap(), "tail\\");
    }

    #[test]
    fn custom_separator_and_marker() {
        let options = FlatOptions::new()
            .with_path_separator("::")
            .with_index_marker(crate::IndexMarker::new("<", ">"));
        let escaped = escape_segment("a::b<c", &options);
        assert_eq!(escaped, "a\\::b\\<c");
        assert_eq!(unescape_segment(&escaped, &options), "a::b<c");
    }

    #[test]
    fn no_escape_char_passes_through() {
        let options = FlatOptions::new().without_separator_escape();
        assert_eq!(escape_segment("ab.c", &options), "ab.c");
        assert_eq!(unescape_segment("ab\\.c", &options), "ab\\.c");
    }
}
