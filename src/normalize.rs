//! Percent-decoding of RFC 3986 unreserved characters.
//!
//! `%61` and `a` mean the same thing in a URI, so both public entry points
//! run this before the grammar sees the input. Only unreserved characters
//! (`A-Z a-z 0-9 - . _ ~`) are decoded; every other escape is left exactly as
//! written, hex case included, and literal characters are never touched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PERCENT_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("%([0-9A-Fa-f]{2})").expect("percent-escape pattern is valid")
});

pub fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

/// Decodes `%HH` escapes of unreserved characters, leaving the rest alone.
///
/// Borrows when there is nothing to decode. Not recursive: `%2561`
/// stays `%2561`.
pub fn normalize(input: &str) -> Cow<'_, str> {
    PERCENT_ESCAPE.replace_all(input, |caps: &Captures| {
        let escape = &caps[0];
        match u8::from_str_radix(&caps[1], 16) {
            Ok(byte) if is_unreserved(byte) => char::from(byte).to_string(),
            _ => escape.to_string(),
        }
    })
}

#[test]
fn test_keyword_escapes() {
    assert_eq!(normalize("f%61lse"), "false");
    assert_eq!(normalize("%6eull"), "null");
    assert_eq!(normalize("%2F%2f"), "%2F%2f");
}
