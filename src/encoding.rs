//! Percent-encoding for string bodies, symbols and operator names.
//!
//! Output keeps only `A-Z a-z 0-9 - _ . ~` literal. That is stricter than
//! `encodeURIComponent`: `! ' ( ) *` are delimiters here, and backtick and
//! square brackets are delimiters too. Escapes use uppercase hex.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encodes the body of a string literal.
pub fn encode_string_contents(s: &str) -> Cow<'_, str> {
    utf8_percent_encode(s, COMPONENT).into()
}

/// Encodes an identifier or operator name so it re-lexes as a symbol.
///
/// On top of [`encode_string_contents`], a leading character that would make
/// the text lex as a number or keyword is escaped too: `-x` becomes `%2Dx`,
/// `true` becomes `%74rue`.
pub fn encode_symbol_value(s: &str) -> String {
    let encoded = encode_string_contents(s);
    let mut chars = encoded.chars();
    let needs_escape = match chars.clone().next() {
        Some(c) if c == '-' || c == '.' || c.is_ascii_digit() => true,
        Some(_) => matches!(encoded.as_ref(), "true" | "false" | "null"),
        None => false,
    };

    match chars.next() {
        Some(first) if needs_escape => format!("%{:02X}{}", first as u32, chars.as_str()),
        _ => encoded.into_owned(),
    }
}

#[test]
fn test_leading_escapes() {
    assert_eq!(encode_symbol_value("-"), "%2D");
    assert_eq!(encode_symbol_value("9lives"), "%39lives");
    assert_eq!(encode_symbol_value(".hidden"), "%2Ehidden");
    assert_eq!(encode_symbol_value("null"), "%6Eull");
    assert_eq!(encode_symbol_value("nullable"), "nullable");
    assert_eq!(encode_symbol_value("a b"), "a%20b");
}
