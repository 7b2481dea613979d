//! Tunables for parsing, resolving and serializing.

use crate::error::{Error, Result};
use crate::lexer::{is_structural_char, is_symbol_char};

/// Nesting limit used when none is configured.
///
/// Each `(` or `[` is one level; a top-level field expression is level 1.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Delimiter always used on output.
pub const CANONICAL_STRING_DELIMITER: char = '`';

/// Delimiters accepted on input unless configured otherwise.
pub const DEFAULT_STRING_DELIMITERS: &[char] = &['`', '!'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: usize,
    string_delimiters: Vec<char>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            string_delimiters: DEFAULT_STRING_DELIMITERS.to_vec(),
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn string_delimiters(&self) -> &[char] {
        &self.string_delimiters
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Result<Self> {
        self.max_depth = validate_max_depth(max_depth)?;
        Ok(self)
    }

    /// Sets which characters may open and close a string literal.
    ///
    /// The canonical backtick must be included, so serializer output stays
    /// parseable. Delimiters can't be characters that already mean something
    /// else in the grammar.
    pub fn with_string_delimiters(mut self, delimiters: &[char]) -> Result<Self> {
        if !delimiters.contains(&CANONICAL_STRING_DELIMITER) {
            return Err(Error::InvalidOptions(format!(
                "string delimiters must include '{}'",
                CANONICAL_STRING_DELIMITER
            )));
        }

        let mut accepted: Vec<char> = Vec::with_capacity(delimiters.len());
        for &d in delimiters {
            if is_symbol_char(d) || is_structural_char(d) || d == '%' {
                return Err(Error::InvalidOptions(format!(
                    "'{}' cannot be used as a string delimiter",
                    d
                )));
            }
            if accepted.contains(&d) {
                return Err(Error::InvalidOptions(format!(
                    "duplicate string delimiter '{}'",
                    d
                )));
            }
            accepted.push(d);
        }

        self.string_delimiters = accepted;
        Ok(self)
    }

    pub(crate) fn is_string_delimiter(&self, c: char) -> bool {
        self.string_delimiters.contains(&c)
    }
}

fn validate_max_depth(max_depth: usize) -> Result<usize> {
    if max_depth == 0 {
        return Err(Error::InvalidOptions(
            "max_depth must be at least 1".to_string(),
        ));
    }
    Ok(max_depth)
}

/// Options for the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    max_depth: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Result<Self> {
        self.max_depth = validate_max_depth(max_depth)?;
        Ok(self)
    }
}

impl From<&ParseOptions> for SerializeOptions {
    fn from(options: &ParseOptions) -> Self {
        SerializeOptions {
            max_depth: options.max_depth,
        }
    }
}
