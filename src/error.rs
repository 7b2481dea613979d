//! Error types shared by the parser, resolver and serializer.
//!
//! Every failure is fail-fast: the first problem found anywhere in a
//! (possibly nested) value aborts the whole operation and is returned as a
//! single [`Error`]. None of these are transient, so callers should map them
//! to a client-input error at their boundary.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// All errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The text does not match the grammar.
    #[error(transparent)]
    Syntax(#[from] GrammarSyntaxError),

    /// Parentheses/brackets nested deeper than the configured limit.
    #[error("Nesting exceeds the maximum depth of {limit}.")]
    NestingTooDeep { limit: usize },

    /// The resolved operator name is absent from the registry.
    #[error("\"{operator}\" is not a recognized operator.")]
    UnknownOperator { operator: String },

    /// Finalized argument count disagrees with the registered arity.
    #[error("\"{operator}\" operator expects exactly {expected} arguments; got {actual}.")]
    ArityMismatch {
        operator: String,
        expected: usize,
        actual: usize,
    },

    /// No operator could be determined for a parenthesized group.
    #[error(transparent)]
    OperatorShape(#[from] OperatorShapeError),

    /// An operator's argument-finalization hook rejected its arguments.
    #[error("Invalid arguments for \"{operator}\": {source}")]
    CustomValidation {
        operator: String,
        #[source]
        source: ArgsError,
    },

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// Rejected [`ParseOptions`](crate::ParseOptions).
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

/// What the parser ran into where it expected something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Char(char),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Char(c) => write!(f, "\"{}\"", c),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Malformed text at the lexical or structural level.
///
/// `offset` counts characters (not bytes) from the start of the input that
/// was handed to the grammar, i.e. after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Expected {expected} but {found} found (at offset {offset}).")]
pub struct GrammarSyntaxError {
    pub offset: usize,
    pub found: Found,
    pub expected: String,
}

impl GrammarSyntaxError {
    pub fn new(offset: usize, found: Found, expected: impl Into<String>) -> Self {
        GrammarSyntaxError {
            offset,
            found,
            expected: expected.into(),
        }
    }
}

/// A parenthesized group whose items don't form a valid operator shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperatorShapeError {
    #[error("Infixed operator \":{operator}\" requires a list of exactly three items; got {items}.")]
    InfixNeedsThreeItems { operator: String, items: usize },

    #[error("\"{operator}\" is a binary operator, so its field expression must have exactly three items; got {items}.")]
    BinaryNeedsThreeItems { operator: String, items: usize },

    #[error("Operator tag \":{operator}\" may only appear first, or second in a three-item list (found at position {position}).")]
    MisplacedOperatorTag { operator: String, position: usize },

    #[error("Field expression must have a valid leading or infixed operator symbol{}.", hint_suffix(.hint))]
    NoOperator { hint: Option<String> },
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(name) => format!(" (did you mean \":{}\"?)", name),
        None => String::new(),
    }
}

/// An AST that has no textual representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationError {
    #[error("There's no way to serialize infinite numbers or NaN.")]
    NonFiniteNumber,

    #[error("Cannot serialize an empty {0}.")]
    EmptySymbol(&'static str),
}

/// Rejection raised by a [`FinalizeArgs`](crate::operators::FinalizeArgs) hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ArgsError {
    pub message: String,
}

impl ArgsError {
    pub fn new(message: impl Into<String>) -> Self {
        ArgsError {
            message: message.into(),
        }
    }
}
