//! # qsdsl
//!
//! A small language, embedded in URL query-string values, for filter
//! predicates and sort orderings:
//!
//! ```text
//! ?filter=(status,`active`)(price,:gte,100)(:or,(tag,`a`),(tag,`b`))
//! ?sort=-createdAt,(:distance,location,[52.5,13.4])
//! ```
//!
//! Parsing runs in three steps: unreserved percent escapes are normalized,
//! the grammar builds raw parenthesized groups, and the resolver turns each
//! group into a [`FieldExpression`] using a caller-supplied
//! [`OperatorsConfig`]. [`serialize_filter`] and [`serialize_sort`] go the
//! other way and always produce the canonical spelling.
//!
//! ```
//! use qsdsl::{OperatorsConfig, parse_filter, serialize_filter};
//!
//! let operators = OperatorsConfig::standard_filter();
//! let filter = parse_filter(&operators, "(price,:eq,100)").unwrap();
//! assert_eq!(filter[0].operator, "eq");
//! assert_eq!(serialize_filter(&filter).unwrap(), "(price,100)");
//! ```
pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod convert;
pub mod encoding;
pub mod error;
pub mod lexer;
pub mod normalize;
pub mod operators;
pub mod options;
pub mod parser;
pub mod resolver;
pub mod serializer;

pub use ast::{Direction, FieldExpression, Identifier, RawFieldExpression, RawItem, SortField, SortTarget, Token, Value};
pub use error::{ArgsError, Error, GrammarSyntaxError, OperatorShapeError, Result, SerializationError};
pub use lexer::Lexer;
pub use normalize::normalize;
pub use operators::{Arity, FinalizeArgs, OperatorConfig, OperatorsConfig};
pub use options::{ParseOptions, SerializeOptions};
pub use parser::{Parsed, Parser, StartRule};
pub use resolver::Resolver;
pub use serializer::Serializer;

use tracing::debug;

/// Parses and resolves a filter value.
pub fn parse_filter(operators: &OperatorsConfig, filter: &str) -> Result<Vec<FieldExpression>> {
    parse_filter_with_options(operators, filter, &ParseOptions::default())
}

pub fn parse_filter_with_options(
    operators: &OperatorsConfig,
    filter: &str,
    options: &ParseOptions,
) -> Result<Vec<FieldExpression>> {
    debug!(len = filter.len(), "parsing filter value");
    let normalized = normalize(filter);
    let lexer = Lexer::with_options(&normalized, options.clone());
    let raw = Parser::new(lexer)?.parse_filter()?;

    let resolver = Resolver::new(operators).with_max_depth(options.max_depth());
    raw.into_iter().map(|exp| resolver.resolve(exp)).collect()
}

/// Parses and resolves a sort value.
pub fn parse_sort(operators: &OperatorsConfig, sort: &str) -> Result<Vec<SortField>> {
    parse_sort_with_options(operators, sort, &ParseOptions::default())
}

pub fn parse_sort_with_options(
    operators: &OperatorsConfig,
    sort: &str,
    options: &ParseOptions,
) -> Result<Vec<SortField>> {
    debug!(len = sort.len(), "parsing sort value");
    let normalized = normalize(sort);
    let lexer = Lexer::with_options(&normalized, options.clone());
    let raw = Parser::new(lexer)?.parse_sort()?;

    let resolver = Resolver::new(operators).with_max_depth(options.max_depth());
    raw.into_iter()
        .map(|field| resolver.resolve_sort_field(field))
        .collect()
}

pub fn serialize_filter(expressions: &[FieldExpression]) -> Result<String> {
    debug!(count = expressions.len(), "serializing filter value");
    Serializer::default().serialize_filter(expressions)
}

pub fn serialize_sort(fields: &[SortField]) -> Result<String> {
    debug!(count = fields.len(), "serializing sort value");
    Serializer::default().serialize_sort(fields)
}
