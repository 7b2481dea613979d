//! # Filter/Sort Language - Abstract Syntax Tree
//!
//! This module defines the AST shared by the parser, the resolver and the
//! serializer. The language lives inside URL query-string values, e.g.
//! `` ?filter=(price,:gte,100)(status,`active`) `` or `?sort=-createdAt,name`.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[values]** - Atoms, identifiers, list literals and the [`Value`] sum type
//! - **[expressions]** - Raw (unresolved) and resolved field expressions
//! - **[sort]** - Directioned sort fields
//!
//! ## Two Stages
//!
//! The parser only knows about parentheses. Every `( ... )` group comes out
//! as a [`RawFieldExpression`], a plain list of items, some of which may be
//! colon-tagged operator symbols (`:gte`). The resolver then decides, by
//! position and by what the operator registry knows, which item is the
//! operator and which are arguments:
//!
//! ```text
//! (price,:gte,100)     infix           gte(price, 100)
//! (:and,(a,1),(b,2))   leading         and(eq(a, 1), eq(b, 2))
//! (status,`active`)    eq shorthand    eq(status, "active")
//! ```
//!
//! A [`Value`] after resolution never contains [`Value::Raw`].
//!
//! ## Symbols vs. Strings
//!
//! `name` is an [`Identifier`] (a field or operator reference), while
//! `` `name` `` is a string literal. Both are percent-decoded, so any
//! character can be expressed in either; reserved characters must be
//! written percent-encoded.
pub mod expressions;
pub mod sort;
pub mod tokens;
pub mod values;

pub use expressions::{FieldExpression, RawFieldExpression, RawItem};
pub use sort::{Direction, SortField, SortTarget};
pub use tokens::Token;
pub use values::{Identifier, Value};
