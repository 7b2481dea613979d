use std::fmt;

use crate::ast::FieldExpression;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Asc,
    /// Written with a leading `-`
    Desc,
}

impl Direction {
    pub fn is_descending(&self) -> bool {
        *self == Direction::Desc
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}

/// What a sort entry orders by.
#[derive(Debug, Clone, PartialEq)]
pub enum SortTarget<E = FieldExpression> {
    /// Bare field name
    Field(String),
    /// Computed ordering, e.g. `(:distance,location,[1,2])`
    Expression(E),
}

/// One comma-separated entry of a sort value.
///
/// The parser produces `SortField<RawFieldExpression>`; resolution turns it
/// into the default `SortField<FieldExpression>`.
///
/// # Examples
/// ```text
/// name              // Asc, Field("name")
/// -createdAt        // Desc, Field("createdAt")
/// -(:score,title)   // Desc, Expression(score(title))
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SortField<E = FieldExpression> {
    pub direction: Direction,
    pub target: SortTarget<E>,
}

impl<E> SortField<E> {
    pub fn field(direction: Direction, name: impl Into<String>) -> Self {
        SortField {
            direction,
            target: SortTarget::Field(name.into()),
        }
    }

    pub fn expression(direction: Direction, expression: E) -> Self {
        SortField {
            direction,
            target: SortTarget::Expression(expression),
        }
    }
}
