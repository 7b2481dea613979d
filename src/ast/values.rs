use crate::ast::{FieldExpression, RawFieldExpression};

/// A symbolic reference: a field name or an operator name.
///
/// Distinguishes `fieldName` from the string literal `` `fieldName` ``.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    pub value: String,
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Identifier {
            value: value.into(),
        }
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::new(value)
    }
}

/// Any value that can appear as a field-expression item or argument.
///
/// This is a closed set: the serializer and resolver match on it
/// exhaustively, so adding a variant is a compile error until every
/// consumer handles it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Number literal
    ///
    /// There is no integer/float distinction; `011.99` and `11.99` are the
    /// same value.
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -2.1
    /// .99
    /// ```
    Number(f64),

    /// String literal
    ///
    /// # Examples
    /// ```text
    /// `hello`
    /// `J%26J`        // "J&J"
    /// !legacy!
    /// ```
    String(String),

    /// Boolean literal
    Boolean(bool),

    /// Null literal
    Null,

    /// Field or operator reference
    Identifier(Identifier),

    /// Bracketed list literal
    ///
    /// # Example
    /// ```text
    /// [1,2,`three`]
    /// ```
    List(Vec<Value>),

    /// A parenthesized group that hasn't been resolved yet.
    Raw(RawFieldExpression),

    /// A resolved field expression.
    Expression(FieldExpression),
}

impl Value {
    pub fn identifier(value: impl Into<String>) -> Self {
        Value::Identifier(Identifier::new(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Value::Identifier(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, Value::Expression(_))
    }

    /// Human-readable name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::Identifier(_) => "identifier",
            Value::List(_) => "list",
            Value::Raw(_) => "unresolved field expression",
            Value::Expression(_) => "field expression",
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Identifier> for Value {
    fn from(id: Identifier) -> Self {
        Value::Identifier(id)
    }
}

impl From<FieldExpression> for Value {
    fn from(exp: FieldExpression) -> Self {
        Value::Expression(exp)
    }
}

impl From<RawFieldExpression> for Value {
    fn from(raw: RawFieldExpression) -> Self {
        Value::Raw(raw)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
