use crate::ast::Value;

/// One entry of a parenthesized group, as written.
#[derive(Debug, Clone, PartialEq)]
pub enum RawItem {
    /// Colon-tagged symbol, unambiguously an operator
    ///
    /// # Example
    /// ```text
    /// (price,:gte,100)   // ":gte" is RawItem::Operator("gte")
    /// ```
    Operator(String),

    /// Anything else
    Value(Value),
}

impl From<Value> for RawItem {
    fn from(value: Value) -> Self {
        RawItem::Value(value)
    }
}

/// A parenthesized group straight out of the parser.
///
/// Its meaning (which item is the operator) is only known after
/// resolution against an operator registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFieldExpression {
    pub items: Vec<RawItem>,
}

impl RawFieldExpression {
    pub fn new(items: Vec<RawItem>) -> Self {
        RawFieldExpression { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A resolved `(operator, args)` node.
///
/// Once produced by the resolver, `operator` is a registered name and the
/// length of `args` matches the registered arity (unless unbounded).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExpression {
    pub operator: String,
    pub args: Vec<Value>,
}

impl FieldExpression {
    pub fn new(operator: impl Into<String>, args: Vec<Value>) -> Self {
        FieldExpression {
            operator: operator.into(),
            args,
        }
    }
}
