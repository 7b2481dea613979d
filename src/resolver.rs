//! Turns raw parenthesized groups into validated [`FieldExpression`]s.
//!
//! Shape resolution is positional. For items `L`:
//!
//! 1. **Infix** - `L` has three items and `L[1]` is an operator tag, or a
//!    bare symbol naming a registered binary operator: `op(L[0], L[2])`.
//! 2. **Leading** - `L[0]` is an operator tag: `op(L[1..])`.
//! 3. **Shorthand** - two untagged items and `eq` is registered: `eq(L[0], L[1])`.
//!
//! Infix is tried first, so with `now` and `gte` both registered,
//! `(now,gte,[])` is `gte(now, [])`. After the shape is known the operator
//! must be registered, children are resolved, the finalize hook runs, and
//! the finalized argument count is checked against the arity.

use tracing::trace;

use crate::{
    ast::{FieldExpression, RawFieldExpression, RawItem, SortField, SortTarget, Value},
    error::{ArgsError, Error, OperatorShapeError, Result},
    operators::{Arity, OperatorsConfig},
    options::DEFAULT_MAX_DEPTH,
};

/// Operator inferred for two-item groups with no tag.
pub const SHORTHAND_OPERATOR: &str = "eq";

pub struct Resolver<'a> {
    operators: &'a OperatorsConfig,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(operators: &'a OperatorsConfig) -> Self {
        Resolver {
            operators,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn resolve(&self, raw: RawFieldExpression) -> Result<FieldExpression> {
        self.resolve_at(raw, 1)
    }

    pub fn resolve_sort_field(&self, field: SortField<RawFieldExpression>) -> Result<SortField> {
        let SortField { direction, target } = field;
        let target = match target {
            SortTarget::Field(name) => SortTarget::Field(name),
            SortTarget::Expression(raw) => SortTarget::Expression(self.resolve(raw)?),
        };
        Ok(SortField { direction, target })
    }

    /// Re-validates an already-built expression against this registry.
    pub fn finalize(&self, expression: FieldExpression) -> Result<FieldExpression> {
        self.finalize_at(expression.operator, expression.args, 1)
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn resolve_at(&self, raw: RawFieldExpression, depth: usize) -> Result<FieldExpression> {
        self.check_depth(depth)?;
        let (operator, args) = self.shape(raw)?;
        self.finalize_at(operator, args, depth)
    }

    fn finalize_at(&self, operator: String, args: Vec<Value>, depth: usize) -> Result<FieldExpression> {
        self.check_depth(depth)?;

        let config = self
            .operators
            .get(&operator)
            .ok_or_else(|| Error::UnknownOperator {
                operator: operator.clone(),
            })?;

        let args = args
            .into_iter()
            .map(|arg| self.resolve_value(arg, depth + 1))
            .collect::<Result<Vec<_>>>()?;

        let args = config
            .finalize_args(self.operators, &operator, args)
            .and_then(|args| {
                if args.iter().any(contains_raw) {
                    Err(ArgsError::new("finalized arguments contain an unresolved field expression"))
                } else {
                    Ok(args)
                }
            })
            .map_err(|source| Error::CustomValidation {
                operator: operator.clone(),
                source,
            })?;

        if !config.arity.accepts(args.len())
            && let Arity::Fixed(expected) = config.arity
        {
            return Err(Error::ArityMismatch {
                operator,
                expected,
                actual: args.len(),
            });
        }

        trace!(operator = %operator, args = args.len(), depth, "resolved field expression");
        Ok(FieldExpression::new(operator, args))
    }

    fn resolve_value(&self, value: Value, depth: usize) -> Result<Value> {
        match value {
            Value::Raw(raw) => self.resolve_at(raw, depth).map(Value::Expression),
            Value::Expression(exp) => self
                .finalize_at(exp.operator, exp.args, depth)
                .map(Value::Expression),
            Value::List(items) => {
                self.check_depth(depth)?;
                items
                    .into_iter()
                    .map(|item| self.resolve_value(item, depth + 1))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::List)
            }
            atom @ (Value::Number(_)
            | Value::String(_)
            | Value::Boolean(_)
            | Value::Null
            | Value::Identifier(_)) => Ok(atom),
        }
    }

    /// Picks the operator and argument list out of a raw group.
    fn shape(&self, raw: RawFieldExpression) -> Result<(String, Vec<Value>)> {
        let len = raw.len();
        let mut tags = Vec::new();
        let mut values = Vec::with_capacity(len);
        for (position, item) in raw.items.into_iter().enumerate() {
            match item {
                RawItem::Operator(name) => tags.push((position, name)),
                RawItem::Value(value) => values.push(value),
            }
        }

        let valid_tag_position = |position: usize| position == 0 || (position == 1 && len == 3);

        let mut tags = tags.into_iter();
        match (tags.next(), tags.next()) {
            (None, _) => self.shape_untagged(values),
            (Some((0, operator)), None) => {
                trace!(operator = %operator, "leading operator");
                Ok((operator, values))
            }
            // `values` is already [L0, L2]
            (Some((1, operator)), None) if len == 3 => {
                trace!(operator = %operator, "infixed operator");
                Ok((operator, values))
            }
            (Some((1, operator)), None) => Err(OperatorShapeError::InfixNeedsThreeItems {
                operator,
                items: len,
            }
            .into()),
            (Some((position, operator)), None) => {
                Err(OperatorShapeError::MisplacedOperatorTag { operator, position }.into())
            }
            (Some(first), Some(second)) => {
                let (position, operator) = if valid_tag_position(first.0) { second } else { first };
                Err(OperatorShapeError::MisplacedOperatorTag { operator, position }.into())
            }
        }
    }

    fn shape_untagged(&self, mut values: Vec<Value>) -> Result<(String, Vec<Value>)> {
        if values.len() == 3 {
            let infixed = values[1]
                .as_identifier()
                .filter(|id| self.operators.is_binary(&id.value))
                .map(|id| id.value.clone());
            if let Some(operator) = infixed {
                trace!(operator = %operator, "bare infixed binary operator");
                values.remove(1);
                return Ok((operator, values));
            }
        }

        if values.len() == 2 && self.operators.contains(SHORTHAND_OPERATOR) {
            trace!("inferred {} operator", SHORTHAND_OPERATOR);
            return Ok((SHORTHAND_OPERATOR.to_string(), values));
        }

        let binary = values
            .iter()
            .filter_map(Value::as_identifier)
            .find(|id| self.operators.is_binary(&id.value));
        if let Some(id) = binary {
            return Err(OperatorShapeError::BinaryNeedsThreeItems {
                operator: id.value.clone(),
                items: values.len(),
            }
            .into());
        }

        let hint = values
            .first()
            .and_then(Value::as_identifier)
            .filter(|id| self.operators.contains(&id.value))
            .map(|id| id.value.clone());
        Err(OperatorShapeError::NoOperator { hint }.into())
    }
}

/// Hooks may build new arguments; none of them may be left unresolved.
fn contains_raw(value: &Value) -> bool {
    match value {
        Value::Raw(_) => true,
        Value::List(items) => items.iter().any(contains_raw),
        Value::Expression(exp) => exp.args.iter().any(contains_raw),
        Value::Number(_) | Value::String(_) | Value::Boolean(_) | Value::Null | Value::Identifier(_) => false,
    }
}

/// Resolves a raw sort field; bare fields pass through.
pub fn resolve_sort_field(
    operators: &OperatorsConfig,
    field: SortField<RawFieldExpression>,
) -> Result<SortField> {
    Resolver::new(operators).resolve_sort_field(field)
}
