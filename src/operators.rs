//! The operator registry: the only extension point of the language.
//!
//! A registry maps operator names to an [`Arity`] and an optional
//! [`FinalizeArgs`] hook. The resolver consults it to decide which item of a
//! parenthesized group is the operator, then hands the resolved arguments to
//! the hook, which may rewrite or reject them. Callers usually keep separate
//! registries for filter and sort values.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::ast::Value;
use crate::error::ArgsError;

/// How many (finalized) arguments an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Fixed(usize),
    Unbounded,
}

impl Arity {
    pub fn is_binary(&self) -> bool {
        *self == Arity::Fixed(2)
    }

    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => *n == count,
            Arity::Unbounded => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{}", n),
            Arity::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Argument-finalization hook.
///
/// Called with children already resolved. Returns the final argument list,
/// which is what the arity check then sees. The default body implements the
/// rule for binary comparison operators: the first argument must be a field
/// reference.
pub trait FinalizeArgs: Send + Sync {
    fn finalize_args(
        &self,
        operators: &OperatorsConfig,
        operator: &str,
        args: Vec<Value>,
    ) -> Result<Vec<Value>, ArgsError> {
        let _ = operators;
        require_field_reference(operator, args)
    }
}

impl<F> FinalizeArgs for F
where
    F: Fn(&OperatorsConfig, &str, Vec<Value>) -> Result<Vec<Value>, ArgsError> + Send + Sync,
{
    fn finalize_args(
        &self,
        operators: &OperatorsConfig,
        operator: &str,
        args: Vec<Value>,
    ) -> Result<Vec<Value>, ArgsError> {
        self(operators, operator, args)
    }
}

/// Passes arguments through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl FinalizeArgs for Identity {
    fn finalize_args(&self, _: &OperatorsConfig, _: &str, args: Vec<Value>) -> Result<Vec<Value>, ArgsError> {
        Ok(args)
    }
}

/// First argument must be an identifier; the built-in hook for binary operators.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireFieldReference;

impl FinalizeArgs for RequireFieldReference {}

/// Binary operator whose second argument must be a list literal (`in`, `nin`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldAndList;

impl FinalizeArgs for FieldAndList {
    fn finalize_args(&self, _: &OperatorsConfig, operator: &str, args: Vec<Value>) -> Result<Vec<Value>, ArgsError> {
        let args = require_field_reference(operator, args)?;
        match args.get(1) {
            Some(Value::List(_)) | None => Ok(args),
            Some(other) => Err(ArgsError::new(format!(
                "\"{}\" operator expects a list as its second argument; got {}",
                operator,
                other.type_name()
            ))),
        }
    }
}

/// Every argument must itself be a field expression (`and`, `or`, `not`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionsOnly;

impl FinalizeArgs for ExpressionsOnly {
    fn finalize_args(&self, _: &OperatorsConfig, operator: &str, args: Vec<Value>) -> Result<Vec<Value>, ArgsError> {
        match args.iter().find(|arg| !arg.is_expression()) {
            None => Ok(args),
            Some(other) => Err(ArgsError::new(format!(
                "arguments to \"{}\" must be field expressions; got {}",
                operator,
                other.type_name()
            ))),
        }
    }
}

pub fn require_field_reference(operator: &str, args: Vec<Value>) -> Result<Vec<Value>, ArgsError> {
    match args.first() {
        Some(Value::Identifier(_)) => Ok(args),
        Some(other) => Err(ArgsError::new(format!(
            "\"{}\" operator expects field reference as first argument; got {}",
            operator,
            other.type_name()
        ))),
        None => Err(ArgsError::new(format!(
            "\"{}\" operator expects field reference as first argument",
            operator
        ))),
    }
}

/// One registry entry.
#[derive(Clone)]
pub struct OperatorConfig {
    pub arity: Arity,
    finalizer: Option<Arc<dyn FinalizeArgs>>,
}

impl OperatorConfig {
    pub fn new(arity: Arity) -> Self {
        OperatorConfig {
            arity,
            finalizer: None,
        }
    }

    pub fn fixed(arity: usize) -> Self {
        Self::new(Arity::Fixed(arity))
    }

    pub fn unbounded() -> Self {
        Self::new(Arity::Unbounded)
    }

    pub fn with_finalizer(mut self, finalizer: impl FinalizeArgs + 'static) -> Self {
        self.finalizer = Some(Arc::new(finalizer));
        self
    }

    /// Same as [`with_finalizer`](Self::with_finalizer), but lets closure
    /// argument and return types be inferred.
    pub fn with_finalizer_fn<F>(self, finalizer: F) -> Self
    where
        F: Fn(&OperatorsConfig, &str, Vec<Value>) -> Result<Vec<Value>, ArgsError> + Send + Sync + 'static,
    {
        self.with_finalizer(finalizer)
    }

    pub fn has_custom_finalizer(&self) -> bool {
        self.finalizer.is_some()
    }

    /// Runs the configured hook, or the built-in one when none is set.
    pub fn finalize_args(
        &self,
        operators: &OperatorsConfig,
        operator: &str,
        args: Vec<Value>,
    ) -> Result<Vec<Value>, ArgsError> {
        match &self.finalizer {
            Some(hook) => hook.finalize_args(operators, operator, args),
            None if self.arity.is_binary() => {
                RequireFieldReference.finalize_args(operators, operator, args)
            }
            None => Identity.finalize_args(operators, operator, args),
        }
    }
}

impl fmt::Debug for OperatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorConfig")
            .field("arity", &self.arity)
            .field("custom_finalizer", &self.finalizer.is_some())
            .finish()
    }
}

/// Operator name → configuration.
#[derive(Debug, Clone, Default)]
pub struct OperatorsConfig {
    operators: BTreeMap<String, OperatorConfig>,
}

impl OperatorsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, config: OperatorConfig) -> Self {
        self.insert(name, config);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, config: OperatorConfig) -> Option<OperatorConfig> {
        self.operators.insert(name.into(), config)
    }

    pub fn get(&self, name: &str) -> Option<&OperatorConfig> {
        self.operators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    pub fn arity(&self, name: &str) -> Option<Arity> {
        self.get(name).map(|config| config.arity)
    }

    pub fn is_binary(&self, name: &str) -> bool {
        self.arity(name).is_some_and(|arity| arity.is_binary())
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// A typical filter registry.
    ///
    /// - `eq neq lt lte gt gte`: binary, first argument a field reference
    /// - `in nin`: binary, field reference and a list
    /// - `and or`: any number of field expressions
    /// - `not`: exactly one field expression
    pub fn standard_filter() -> Self {
        let mut operators = OperatorsConfig::new();
        for name in ["eq", "neq", "lt", "lte", "gt", "gte"] {
            operators.insert(name, OperatorConfig::fixed(2));
        }
        for name in ["in", "nin"] {
            operators.insert(name, OperatorConfig::fixed(2).with_finalizer(FieldAndList));
        }
        for name in ["and", "or"] {
            operators.insert(name, OperatorConfig::unbounded().with_finalizer(ExpressionsOnly));
        }
        operators.insert("not", OperatorConfig::fixed(1).with_finalizer(ExpressionsOnly));
        operators
    }
}

impl<S: Into<String>> FromIterator<(S, OperatorConfig)> for OperatorsConfig {
    fn from_iter<I: IntoIterator<Item = (S, OperatorConfig)>>(iter: I) -> Self {
        let mut operators = OperatorsConfig::new();
        for (name, config) in iter {
            operators.insert(name, config);
        }
        operators
    }
}
