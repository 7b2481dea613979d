//! Operator registries loaded from JSON files
//!
//! ```json
//! {
//!   "eq":       { "arity": 2 },
//!   "in":       { "arity": 2, "args": "field-list" },
//!   "and":      { "arity": "unbounded", "args": "expressions" },
//!   "distance": { "arity": 2, "args": "any" }
//! }
//! ```
//!
//! `args` picks an argument check: `field` (first argument must be an
//! identifier), `field-list`, `expressions` or `any`. Without it binary
//! operators check for a field reference and everything else accepts any
//! arguments.

use std::fs;
use std::path::Path;

use serde_json::Value as Json;

use super::CliError;
use crate::operators::{ExpressionsOnly, FieldAndList, Identity, RequireFieldReference};
use crate::{Arity, OperatorConfig, OperatorsConfig};

pub fn load_operators(path: &Path) -> Result<OperatorsConfig, CliError> {
    let text = fs::read_to_string(path)?;
    operators_from_json(&text)
}

pub fn operators_from_json(text: &str) -> Result<OperatorsConfig, CliError> {
    let json: Json = serde_json::from_str(text)?;
    let entries = json
        .as_object()
        .ok_or_else(|| CliError::InvalidRegistry("expected an object of operators".to_string()))?;

    let mut operators = OperatorsConfig::new();
    for (name, entry) in entries {
        if name.is_empty() {
            return Err(CliError::InvalidRegistry("operator names cannot be empty".to_string()));
        }
        operators.insert(name.as_str(), operator_from_json(name, entry)?);
    }
    Ok(operators)
}

fn operator_from_json(name: &str, entry: &Json) -> Result<OperatorConfig, CliError> {
    let invalid = |what: &str| CliError::InvalidRegistry(format!("\"{}\": {}", name, what));

    let arity = match entry.get("arity") {
        Some(Json::String(s)) if s == "unbounded" => Arity::Unbounded,
        Some(Json::Number(n)) => match n.as_u64() {
            Some(n) => Arity::Fixed(n as usize),
            None => return Err(invalid("arity must be a non-negative integer")),
        },
        _ => return Err(invalid("arity must be a number or \"unbounded\"")),
    };

    let config = OperatorConfig::new(arity);
    match entry.get("args").map(|args| args.as_str()) {
        None => Ok(config),
        Some(Some("any")) => Ok(config.with_finalizer(Identity)),
        Some(Some("field")) => Ok(config.with_finalizer(RequireFieldReference)),
        Some(Some("field-list")) => Ok(config.with_finalizer(FieldAndList)),
        Some(Some("expressions")) => Ok(config.with_finalizer(ExpressionsOnly)),
        Some(_) => Err(invalid("args must be one of \"any\", \"field\", \"field-list\", \"expressions\"")),
    }
}

#[test]
fn test_registry_entries() {
    let operators = operators_from_json(
        r#"{"eq":{"arity":2},"and":{"arity":"unbounded","args":"expressions"},"near":{"arity":2,"args":"any"}}"#,
    )
    .unwrap();
    assert_eq!(operators.len(), 3);
    assert_eq!(operators.arity("eq"), Some(Arity::Fixed(2)));
    assert_eq!(operators.arity("and"), Some(Arity::Unbounded));
    assert!(operators.get("near").unwrap().has_custom_finalizer());
    assert!(!operators.get("eq").unwrap().has_custom_finalizer());

    assert!(matches!(
        operators_from_json(r#"{"eq":{"arity":-1}}"#),
        Err(CliError::InvalidRegistry(_))
    ));
    assert!(matches!(
        operators_from_json(r#"{"eq":{"arity":2,"args":"lists"}}"#),
        Err(CliError::InvalidRegistry(_))
    ));
    assert!(matches!(operators_from_json("[]"), Err(CliError::InvalidRegistry(_))));
}
