//! JSON <-> AST conversion
//!
//! The JSON shape mirrors the AST:
//!
//! ```text
//! 42, "text", true, null          atoms
//! [ ... ]                         list literal
//! {"type":"Identifier","value":"price"}
//! {"type":"FieldExpression","operator":"gte","args":[ ... ]}
//! {"type":"RawFieldExpression","items":[ ..., {"type":"Operator","value":"gte"} ]}
//! {"direction":"DESC","field":"createdAt"}
//! {"direction":"ASC","expression":{"type":"FieldExpression", ...}}
//! ```

use serde_json::{Map, Number, Value as Json, json};
use thiserror::Error;

use crate::ast::{Direction, FieldExpression, RawFieldExpression, RawItem, SortField, SortTarget, Value};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("Expected {expected}, got {found}")]
    Shape { expected: &'static str, found: String },

    #[error("Number {0} has no JSON representation")]
    NonFiniteNumber(String),
}

fn shape_error(expected: &'static str, found: &Json) -> ConvertError {
    let found = match found {
        Json::Null => "null".to_string(),
        Json::Bool(_) => "a boolean".to_string(),
        Json::Number(_) => "a number".to_string(),
        Json::String(_) => "a string".to_string(),
        Json::Array(_) => "an array".to_string(),
        Json::Object(obj) => match obj.get("type").and_then(Json::as_str) {
            Some(t) => format!("an object of type \"{}\"", t),
            None => "an object".to_string(),
        },
    };
    ConvertError::Shape { expected, found }
}

/// Convert a Value to serde_json::Value
pub fn value_to_json(v: &Value) -> Result<Json, ConvertError> {
    Ok(match v {
        Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::Number(n) => Number::from_f64(*n)
            .map(Json::Number)
            .ok_or_else(|| ConvertError::NonFiniteNumber(n.to_string()))?,
        Value::String(s) => Json::String(s.clone()),
        Value::Identifier(id) => json!({ "type": "Identifier", "value": id.value }),
        Value::List(items) => Json::Array(items.iter().map(value_to_json).collect::<Result<_, _>>()?),
        Value::Raw(raw) => raw_to_json(raw)?,
        Value::Expression(exp) => expression_to_json(exp)?,
    })
}

pub fn expression_to_json(exp: &FieldExpression) -> Result<Json, ConvertError> {
    let args = exp.args.iter().map(value_to_json).collect::<Result<Vec<_>, _>>()?;
    Ok(json!({ "type": "FieldExpression", "operator": exp.operator, "args": args }))
}

pub fn raw_to_json(raw: &RawFieldExpression) -> Result<Json, ConvertError> {
    let items = raw
        .items
        .iter()
        .map(|item| match item {
            RawItem::Operator(name) => Ok(json!({ "type": "Operator", "value": name })),
            RawItem::Value(value) => value_to_json(value),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(json!({ "type": "RawFieldExpression", "items": items }))
}

/// Shared by resolved and raw sort fields.
pub fn sort_field_to_json<E>(
    field: &SortField<E>,
    expression: impl Fn(&E) -> Result<Json, ConvertError>,
) -> Result<Json, ConvertError> {
    let mut obj = Map::new();
    obj.insert("direction".to_string(), Json::String(field.direction.to_string()));
    match &field.target {
        SortTarget::Field(name) => obj.insert("field".to_string(), Json::String(name.clone())),
        SortTarget::Expression(exp) => obj.insert("expression".to_string(), expression(exp)?),
    };
    Ok(Json::Object(obj))
}

pub fn filter_to_json(expressions: &[FieldExpression]) -> Result<Json, ConvertError> {
    expressions
        .iter()
        .map(expression_to_json)
        .collect::<Result<Vec<_>, _>>()
        .map(Json::Array)
}

pub fn sort_to_json(fields: &[SortField]) -> Result<Json, ConvertError> {
    fields
        .iter()
        .map(|field| sort_field_to_json(field, expression_to_json))
        .collect::<Result<Vec<_>, _>>()
        .map(Json::Array)
}

/// Convert serde_json::Value to a Value
pub fn value_from_json(v: &Json) -> Result<Value, ConvertError> {
    match v {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Boolean(*b)),
        Json::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| shape_error("a number representable as f64", v)),
        Json::String(s) => Ok(Value::String(s.clone())),
        Json::Array(items) => items
            .iter()
            .map(value_from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        Json::Object(obj) => match obj.get("type").and_then(Json::as_str) {
            Some("Identifier") => string_field(obj, "value", v).map(Value::identifier),
            Some("FieldExpression") => expression_from_json(v).map(Value::Expression),
            Some("RawFieldExpression") => raw_from_json(v).map(Value::Raw),
            _ => Err(shape_error("an Identifier or FieldExpression object", v)),
        },
    }
}

fn string_field(obj: &Map<String, Json>, key: &str, whole: &Json) -> Result<String, ConvertError> {
    obj.get(key)
        .and_then(Json::as_str)
        .map(str::to_string)
        .ok_or_else(|| shape_error("a string property", whole))
}

pub fn expression_from_json(v: &Json) -> Result<FieldExpression, ConvertError> {
    let obj = v
        .as_object()
        .filter(|obj| obj.get("type").and_then(Json::as_str) == Some("FieldExpression"))
        .ok_or_else(|| shape_error("a FieldExpression object", v))?;

    let operator = string_field(obj, "operator", v)?;
    let args = match obj.get("args") {
        Some(Json::Array(args)) => args.iter().map(value_from_json).collect::<Result<Vec<_>, _>>()?,
        _ => return Err(shape_error("a FieldExpression with an \"args\" array", v)),
    };
    Ok(FieldExpression::new(operator, args))
}

pub fn raw_from_json(v: &Json) -> Result<RawFieldExpression, ConvertError> {
    let items = match v.get("items") {
        Some(Json::Array(items)) => items,
        _ => return Err(shape_error("a RawFieldExpression with an \"items\" array", v)),
    };

    items
        .iter()
        .map(|item| match item.get("type").and_then(Json::as_str) {
            Some("Operator") => item
                .get("value")
                .and_then(Json::as_str)
                .map(|name| RawItem::Operator(name.to_string()))
                .ok_or_else(|| shape_error("an Operator with a string value", item)),
            _ => value_from_json(item).map(RawItem::Value),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(RawFieldExpression::new)
}

pub fn sort_field_from_json(v: &Json) -> Result<SortField, ConvertError> {
    let obj = v.as_object().ok_or_else(|| shape_error("a sort field object", v))?;

    let direction = match obj.get("direction").and_then(Json::as_str) {
        Some("ASC") | None => Direction::Asc,
        Some("DESC") => Direction::Desc,
        Some(_) => return Err(shape_error("direction \"ASC\" or \"DESC\"", v)),
    };

    match (obj.get("field"), obj.get("expression")) {
        (Some(Json::String(name)), None) => Ok(SortField::field(direction, name.clone())),
        (None, Some(exp)) => Ok(SortField::expression(direction, expression_from_json(exp)?)),
        _ => Err(shape_error("a sort field with exactly one of \"field\" or \"expression\"", v)),
    }
}

pub fn filter_from_json(v: &Json) -> Result<Vec<FieldExpression>, ConvertError> {
    match v {
        Json::Array(items) => items.iter().map(expression_from_json).collect(),
        _ => Err(shape_error("an array of FieldExpression objects", v)),
    }
}

pub fn sort_from_json(v: &Json) -> Result<Vec<SortField>, ConvertError> {
    match v {
        Json::Array(items) => items.iter().map(sort_field_from_json).collect(),
        _ => Err(shape_error("an array of sort fields", v)),
    }
}
