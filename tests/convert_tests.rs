// tests/convert_tests.rs

use qsdsl::convert::{
    ConvertError, expression_to_json, filter_from_json, filter_to_json, raw_from_json, raw_to_json,
    sort_from_json, sort_to_json, value_from_json, value_to_json,
};
use qsdsl::operators::OperatorsConfig;
use qsdsl::parser::{Parsed, StartRule, parse};
use qsdsl::{Direction, FieldExpression, SortField, Value, parse_filter};
use serde_json::json;

#[test]
fn test_atoms_and_lists() {
    let value = Value::List(vec![
        Value::Number(1.5),
        Value::string("x"),
        Value::Boolean(true),
        Value::Null,
        Value::identifier("price"),
    ]);
    let json = value_to_json(&value).unwrap();
    assert_eq!(
        json,
        json!([1.5, "x", true, null, {"type": "Identifier", "value": "price"}])
    );
    assert_eq!(value_from_json(&json).unwrap(), value);
}

#[test]
fn test_parsed_filter_to_json() {
    let filter = parse_filter(&OperatorsConfig::standard_filter(), "(:and,(price,:gte,100),(id,:in,[1,2]))").unwrap();
    let json = filter_to_json(&filter).unwrap();
    assert_eq!(
        json,
        json!([{
            "type": "FieldExpression",
            "operator": "and",
            "args": [
                {
                    "type": "FieldExpression",
                    "operator": "gte",
                    "args": [{"type": "Identifier", "value": "price"}, 100.0]
                },
                {
                    "type": "FieldExpression",
                    "operator": "in",
                    "args": [{"type": "Identifier", "value": "id"}, [1.0, 2.0]]
                }
            ]
        }])
    );
    assert_eq!(filter_from_json(&json).unwrap(), filter);
}

#[test]
fn test_sort_json() {
    let sort = vec![
        SortField::field(Direction::Desc, "createdAt"),
        SortField::expression(
            Direction::Asc,
            FieldExpression::new("score", vec![Value::identifier("title")]),
        ),
    ];
    let json = sort_to_json(&sort).unwrap();
    assert_eq!(
        json,
        json!([
            {"direction": "DESC", "field": "createdAt"},
            {
                "direction": "ASC",
                "expression": {
                    "type": "FieldExpression",
                    "operator": "score",
                    "args": [{"type": "Identifier", "value": "title"}]
                }
            }
        ])
    );
    assert_eq!(sort_from_json(&json).unwrap(), sort);
}

#[test]
fn test_missing_direction_defaults_to_ascending() {
    let sort = sort_from_json(&json!([{"field": "name"}])).unwrap();
    assert_eq!(sort, vec![SortField::field(Direction::Asc, "name")]);
}

#[test]
fn test_raw_expressions() {
    let raw = match parse("(a,:gte,(:x))", StartRule::Filter).unwrap() {
        Parsed::Filter(mut groups) => groups.remove(0),
        Parsed::Sort(_) => unreachable!(),
    };
    let json = raw_to_json(&raw).unwrap();
    assert_eq!(
        json,
        json!({
            "type": "RawFieldExpression",
            "items": [
                {"type": "Identifier", "value": "a"},
                {"type": "Operator", "value": "gte"},
                {"type": "RawFieldExpression", "items": [{"type": "Operator", "value": "x"}]}
            ]
        })
    );
    assert_eq!(raw_from_json(&json).unwrap(), raw);
}

#[test]
fn test_non_finite_numbers() {
    let exp = FieldExpression::new("eq", vec![Value::identifier("a"), Value::Number(f64::NAN)]);
    assert!(matches!(expression_to_json(&exp), Err(ConvertError::NonFiniteNumber(_))));
}

#[test]
fn test_shape_errors() {
    let test_cases = vec![
        json!({"type": "Identifier"}),
        json!({"type": "Unknown", "value": 1}),
        json!({"value": "x"}),
        json!({"type": "FieldExpression", "operator": "eq"}),
        json!({"type": "FieldExpression", "operator": 1, "args": []}),
    ];

    for json in test_cases {
        assert!(
            matches!(value_from_json(&json), Err(ConvertError::Shape { .. })),
            "json: {}",
            json
        );
    }

    assert!(filter_from_json(&json!({"type": "FieldExpression"})).is_err());
    assert!(filter_from_json(&json!([1])).is_err());
    assert!(sort_from_json(&json!([{"direction": "UP", "field": "a"}])).is_err());
    assert!(sort_from_json(&json!([{"field": "a", "expression": {}}])).is_err());
    assert!(sort_from_json(&json!([{"direction": "ASC"}])).is_err());
}

#[test]
fn test_error_message() {
    let err = filter_from_json(&json!([{"type": "Identifier", "value": "a"}])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected a FieldExpression object, got an object of type \"Identifier\""
    );
}
