// tests/sort_tests.rs

use qsdsl::ast::RawFieldExpression;
use qsdsl::error::Error;
use qsdsl::operators::{OperatorConfig, OperatorsConfig};
use qsdsl::parser::{Parsed, StartRule, parse};
use qsdsl::resolver::resolve_sort_field;
use qsdsl::{Direction, FieldExpression, SortField, SortTarget, Value, parse_sort};

fn sort_operators() -> OperatorsConfig {
    OperatorsConfig::new()
        .with("distance", OperatorConfig::fixed(2))
        .with("score", OperatorConfig::unbounded())
}

#[test]
fn test_plain_fields() {
    let fields = parse_sort(&OperatorsConfig::new(), "-createdAt,name,-id").unwrap();
    assert_eq!(
        fields,
        vec![
            SortField::field(Direction::Desc, "createdAt"),
            SortField::field(Direction::Asc, "name"),
            SortField::field(Direction::Desc, "id"),
        ]
    );
}

#[test]
fn test_computed_fields() {
    let fields = parse_sort(&sort_operators(), "-(:distance,location,[52.5,13.4]),(:score,title)").unwrap();
    assert_eq!(
        fields,
        vec![
            SortField::expression(
                Direction::Desc,
                FieldExpression::new(
                    "distance",
                    vec![
                        Value::identifier("location"),
                        Value::List(vec![Value::Number(52.5), Value::Number(13.4)]),
                    ]
                )
            ),
            SortField::expression(
                Direction::Asc,
                FieldExpression::new("score", vec![Value::identifier("title")])
            ),
        ]
    );
    assert!(fields[0].direction.is_descending());
}

#[test]
fn test_infix_sort_expression() {
    let fields = parse_sort(&sort_operators(), "(location,:distance,[0,0])").unwrap();
    match &fields[0].target {
        SortTarget::Expression(exp) => assert_eq!(exp.operator, "distance"),
        SortTarget::Field(name) => panic!("expected expression, got field {}", name),
    }
}

#[test]
fn test_unknown_sort_operator() {
    assert_eq!(
        parse_sort(&sort_operators(), "name,(:rank,title)"),
        Err(Error::UnknownOperator {
            operator: "rank".to_string()
        })
    );
}

#[test]
fn test_sort_is_normalized() {
    let operators = OperatorsConfig::new();
    assert_eq!(
        parse_sort(&operators, "%2Dname,%6Eull%2A").unwrap(),
        vec![
            SortField::field(Direction::Desc, "name"),
            SortField::field(Direction::Asc, "null*"),
        ]
    );
    assert!(matches!(parse_sort(&operators, "%2D"), Err(Error::Syntax(_))));
}

#[test]
fn test_resolve_raw_sort_field() {
    let raw = match parse("-(:score,a,b)", StartRule::Sort).unwrap() {
        Parsed::Sort(mut fields) => fields.remove(0),
        Parsed::Filter(_) => unreachable!(),
    };
    let resolved = resolve_sort_field(&sort_operators(), raw).unwrap();
    assert_eq!(
        resolved,
        SortField::expression(
            Direction::Desc,
            FieldExpression::new("score", vec![Value::identifier("a"), Value::identifier("b")])
        )
    );

    let bare: SortField<RawFieldExpression> = SortField::field(Direction::Asc, "x");
    assert_eq!(
        resolve_sort_field(&OperatorsConfig::new(), bare).unwrap(),
        SortField::field(Direction::Asc, "x")
    );
}

#[test]
fn test_direction_display() {
    assert_eq!(Direction::Asc.to_string(), "ASC");
    assert_eq!(Direction::Desc.to_string(), "DESC");
    assert_eq!(Direction::default(), Direction::Asc);
}
