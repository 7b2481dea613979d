// tests/filter_tests.rs

use qsdsl::error::{ArgsError, Error, OperatorShapeError};
use qsdsl::operators::{Identity, OperatorConfig, OperatorsConfig};
use qsdsl::parser::{Parsed, StartRule, parse};
use qsdsl::{
    FieldExpression, ParseOptions, RawFieldExpression, Resolver, Value, parse_filter, parse_filter_with_options,
};

fn standard(input: &str) -> Result<Vec<FieldExpression>, Error> {
    parse_filter(&OperatorsConfig::standard_filter(), input)
}

fn single(input: &str) -> FieldExpression {
    let mut filter = standard(input).unwrap();
    assert_eq!(filter.len(), 1, "input: {}", input);
    filter.remove(0)
}

fn exp(operator: &str, args: Vec<Value>) -> FieldExpression {
    FieldExpression::new(operator, args)
}

fn id(s: &str) -> Value {
    Value::identifier(s)
}

// ============================================================================
// Shapes
// ============================================================================

#[test]
fn test_infix_leading_and_shorthand_agree() {
    let expected = exp("gte", vec![id("price"), Value::Number(100.0)]);
    assert_eq!(single("(price,:gte,100)"), expected);
    assert_eq!(single("(:gte,price,100)"), expected);
    assert_eq!(single("(price,gte,100)"), expected);

    let expected = exp("eq", vec![id("fieldName"), Value::Number(1.0)]);
    assert_eq!(single("(fieldName,1)"), expected);
    assert_eq!(single("(fieldName,:eq,1)"), expected);
    assert_eq!(single("(:eq,fieldName,1)"), expected);
}

#[test]
fn test_multiple_expressions() {
    let filter = standard("(status,`active`)(price,:lt,10)").unwrap();
    assert_eq!(
        filter,
        vec![
            exp("eq", vec![id("status"), Value::string("active")]),
            exp("lt", vec![id("price"), Value::Number(10.0)]),
        ]
    );
}

#[test]
fn test_bare_binary_operator_wins_over_leading_symbol() {
    let operators = OperatorsConfig::new()
        .with("now", OperatorConfig::unbounded())
        .with("gte", OperatorConfig::fixed(2));

    let filter = parse_filter(&operators, "(now,gte,[])").unwrap();
    assert_eq!(filter, vec![exp("gte", vec![id("now"), Value::List(vec![])])]);
}

#[test]
fn test_leading_operator_with_field_and_list() {
    let operators = OperatorsConfig::new().with("now", OperatorConfig::fixed(2));

    let filter = parse_filter(&operators, "(:now,fieldName,[])").unwrap();
    assert_eq!(filter, vec![exp("now", vec![id("fieldName"), Value::List(vec![])])]);
}

#[test]
fn test_nullary_operator() {
    let operators = OperatorsConfig::new().with("now", OperatorConfig::fixed(0));

    assert_eq!(parse_filter(&operators, "(:now)").unwrap(), vec![exp("now", vec![])]);
    assert_eq!(
        parse_filter(&operators, "(:now,1)"),
        Err(Error::ArityMismatch {
            operator: "now".to_string(),
            expected: 0,
            actual: 1,
        })
    );
}

#[test]
fn test_logical_operators() {
    assert_eq!(
        single("(:or,(a,1),(b,:lt,2),(:not,(c,null)))"),
        exp(
            "or",
            vec![
                Value::Expression(exp("eq", vec![id("a"), Value::Number(1.0)])),
                Value::Expression(exp("lt", vec![id("b"), Value::Number(2.0)])),
                Value::Expression(exp(
                    "not",
                    vec![Value::Expression(exp("eq", vec![id("c"), Value::Null]))]
                )),
            ]
        )
    );
}

#[test]
fn test_expressions_inside_lists_are_resolved() {
    let operators = OperatorsConfig::standard_filter().with("any", OperatorConfig::unbounded());
    let filter = parse_filter(&operators, "(:any,[(a,1)])").unwrap();
    assert_eq!(
        filter[0].args,
        vec![Value::List(vec![Value::Expression(exp(
            "eq",
            vec![id("a"), Value::Number(1.0)]
        ))])]
    );
}

// ============================================================================
// Shape errors
// ============================================================================

#[test]
fn test_shape_errors() {
    let test_cases = vec![
        (
            "(a,:gte,1,2)",
            OperatorShapeError::InfixNeedsThreeItems {
                operator: "gte".to_string(),
                items: 4,
            },
        ),
        (
            "(a,:gte)",
            OperatorShapeError::InfixNeedsThreeItems {
                operator: "gte".to_string(),
                items: 2,
            },
        ),
        (
            "(a,1,:gte)",
            OperatorShapeError::MisplacedOperatorTag {
                operator: "gte".to_string(),
                position: 2,
            },
        ),
        (
            "(:and,:or)",
            OperatorShapeError::MisplacedOperatorTag {
                operator: "or".to_string(),
                position: 1,
            },
        ),
        (
            "(a,gte,1,2)",
            OperatorShapeError::BinaryNeedsThreeItems {
                operator: "gte".to_string(),
                items: 4,
            },
        ),
        ("(a,b,c)", OperatorShapeError::NoOperator { hint: None }),
    ];

    for (input, expected) in test_cases {
        assert_eq!(standard(input), Err(Error::OperatorShape(expected)), "input: {}", input);
    }
}

#[test]
fn test_shorthand_needs_eq() {
    let operators = OperatorsConfig::new().with("lt", OperatorConfig::fixed(2));
    assert_eq!(
        parse_filter(&operators, "(a,1)"),
        Err(Error::OperatorShape(OperatorShapeError::NoOperator { hint: None }))
    );
}

#[test]
fn test_hint_for_untagged_operator() {
    let operators = OperatorsConfig::new().with("not", OperatorConfig::fixed(1));
    let err = parse_filter(&operators, "(not,x)").unwrap_err();
    assert_eq!(
        err,
        Error::OperatorShape(OperatorShapeError::NoOperator {
            hint: Some("not".to_string())
        })
    );
    assert_eq!(
        err.to_string(),
        "Field expression must have a valid leading or infixed operator symbol (did you mean \":not\"?)."
    );
}

// ============================================================================
// Registry validation
// ============================================================================

#[test]
fn test_unknown_operator() {
    assert_eq!(
        standard("(:foo,a,1)"),
        Err(Error::UnknownOperator {
            operator: "foo".to_string()
        })
    );
    assert_eq!(
        standard("(:foo,a,1)").unwrap_err().to_string(),
        "\"foo\" is not a recognized operator."
    );
}

#[test]
fn test_unknown_operator_is_reported_before_children() {
    assert_eq!(
        standard("(:zzz,(a,:yyy,1))"),
        Err(Error::UnknownOperator {
            operator: "zzz".to_string()
        })
    );
    assert_eq!(
        standard("(:and,(a,:yyy,1))"),
        Err(Error::UnknownOperator {
            operator: "yyy".to_string()
        })
    );
}

#[test]
fn test_arity_mismatch() {
    let err = standard("(:gte,a,1,2)").unwrap_err();
    assert_eq!(
        err,
        Error::ArityMismatch {
            operator: "gte".to_string(),
            expected: 2,
            actual: 3,
        }
    );
    assert_eq!(err.to_string(), "\"gte\" operator expects exactly 2 arguments; got 3.");
}

#[test]
fn test_builtin_argument_checks() {
    let test_cases = vec![
        (
            "(1,:gte,2)",
            "gte",
            "\"gte\" operator expects field reference as first argument; got number",
        ),
        (
            "(id,:in,1)",
            "in",
            "\"in\" operator expects a list as its second argument; got number",
        ),
        (
            "(:and,a)",
            "and",
            "arguments to \"and\" must be field expressions; got identifier",
        ),
    ];

    for (input, operator, message) in test_cases {
        assert_eq!(
            standard(input),
            Err(Error::CustomValidation {
                operator: operator.to_string(),
                source: ArgsError::new(message),
            }),
            "input: {}",
            input
        );
    }

    assert!(standard("(id,:in,[1,2])").is_ok());
    assert!(standard("(id,:nin,[])").is_ok());
}

#[test]
fn test_finalizer_can_rewrite_arguments() {
    let between = OperatorConfig::fixed(3).with_finalizer_fn(|_, _, mut args: Vec<Value>| {
        match args.pop() {
            Some(Value::List(bounds)) if bounds.len() == 2 => {
                args.extend(bounds);
                Ok(args)
            }
            _ => Err(ArgsError::new("expected [low,high]")),
        }
    });
    let operators = OperatorsConfig::new().with("between", between);

    assert_eq!(
        parse_filter(&operators, "(price,:between,[1,2])").unwrap(),
        vec![exp("between", vec![id("price"), Value::Number(1.0), Value::Number(2.0)])]
    );
    assert!(matches!(
        parse_filter(&operators, "(price,:between,[1])"),
        Err(Error::CustomValidation { .. })
    ));
}

#[test]
fn test_finalizer_sees_resolved_children() {
    let operators = OperatorsConfig::standard_filter().with(
        "wrap",
        OperatorConfig::unbounded().with_finalizer_fn(|operators, _, args| {
            assert!(operators.contains("eq"));
            if args.iter().all(Value::is_expression) {
                Ok(args)
            } else {
                Err(ArgsError::new("unresolved child"))
            }
        }),
    );

    assert!(parse_filter(&operators, "(:wrap,(a,1),(b,:lt,2))").is_ok());
}

#[test]
fn test_custom_finalizer_replaces_field_reference_check() {
    let operators = OperatorsConfig::new().with("near", OperatorConfig::fixed(2).with_finalizer(Identity));
    assert!(parse_filter(&operators, "(1,:near,2)").is_ok());
}

// ============================================================================
// Normalization and limits
// ============================================================================

#[test]
fn test_entry_point_normalizes() {
    assert_eq!(single("(:%67te,price,1)").operator, "gte");
    assert_eq!(single("(flag,%74rue)").args[1], Value::Boolean(true));
    assert!(matches!(standard("(:%2Dabc)"), Err(Error::Syntax(_))));
}

#[test]
fn test_resolver_depth_limit() {
    let options = ParseOptions::new().with_max_depth(2).unwrap();
    let operators = OperatorsConfig::standard_filter();

    assert!(parse_filter_with_options(&operators, "(:not,(a,1))", &options).is_ok());
    assert_eq!(
        parse_filter_with_options(&operators, "(:not,(:not,(a,1)))", &options),
        Err(Error::NestingTooDeep { limit: 2 })
    );

    let raw = match parse("(:not,(a,1))", StartRule::Filter).unwrap() {
        Parsed::Filter(mut groups) => groups.remove(0),
        Parsed::Sort(_) => unreachable!(),
    };
    assert_eq!(
        Resolver::new(&operators).with_max_depth(1).resolve(raw),
        Err(Error::NestingTooDeep { limit: 1 })
    );
}

#[test]
fn test_finalize_built_expression() {
    let operators = OperatorsConfig::standard_filter();
    let resolver = Resolver::new(&operators);

    let built = exp(
        "and",
        vec![Value::Expression(exp("gte", vec![id("price"), Value::Number(1.0)]))],
    );
    assert_eq!(resolver.finalize(built.clone()), Ok(built));

    let bad = exp("gte", vec![id("price")]);
    assert!(matches!(resolver.finalize(bad), Err(Error::ArityMismatch { .. })));
}

#[test]
fn test_finalizer_cannot_return_unresolved_groups() {
    let unresolved = || ArgsError::new("finalized arguments contain an unresolved field expression");
    let operators = OperatorsConfig::new()
        .with(
            "wrap",
            OperatorConfig::unbounded().with_finalizer_fn(|_, _, mut args| {
                args.push(Value::Raw(RawFieldExpression::new(vec![])));
                Ok(args)
            }),
        )
        .with(
            "nest",
            OperatorConfig::unbounded().with_finalizer_fn(|_, _, _| {
                Ok(vec![Value::List(vec![Value::Expression(exp(
                    "x",
                    vec![Value::Raw(RawFieldExpression::new(vec![]))],
                ))])])
            }),
        );

    assert_eq!(
        parse_filter(&operators, "(:wrap)"),
        Err(Error::CustomValidation {
            operator: "wrap".to_string(),
            source: unresolved(),
        })
    );
    assert_eq!(
        parse_filter(&operators, "(:nest)"),
        Err(Error::CustomValidation {
            operator: "nest".to_string(),
            source: unresolved(),
        })
    );
}

#[test]
fn test_number_literal_overflow() {
    let operators = OperatorsConfig::new().with("op", OperatorConfig::unbounded());
    let filter = format!("(:op,{})", "9".repeat(400));
    assert!(matches!(parse_filter(&operators, &filter), Err(Error::Syntax(_))));
}
