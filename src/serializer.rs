//! Canonical text output for filter and sort values.
//!
//! The serializer is the inverse of parse + resolve: feeding its output back
//! through the parser yields a structurally identical AST. Output is
//! canonical, so two spellings of the same value serialize identically:
//!
//! - string literals always use backticks
//! - two-argument `eq` expressions use the `(a,b)` shorthand
//! - other two-argument expressions are infixed, `(a,:op,b)`
//! - everything else leads with the operator, `(:op,a,b,c)`
//! - percent escapes use uppercase hex
//!
//! # Examples
//!
//! ```
//! use qsdsl::{FieldExpression, Value, serialize_filter};
//!
//! let exp = FieldExpression::new("gte", vec![Value::identifier("price"), Value::Number(100.0)]);
//! assert_eq!(serialize_filter(&[exp]).unwrap(), "(price,:gte,100)");
//! ```

use crate::{
    ast::{FieldExpression, RawFieldExpression, RawItem, SortField, SortTarget, Value},
    encoding::{encode_string_contents, encode_symbol_value},
    error::{Error, Result, SerializationError},
    options::{CANONICAL_STRING_DELIMITER, SerializeOptions},
    resolver::SHORTHAND_OPERATOR,
};

pub struct Serializer {
    max_depth: usize,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(SerializeOptions::default())
    }
}

impl Serializer {
    pub fn new(options: SerializeOptions) -> Self {
        Serializer {
            max_depth: options.max_depth(),
        }
    }

    pub fn serialize_filter(&self, expressions: &[FieldExpression]) -> Result<String> {
        let mut out = String::new();
        for exp in expressions {
            self.write_expression(&mut out, exp, 1)?;
        }
        Ok(out)
    }

    pub fn serialize_sort<E: SerializeNode>(&self, fields: &[SortField<E>]) -> Result<String> {
        let mut out = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if field.direction.is_descending() {
                out.push('-');
            }
            match &field.target {
                SortTarget::Field(name) => out.push_str(&symbol(name, "sort field")?),
                SortTarget::Expression(exp) => exp.write_node(self, &mut out, 1)?,
            }
        }
        Ok(out)
    }

    /// Serializes any single value, e.g. one argument.
    pub fn serialize_value(&self, value: &Value) -> Result<String> {
        let mut out = String::new();
        self.write_value(&mut out, value, 1)?;
        Ok(out)
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn write_value(&self, out: &mut String, value: &Value, depth: usize) -> Result<()> {
        match value {
            Value::Null => out.push_str("null"),
            Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => out.push_str(&format_number(*n)?),
            Value::String(s) => {
                out.push(CANONICAL_STRING_DELIMITER);
                out.push_str(&encode_string_contents(s));
                out.push(CANONICAL_STRING_DELIMITER);
            }
            Value::Identifier(id) => out.push_str(&symbol(&id.value, "identifier")?),
            Value::List(items) => {
                self.check_depth(depth)?;
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_value(out, item, depth + 1)?;
                }
                out.push(']');
            }
            Value::Raw(raw) => self.write_raw(out, raw, depth)?,
            Value::Expression(exp) => self.write_expression(out, exp, depth)?,
        }
        Ok(())
    }

    fn write_expression(&self, out: &mut String, exp: &FieldExpression, depth: usize) -> Result<()> {
        self.check_depth(depth)?;
        let operator = symbol(&exp.operator, "operator")?;

        out.push('(');
        match exp.args.as_slice() {
            [left, right] => {
                self.write_value(out, left, depth + 1)?;
                out.push(',');
                if exp.operator != SHORTHAND_OPERATOR {
                    out.push(':');
                    out.push_str(&operator);
                    out.push(',');
                }
                self.write_value(out, right, depth + 1)?;
            }
            args => {
                out.push(':');
                out.push_str(&operator);
                for arg in args {
                    out.push(',');
                    self.write_value(out, arg, depth + 1)?;
                }
            }
        }
        out.push(')');
        Ok(())
    }

    fn write_raw(&self, out: &mut String, raw: &RawFieldExpression, depth: usize) -> Result<()> {
        self.check_depth(depth)?;
        out.push('(');
        for (i, item) in raw.items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            match item {
                RawItem::Operator(name) => {
                    out.push(':');
                    out.push_str(&symbol(name, "operator")?);
                }
                RawItem::Value(value) => self.write_value(out, value, depth + 1)?,
            }
        }
        out.push(')');
        Ok(())
    }
}

/// Anything that can stand in a sort field's expression slot.
pub trait SerializeNode {
    fn write_node(&self, serializer: &Serializer, out: &mut String, depth: usize) -> Result<()>;
}

impl SerializeNode for FieldExpression {
    fn write_node(&self, serializer: &Serializer, out: &mut String, depth: usize) -> Result<()> {
        serializer.write_expression(out, self, depth)
    }
}

impl SerializeNode for RawFieldExpression {
    fn write_node(&self, serializer: &Serializer, out: &mut String, depth: usize) -> Result<()> {
        serializer.write_raw(out, self, depth)
    }
}

fn symbol(value: &str, what: &'static str) -> Result<String> {
    if value.is_empty() {
        return Err(SerializationError::EmptySymbol(what).into());
    }
    Ok(encode_symbol_value(value))
}

/// Shortest decimal that parses back to `n`, never in exponential notation.
///
/// `f64`'s `Display` already expands large and tiny magnitudes into plain
/// digits, e.g. `1e21` prints as `1000000000000000000000`.
pub fn format_number(n: f64) -> Result<String> {
    if !n.is_finite() {
        return Err(SerializationError::NonFiniteNumber.into());
    }
    if n == 0.0 {
        return Ok("0".to_string());
    }
    Ok(n.to_string())
}

#[test]
fn test_format_number() {
    assert_eq!(format_number(2.1).unwrap(), "2.1");
    assert_eq!(format_number(-0.0).unwrap(), "0");
    assert_eq!(format_number(1e21).unwrap(), "1000000000000000000000");
    assert_eq!(format_number(2.33296304941e-7).unwrap(), "0.000000233296304941");
    assert!(format_number(f64::NAN).is_err());
}
