use crate::{
    ast::{Direction, RawFieldExpression, RawItem, SortField, SortTarget, Token, Value},
    error::{Error, GrammarSyntaxError, Result},
    lexer::Lexer,
    options::ParseOptions,
};
use std::mem;

/// Which top-level production to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRule {
    /// One or more `( ... )` groups with no separator
    Filter,
    /// Comma-separated fields or `( ... )` groups, each optionally `-`-prefixed
    Sort,
}

/// Grammar output, before any operator resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Filter(Vec<RawFieldExpression>),
    Sort(Vec<SortField<RawFieldExpression>>),
}

/// Parses `input` as written; no URI normalization is applied.
pub fn parse(input: &str, rule: StartRule) -> Result<Parsed> {
    parse_with_options(input, rule, &ParseOptions::default())
}

pub fn parse_with_options(input: &str, rule: StartRule, options: &ParseOptions) -> Result<Parsed> {
    let lexer = Lexer::with_options(input, options.clone());
    let mut parser = Parser::new(lexer)?;
    match rule {
        StartRule::Filter => parser.parse_filter().map(Parsed::Filter),
        StartRule::Sort => parser.parse_sort().map(Parsed::Sort),
    }
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    /// Offset of `current_token` in the input
    token_start: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self> {
        let token_start = lexer.position();
        let current_token = lexer.next_token()?;
        let max_depth = lexer.options().max_depth();
        Ok(Parser {
            lexer,
            current_token,
            token_start,
            depth: 0,
            max_depth,
        })
    }

    fn advance(&mut self) -> Result<()> {
        self.token_start = self.lexer.position();
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn error(&self, expected: &str) -> Error {
        GrammarSyntaxError::new(
            self.token_start,
            self.lexer.found_at(self.token_start),
            expected,
        )
        .into()
    }

    fn expect(&mut self, expected: Token, description: &str) -> Result<()> {
        if !self.check(&expected) {
            return Err(self.error(description));
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(&self.current_token) == std::mem::discriminant(token)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    /// Filter := FieldExpression+ EOF
    pub fn parse_filter(&mut self) -> Result<Vec<RawFieldExpression>> {
        let mut expressions = Vec::new();

        loop {
            match self.current_token {
                Token::LParen => expressions.push(self.parse_field_expression()?),
                Token::Eof if !expressions.is_empty() => break,
                _ if expressions.is_empty() => return Err(self.error("field expression")),
                _ => return Err(self.error("field expression or end of input")),
            }
        }

        Ok(expressions)
    }

    /// Sort := SortField ("," SortField)* EOF
    pub fn parse_sort(&mut self) -> Result<Vec<SortField<RawFieldExpression>>> {
        let mut fields = Vec::new();

        loop {
            let direction = if self.check(&Token::Minus) {
                self.advance()?;
                Direction::Desc
            } else {
                Direction::Asc
            };

            let target = match mem::replace(&mut self.current_token, Token::Eof) {
                Token::Symbol(name) => {
                    self.advance()?;
                    SortTarget::Field(name)
                }
                Token::LParen => {
                    self.current_token = Token::LParen;
                    SortTarget::Expression(self.parse_field_expression()?)
                }
                _ if fields.is_empty() && direction == Direction::Asc => {
                    return Err(self.error("sort fields list"));
                }
                _ => return Err(self.error("sort field name or field expression")),
            };
            fields.push(SortField { direction, target });

            match self.current_token {
                Token::Comma => self.advance()?,
                Token::Eof => break,
                _ => return Err(self.error("\",\" or end of input")),
            }
        }

        Ok(fields)
    }

    /// FieldExpression := "(" Item ("," Item)* ")"
    fn parse_field_expression(&mut self) -> Result<RawFieldExpression> {
        self.enter()?;
        self.expect(Token::LParen, "field expression")?;

        let mut items = vec![self.parse_item()?];
        loop {
            match self.current_token {
                Token::Comma => {
                    self.advance()?;
                    items.push(self.parse_item()?);
                }
                Token::RParen => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.error("\",\" or \")\"")),
            }
        }

        self.exit();
        Ok(RawFieldExpression::new(items))
    }

    /// Item := ":" Symbol | Value
    fn parse_item(&mut self) -> Result<RawItem> {
        if !self.check(&Token::Colon) {
            return self
                .parse_value("field expression item (value or \":\" operator tag)")
                .map(RawItem::Value);
        }

        self.advance()?;
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Symbol(name) => {
                self.advance()?;
                Ok(RawItem::Operator(name))
            }
            _ => Err(self.error("operator symbol after \":\"")),
        }
    }

    fn parse_value(&mut self, expected: &str) -> Result<Value> {
        match self.current_token {
            Token::LParen => return self.parse_field_expression().map(Value::Raw),
            Token::LBracket => return self.parse_list().map(Value::List),
            _ => {}
        }

        let value = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Number(n) => Value::Number(n),
            Token::String(s) => Value::String(s),
            Token::Boolean(b) => Value::Boolean(b),
            Token::Null => Value::Null,
            Token::Symbol(name) => Value::identifier(name),
            _ => return Err(self.error(expected)),
        };
        self.advance()?;
        Ok(value)
    }

    /// List := "[" (Value ("," Value)*)? "]"
    fn parse_list(&mut self) -> Result<Vec<Value>> {
        self.enter()?;
        self.expect(Token::LBracket, "list")?;

        let mut items = Vec::new();
        if self.check(&Token::RBracket) {
            self.advance()?;
            self.exit();
            return Ok(items);
        }

        loop {
            items.push(self.parse_value("list item")?);
            match self.current_token {
                Token::Comma => self.advance()?,
                Token::RBracket => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.error("\",\" or \"]\"")),
            }
        }

        self.exit();
        Ok(items)
    }
}

#[test]
fn test_filter_items() {
    let parsed = parse("(price,:gte,100)", StartRule::Filter).unwrap();
    assert_eq!(
        parsed,
        Parsed::Filter(vec![RawFieldExpression::new(vec![
            RawItem::Value(Value::identifier("price")),
            RawItem::Operator("gte".to_string()),
            RawItem::Value(Value::Number(100.0)),
        ])])
    );
}
