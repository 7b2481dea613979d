use percent_encoding::percent_decode_str;

use crate::ast::Token;
use crate::error::{Found, GrammarSyntaxError};
use crate::options::ParseOptions;

/// Characters that may appear literally in a symbol or string body.
///
/// Anything else has to be percent-encoded.
pub fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | '*' | '+' | '$' | ';' | '@')
}

/// Characters with structural meaning in a field expression.
pub fn is_structural_char(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | ',' | ':')
}

/// Written symbols can't start like a number does.
fn is_symbol_start(c: char) -> bool {
    (is_symbol_char(c) && c != '-' && c != '.' && !c.is_ascii_digit()) || c == '%'
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    options: ParseOptions,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &str, options: ParseOptions) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            options,
        }
    }

    /// Character offset of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// What sits at `offset`, for error reporting.
    pub fn found_at(&self, offset: usize) -> Found {
        self.input
            .get(offset)
            .map_or(Found::EndOfInput, |&c| Found::Char(c))
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn error_here(&self, expected: &str) -> GrammarSyntaxError {
        GrammarSyntaxError::new(self.position, self.found_at(self.position), expected)
    }

    fn starts_number(&self) -> bool {
        match self.current_char() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_char(1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Reads symbol/string body characters, keeping `%HH` escapes as written.
    fn read_encoded(&mut self) -> Result<String, GrammarSyntaxError> {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '%' {
                let hi = self.peek_char(1).filter(char::is_ascii_hexdigit);
                let lo = self.peek_char(2).filter(char::is_ascii_hexdigit);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        result.push('%');
                        result.push(hi);
                        result.push(lo);
                        self.position += 3;
                    }
                    _ => return Err(self.error_here("two hexadecimal digits after \"%\"")),
                }
            } else if is_symbol_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        Ok(result)
    }

    fn decode(&self, raw: &str, start: usize) -> Result<String, GrammarSyntaxError> {
        percent_decode_str(raw)
            .decode_utf8()
            .map(|decoded| decoded.into_owned())
            .map_err(|_| {
                GrammarSyntaxError::new(start, self.found_at(start), "percent-encoded UTF-8")
            })
    }

    fn read_symbol(&mut self) -> Result<Token, GrammarSyntaxError> {
        let start = self.position;
        let raw = self.read_encoded()?;

        // Keywords are matched on the written text, so `%74rue` is a symbol.
        match raw.as_str() {
            "true" => Ok(Token::Boolean(true)),
            "false" => Ok(Token::Boolean(false)),
            "null" => Ok(Token::Null),
            _ => Ok(Token::Symbol(self.decode(&raw, start)?)),
        }
    }

    fn read_string(&mut self, quote: char) -> Result<Token, GrammarSyntaxError> {
        let start = self.position;
        self.advance(); // opening quote

        let raw = self.read_encoded()?;
        match self.current_char() {
            Some(c) if c == quote => {
                self.advance();
                Ok(Token::String(self.decode(&raw, start)?))
            }
            _ => Err(self.error_here(&format!(
                "string character or closing \"{}\"",
                quote
            ))),
        }
    }

    fn read_number(&mut self) -> Result<Token, GrammarSyntaxError> {
        let start = self.position;
        let mut number = String::new();

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if self.current_char() == Some('.') && self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) {
            number.push('.');
            self.advance();
            while let Some(ch) = self.current_char() {
                if ch.is_ascii_digit() {
                    number.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        match number.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            Ok(_) => Err(GrammarSyntaxError::new(
                start,
                self.found_at(start),
                "number within double-precision range",
            )),
            Err(_) => Err(GrammarSyntaxError::new(start, self.found_at(start), "number")),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, GrammarSyntaxError> {
        let token = match self.current_char() {
            None => Token::Eof,
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some('[') => {
                self.advance();
                Token::LBracket
            }
            Some(']') => {
                self.advance();
                Token::RBracket
            }
            Some(',') => {
                self.advance();
                Token::Comma
            }
            Some(':') => {
                self.advance();
                Token::Colon
            }
            Some(ch) if self.options.is_string_delimiter(ch) => self.read_string(ch)?,
            Some('-') => {
                self.advance();
                if self.starts_number() {
                    self.position -= 1;
                    self.read_number()?
                } else {
                    Token::Minus
                }
            }
            Some(_) if self.starts_number() => self.read_number()?,
            Some(ch) if is_symbol_start(ch) => self.read_symbol()?,
            Some(ch) => {
                self.advance();
                Token::Unexpected(ch)
            }
        };

        Ok(token)
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("true,false,null,truthy");
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(true)));
    assert_eq!(lexer.next_token(), Ok(Token::Comma));
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(false)));
    assert_eq!(lexer.next_token(), Ok(Token::Comma));
    assert_eq!(lexer.next_token(), Ok(Token::Null));
    assert_eq!(lexer.next_token(), Ok(Token::Comma));
    assert_eq!(lexer.next_token(), Ok(Token::Symbol("truthy".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_field_expression() {
    let mut lexer = Lexer::new("(price,:gte,-2.5)");
    assert_eq!(lexer.next_token(), Ok(Token::LParen));
    assert_eq!(lexer.next_token(), Ok(Token::Symbol("price".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Comma));
    assert_eq!(lexer.next_token(), Ok(Token::Colon));
    assert_eq!(lexer.next_token(), Ok(Token::Symbol("gte".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Comma));
    assert_eq!(lexer.next_token(), Ok(Token::Number(-2.5)));
    assert_eq!(lexer.next_token(), Ok(Token::RParen));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}
