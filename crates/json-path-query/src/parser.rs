//! Path query parser.

use crate::types::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected root identifier '$' at start")]
    ExpectedRoot,
    #[error("Unexpected character {0:?} at offset {1}")]
    UnexpectedChar(char, usize),
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Invalid escape sequence")]
    InvalidEscape,
    #[error("Invalid number")]
    InvalidNumber,
    #[error("Unclosed string")]
    UnclosedString,
    #[error("Invalid selector")]
    InvalidSelector,
}

/// Path query parser.
///
/// Accepts `$` followed by any sequence of `.name`, `.'quoted name'`, `.*`,
/// `['name']`, `["name"]`, `[n]` and `[*]`.
pub struct JsonPathParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> JsonPathParser<'a> {
    /// Parse a path query.
    pub fn parse(input: &'a str) -> Result<JsonPath, ParseError> {
        let mut parser = Self { input, pos: 0 };
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<JsonPath, ParseError> {
        if self.peek() != Some('$') {
            return Err(ParseError::ExpectedRoot);
        }
        self.advance();

        let mut selectors = Vec::new();

        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.advance();
                    selectors.push(self.parse_dot_selector()?);
                }
                '[' => selectors.push(self.parse_bracket_selector()?),
                other => return Err(ParseError::UnexpectedChar(other, self.pos)),
            }
        }

        Ok(JsonPath::new(selectors))
    }

    fn parse_dot_selector(&mut self) -> Result<Selector, ParseError> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd),
            Some('*') => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            Some('\'') | Some('"') => Ok(Selector::Name(self.parse_string()?)),
            Some('.') => Err(ParseError::UnexpectedChar('.', self.pos)),
            Some(_) => Ok(Selector::Name(self.parse_identifier()?)),
        }
    }

    fn parse_bracket_selector(&mut self) -> Result<Selector, ParseError> {
        self.expect('[')?;
        self.skip_whitespace();

        let selector = match self.peek() {
            Some('\'') | Some('"') => Selector::Name(self.parse_string()?),
            Some('*') => {
                self.advance();
                Selector::Wildcard
            }
            Some('-') | Some('0'..='9') => Selector::Index(self.parse_number()?),
            None => return Err(ParseError::UnexpectedEnd),
            Some(_) => return Err(ParseError::InvalidSelector),
        };

        self.skip_whitespace();
        self.expect(']')?;
        Ok(selector)
    }

    fn parse_number(&mut self) -> Result<isize, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        self.input[start..self.pos]
            .parse()
            .map_err(|_| ParseError::InvalidNumber)
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let start = self.pos;

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' || c == '$' || c == '@' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return match self.peek() {
                Some(c) => Err(ParseError::UnexpectedChar(c, self.pos)),
                None => Err(ParseError::UnexpectedEnd),
            };
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let quote = self.peek().ok_or(ParseError::UnexpectedEnd)?;
        self.advance();

        let mut result = String::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::UnclosedString),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('\\') => result.push('\\'),
                        Some('\'') => result.push('\''),
                        Some('"') => result.push('"'),
                        _ => return Err(ParseError::InvalidEscape),
                    }
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }

        Ok(result)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(ParseError::UnexpectedChar(c, self.pos)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}
