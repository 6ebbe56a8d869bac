// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Predicate expressions for `valid_expr` constraints.
//!
//! ```text
//! expr    ::= and ("or" and)*
//! and     ::= unary ("and" unary)*
//! unary   ::= "not" unary | "(" expr ")" | cmp
//! cmp     ::= operand (op operand)?
//! op      ::= "==" | "=" | "!=" | "<>" | "<" | "<=" | ">" | ">="
//! operand ::= "value" | "len(value)" | integer | float | 'string' | "string"
//!           | true | false
//! ```
//!
//! Expressions are parsed once when the descriptor is built and evaluated
//! with the candidate bound to `value`.

use crate::value::PropertyValue;
use std::cmp::Ordering;
use std::fmt;

/// Parse failure with the byte offset it was detected at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateError {
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl std::error::Error for PredicateError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// The candidate value.
    Value,
    /// Character count of a string candidate, item count of a list.
    Len,
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Comparison {
        left: Operand,
        op: Operator,
        right: Operand,
    },
    Truthy(Operand),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
}

/// A parsed predicate together with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    source: String,
    expression: Expression,
}

impl Predicate {
    pub fn parse(source: &str) -> Result<Self, PredicateError> {
        let mut parser = Parser::new(source)?;
        let expression = parser.parse_or()?;
        if parser.current != Token::Eof {
            return Err(parser.error(format!("unexpected {:?}", parser.current)));
        }
        Ok(Self {
            source: source.to_string(),
            expression,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Evaluate with `value` bound to the candidate.
    pub fn evaluate(&self, value: &PropertyValue) -> bool {
        eval(&self.expression, value)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn eval(expr: &Expression, value: &PropertyValue) -> bool {
    match expr {
        Expression::Comparison { left, op, right } => {
            match (resolve(left, value), resolve(right, value)) {
                (Some(l), Some(r)) => compare(&l, *op, &r),
                _ => false,
            }
        }
        Expression::Truthy(operand) => resolve(operand, value).is_some_and(|v| truthy(&v)),
        Expression::And(l, r) => eval(l, value) && eval(r, value),
        Expression::Or(l, r) => eval(l, value) || eval(r, value),
        Expression::Not(inner) => !eval(inner, value),
    }
}

fn resolve(operand: &Operand, value: &PropertyValue) -> Option<PropertyValue> {
    match operand {
        Operand::Value => Some(value.clone()),
        Operand::Len => match value {
            PropertyValue::String(s) => i64::try_from(s.chars().count()).ok().map(PropertyValue::Int),
            PropertyValue::List(items) => i64::try_from(items.len()).ok().map(PropertyValue::Int),
            _ => None,
        },
        Operand::Integer(i) => Some(PropertyValue::Int(*i)),
        Operand::Float(f) => Some(PropertyValue::Float(*f)),
        Operand::String(s) => Some(PropertyValue::String(s.clone())),
        Operand::Boolean(b) => Some(PropertyValue::Bool(*b)),
    }
}

fn truthy(value: &PropertyValue) -> bool {
    match value {
        PropertyValue::Int(i) => *i != 0,
        PropertyValue::Float(f) => *f != 0.0,
        PropertyValue::Bool(b) => *b,
        PropertyValue::String(s) => !s.is_empty(),
        PropertyValue::List(items) => !items.is_empty(),
    }
}

fn compare(left: &PropertyValue, op: Operator, right: &PropertyValue) -> bool {
    use PropertyValue::{Bool, String};

    let ordering = match (left, right) {
        (Bool(a), Bool(b)) => {
            return match op {
                Operator::Eq => a == b,
                Operator::Ne => a != b,
                _ => false,
            }
        }
        (String(a), String(b)) => Some(a.cmp(b)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        },
    };

    let Some(ordering) = ordering else {
        return false;
    };
    match op {
        Operator::Eq => ordering == Ordering::Equal,
        Operator::Ne => ordering != Ordering::Equal,
        Operator::Lt => ordering == Ordering::Less,
        Operator::Le => ordering != Ordering::Greater,
        Operator::Gt => ordering == Ordering::Greater,
        Operator::Ge => ordering != Ordering::Less,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Identifier(String),
    Integer(i64),
    Float(f64),
    String(String),
    Operator(Operator),
    And,
    Or,
    Not,
    LParen,
    RParen,
    Eof,
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn error(&self, message: impl Into<String>) -> PredicateError {
        PredicateError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.next_char();
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.pos;
        while self
            .peek_char()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.next_char();
        }
        self.input[start..self.pos].to_string()
    }

    fn read_number(&mut self) -> Result<Token, PredicateError> {
        let start = self.pos;
        let mut has_dot = false;

        if self.peek_char() == Some('-') {
            self.next_char();
        }
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                self.next_char();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.next_char();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.pos];
        if has_dot {
            text.parse()
                .map(Token::Float)
                .map_err(|_| self.error(format!("bad number `{text}`")))
        } else {
            text.parse()
                .map(Token::Integer)
                .map_err(|_| self.error(format!("bad number `{text}`")))
        }
    }

    fn read_string(&mut self, quote: char) -> Result<Token, PredicateError> {
        self.next_char();
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if ch == quote {
                let s = self.input[start..self.pos].to_string();
                self.next_char();
                return Ok(Token::String(s));
            }
            self.next_char();
        }
        Err(self.error("unterminated string"))
    }

    fn next_token(&mut self) -> Result<Token, PredicateError> {
        self.skip_whitespace();

        let Some(ch) = self.peek_char() else {
            return Ok(Token::Eof);
        };

        match ch {
            '>' | '<' | '=' | '!' => {
                self.next_char();
                let follow = self.peek_char();
                let op = match (ch, follow) {
                    ('>', Some('=')) => Some(Operator::Ge),
                    ('<', Some('=')) => Some(Operator::Le),
                    ('<', Some('>')) | ('!', Some('=')) => Some(Operator::Ne),
                    ('=', Some('=')) => Some(Operator::Eq),
                    _ => None,
                };
                if let Some(op) = op {
                    self.next_char();
                    return Ok(Token::Operator(op));
                }
                match ch {
                    '>' => Ok(Token::Operator(Operator::Gt)),
                    '<' => Ok(Token::Operator(Operator::Lt)),
                    '=' => Ok(Token::Operator(Operator::Eq)),
                    _ => Err(self.error("expected '=' after '!'")),
                }
            }
            '(' => {
                self.next_char();
                Ok(Token::LParen)
            }
            ')' => {
                self.next_char();
                Ok(Token::RParen)
            }
            '\'' | '"' => self.read_string(ch),
            c if c.is_ascii_digit()
                || (c == '-'
                    && self.input[self.pos + 1..].starts_with(|d: char| d.is_ascii_digit())) =>
            {
                self.read_number()
            }
            c if c.is_alphabetic() || c == '_' => {
                let ident = self.read_identifier();
                Ok(match ident.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    _ => Token::Identifier(ident),
                })
            }
            other => Err(self.error(format!("unexpected character '{other}'"))),
        }
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, PredicateError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    fn error(&self, message: impl Into<String>) -> PredicateError {
        self.lexer.error(message)
    }

    fn advance(&mut self) -> Result<(), PredicateError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn parse_or(&mut self) -> Result<Expression, PredicateError> {
        let mut left = self.parse_and()?;
        while self.current == Token::Or {
            self.advance()?;
            let right = self.parse_and()?;
            left = Expression::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression, PredicateError> {
        let mut left = self.parse_unary()?;
        while self.current == Token::And {
            self.advance()?;
            let right = self.parse_unary()?;
            left = Expression::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression, PredicateError> {
        match self.current {
            Token::Not => {
                self.advance()?;
                Ok(Expression::Not(Box::new(self.parse_unary()?)))
            }
            Token::LParen => {
                self.advance()?;
                let expr = self.parse_or()?;
                if self.current != Token::RParen {
                    return Err(self.error("expected closing parenthesis"));
                }
                self.advance()?;
                Ok(expr)
            }
            _ => self.parse_comparison(),
        }
    }

    fn parse_comparison(&mut self) -> Result<Expression, PredicateError> {
        let left = self.parse_operand()?;
        let Token::Operator(op) = self.current else {
            return Ok(Expression::Truthy(left));
        };
        self.advance()?;
        let right = self.parse_operand()?;
        Ok(Expression::Comparison { left, op, right })
    }

    fn parse_operand(&mut self) -> Result<Operand, PredicateError> {
        let operand = match &self.current {
            Token::Integer(i) => Operand::Integer(*i),
            Token::Float(f) => Operand::Float(*f),
            Token::String(s) => Operand::String(s.clone()),
            Token::Identifier(name) => match name.as_str() {
                "value" => Operand::Value,
                "true" | "True" => Operand::Boolean(true),
                "false" | "False" => Operand::Boolean(false),
                "len" => return self.parse_len(),
                other => return Err(self.error(format!("unknown name `{other}`"))),
            },
            other => return Err(self.error(format!("expected operand, got {other:?}"))),
        };
        self.advance()?;
        Ok(operand)
    }

    fn parse_len(&mut self) -> Result<Operand, PredicateError> {
        self.advance()?;
        if self.current != Token::LParen {
            return Err(self.error("expected '(' after len"));
        }
        self.advance()?;
        if self.current != Token::Identifier("value".to_string()) {
            return Err(self.error("len() only accepts `value`"));
        }
        self.advance()?;
        if self.current != Token::RParen {
            return Err(self.error("expected ')' after len(value"));
        }
        self.advance()?;
        Ok(Operand::Len)
    }
}
