// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Call template parsing.
//!
//! A call template such as `render(input, options)` or `wrap($1.upper(input), options)`
//! describes how to reach an engine's entry point. It is parsed once, at registration
//! time, into an [`Expr`] tree which `call_shape` then binds into closures.
//!
//! ```text
//! expr    := primary postfix*
//! primary := $N | input | options | callback | 'text' | "text" | number | true | false | null
//! postfix := .ident | [ 'text' ] | [ N ] | ( expr, ... )
//! ```

use crate::errors::TemplateError;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `$N`: the primary module (0) or a secondary dependency (1..).
    Placeholder(usize),
    Input,
    Options,
    Callback,
    Literal(serde_json::Value),
    Member { target: Box<Expr>, name: String },
    Index { target: Box<Expr>, index: usize },
    Call { target: Box<Expr>, args: Vec<Expr> },
}

impl Expr {
    /// Whether the expression passes the completion callback to the engine.
    pub fn references_callback(&self) -> bool {
        match self {
            Expr::Callback => true,
            Expr::Placeholder(_) | Expr::Input | Expr::Options | Expr::Literal(_) => false,
            Expr::Member { target, .. } | Expr::Index { target, .. } => target.references_callback(),
            Expr::Call { target, args } => {
                target.references_callback() || args.iter().any(Expr::references_callback)
            }
        }
    }

    /// Highest placeholder index used, if any.
    pub fn max_placeholder(&self) -> Option<usize> {
        match self {
            Expr::Placeholder(index) => Some(*index),
            Expr::Input | Expr::Options | Expr::Callback | Expr::Literal(_) => None,
            Expr::Member { target, .. } | Expr::Index { target, .. } => target.max_placeholder(),
            Expr::Call { target, args } => args
                .iter()
                .filter_map(Expr::max_placeholder)
                .chain(target.max_placeholder())
                .max(),
        }
    }
}

/// Make the primary module the receiver of the expression.
///
/// Templates that never mention `$0` are written relative to it: `render(input)` becomes
/// `$0.render(input)`, while `(input)` and `["render"](input)` attach without a dot.
pub fn anchor_to_primary(template: &str) -> String {
    let template = template.trim();
    if template.contains("$0") {
        template.to_string()
    } else if template.starts_with('(') || template.starts_with('[') {
        format!("$0{template}")
    } else {
        format!("$0.{template}")
    }
}

pub fn parse(template: &str) -> Result<Expr, TemplateError> {
    let mut parser = Parser { src: template, pos: 0 };
    let expr = parser.expr()?;
    parser.skip_whitespace();
    if parser.pos < template.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> TemplateError {
        TemplateError::Parse {
            position: self.pos,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TemplateError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of template"))),
        }
    }

    fn expr(&mut self) -> Result<Expr, TemplateError> {
        let mut expr = self.primary()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('.') => {
                    self.bump();
                    self.skip_whitespace();
                    let name = self.identifier()?;
                    expr = Expr::Member {
                        target: Box::new(expr),
                        name,
                    };
                }
                Some('[') => {
                    self.bump();
                    self.skip_whitespace();
                    expr = match self.peek() {
                        Some('"') | Some('\'') => Expr::Member {
                            target: Box::new(expr),
                            name: self.string()?,
                        },
                        Some(c) if c.is_ascii_digit() => Expr::Index {
                            target: Box::new(expr),
                            index: self.digits()?,
                        },
                        _ => return Err(self.error("expected string or index inside '[]'")),
                    };
                    self.expect(']')?;
                }
                Some('(') => {
                    self.bump();
                    let args = self.arguments()?;
                    expr = Expr::Call {
                        target: Box::new(expr),
                        args,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    fn arguments(&mut self) -> Result<Vec<Expr>, TemplateError> {
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.bump();
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(')') => return Ok(args),
                Some(c) => return Err(self.error(format!("expected ',' or ')', found '{c}'"))),
                None => return Err(self.error("unterminated argument list")),
            }
        }
    }

    fn primary(&mut self) -> Result<Expr, TemplateError> {
        self.skip_whitespace();
        match self.peek() {
            Some('$') => {
                self.bump();
                Ok(Expr::Placeholder(self.digits()?))
            }
            Some('"') | Some('\'') => Ok(Expr::Literal(serde_json::Value::String(self.string()?))),
            Some(c) if c.is_ascii_digit() || c == '-' => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => {
                let start = self.pos;
                let ident = self.identifier()?;
                match ident.as_str() {
                    "input" => Ok(Expr::Input),
                    "options" => Ok(Expr::Options),
                    "callback" => Ok(Expr::Callback),
                    "true" => Ok(Expr::Literal(serde_json::Value::Bool(true))),
                    "false" => Ok(Expr::Literal(serde_json::Value::Bool(false))),
                    "null" => Ok(Expr::Literal(serde_json::Value::Null)),
                    other => Err(TemplateError::Parse {
                        position: start,
                        message: format!("unknown identifier '{other}'"),
                    }),
                }
            }
            Some(c) => Err(self.error(format!("expected expression, found '{c}'"))),
            None => Err(self.error("expected expression, found end of template")),
        }
    }

    fn identifier(&mut self) -> Result<String, TemplateError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' => {}
            _ => return Err(self.error("expected identifier")),
        }
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.bump();
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn digits(&mut self) -> Result<usize, TemplateError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if start == self.pos {
            return Err(self.error("expected digits"));
        }
        self.src[start..self.pos].parse().map_err(|_| TemplateError::Parse {
            position: start,
            message: "index out of range".to_string(),
        })
    }

    fn number(&mut self) -> Result<Expr, TemplateError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        {
            self.bump();
        }
        let text = &self.src[start..self.pos];
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(number @ serde_json::Value::Number(_)) => Ok(Expr::Literal(number)),
            _ => Err(TemplateError::Parse {
                position: start,
                message: format!("invalid number '{text}'"),
            }),
        }
    }

    fn string(&mut self) -> Result<String, TemplateError> {
        let start = self.pos;
        let quote = match self.bump() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.error("expected string literal")),
        };
        let mut text = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(text),
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some(c) => text.push(c),
                    None => break,
                },
                Some(c) => text.push(c),
                None => break,
            }
        }
        Err(TemplateError::Parse {
            position: start,
            message: "unterminated string literal".to_string(),
        })
    }
}
