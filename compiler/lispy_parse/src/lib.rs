//! Lispy Parser - turns a token list into expression trees.
//!
//! Grammar (one input line may hold several forms):
//!
//! ```text
//! program    := operand*
//! operand    := NUMBER | BOOLEAN | SYMBOL | "(" expression ")"
//! expression := OP operand+
//!             | "let" SYMBOL operand
//!             | "def" SYMBOL "[" SYMBOL* "]" operand
//!             | "if" operand operand operand
//!             | SYMBOL operand*
//! ```
//!
//! The parser checks shape only. Whether a symbol is bound, or whether an
//! invocation has the right number of arguments, is decided at evaluation.

mod cursor;
mod error;

use std::rc::Rc;

use lispy_ir::{Expr, FunctionDef, Name, Number, Span};
use lispy_lexer::TokenKind;
use lispy_stack::ensure_sufficient_stack;
use tracing::trace;

use cursor::Cursor;
pub use error::ParseError;

/// Parse every form in `source`.
pub fn parse(source: &str) -> Result<Vec<Expr>, ParseError> {
    let tokens = lispy_lexer::lex(source)?;
    let mut parser = Parser {
        cursor: Cursor::new(&tokens, source.len()),
    };
    parser.parse_program()
}

struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl Parser<'_> {
    fn parse_program(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut forms = Vec::new();
        while !self.cursor.is_at_end() {
            forms.push(self.parse_operand()?);
        }
        Ok(forms)
    }

    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let token = self.cursor.advance("an operand")?;
            trace!(kind = %token.kind, span = %token.span, "operand");
            match &token.kind {
                TokenKind::Int(n) => Ok(Expr::Number(Number::Int(*n))),
                TokenKind::Float(x) => Ok(Expr::Number(Number::Float(*x))),
                TokenKind::Boolean(b) => Ok(Expr::Boolean(*b)),
                TokenKind::Symbol(name) => Ok(Expr::Symbol(name.clone())),
                TokenKind::LParen => {
                    let expr = self.parse_expression()?;
                    self.cursor.expect(&TokenKind::RParen, "`)`")?;
                    Ok(expr)
                }
                other => Err(ParseError::UnexpectedToken {
                    expected: "an operand",
                    found: other.to_string(),
                    span: token.span,
                }),
            }
        })
    }

    /// Body of a parenthesized form; the `(` is already consumed.
    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let head = self.cursor.advance("an operator, keyword or function name")?;
        match &head.kind {
            TokenKind::Op(op) => {
                let args = self.parse_operands(1)?;
                Ok(Expr::Operator {
                    op: Name::from(op.as_symbol()),
                    args,
                })
            }
            TokenKind::Let => {
                let (name, _) = self.parse_symbol()?;
                let value = self.parse_operand()?;
                Ok(Expr::Let {
                    name,
                    value: Box::new(value),
                })
            }
            TokenKind::Def => self.parse_definition(),
            TokenKind::If => {
                let cond = self.parse_operand()?;
                let then_branch = self.parse_operand()?;
                let else_branch = self.parse_operand()?;
                Ok(Expr::if_else(cond, then_branch, else_branch))
            }
            TokenKind::Symbol(target) => {
                let args = self.parse_operands(0)?;
                Ok(Expr::Invocation {
                    target: target.clone(),
                    args,
                })
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "an operator, keyword or function name",
                found: other.to_string(),
                span: head.span,
            }),
        }
    }

    /// Operands up to (not including) the closing `)`.
    fn parse_operands(&mut self, at_least: usize) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        while !self.cursor.check(&TokenKind::RParen) {
            if self.cursor.is_at_end() {
                return Err(self.cursor.eof_error("`)`"));
            }
            args.push(self.parse_operand()?);
        }
        if args.len() < at_least {
            // Report the `)` that arrived too early.
            let token = self.cursor.advance("an operand")?;
            return Err(ParseError::UnexpectedToken {
                expected: "an operand",
                found: token.kind.to_string(),
                span: token.span,
            });
        }
        Ok(args)
    }

    fn parse_definition(&mut self) -> Result<Expr, ParseError> {
        let (name, _) = self.parse_symbol()?;
        self.cursor.expect(&TokenKind::LBracket, "`[`")?;

        let mut params: Vec<Name> = Vec::new();
        while !self.cursor.eat(&TokenKind::RBracket) {
            let (param, span) = self.parse_symbol()?;
            if params.contains(&param) {
                return Err(ParseError::DuplicateParameter {
                    function: name,
                    name: param,
                    span,
                });
            }
            params.push(param);
        }

        let body = self.parse_operand()?;
        trace!(%name, arity = params.len(), "definition");
        Ok(Expr::Definition(Rc::new(FunctionDef::new(name, params, body))))
    }

    fn parse_symbol(&mut self) -> Result<(Name, Span), ParseError> {
        let token = self.cursor.advance("a symbol")?;
        match &token.kind {
            TokenKind::Symbol(name) => Ok((name.clone(), token.span)),
            other => Err(ParseError::UnexpectedToken {
                expected: "a symbol",
                found: other.to_string(),
                span: token.span,
            }),
        }
    }
}

#[cfg(test)]
mod tests;
