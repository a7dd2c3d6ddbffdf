//! Lispy Lexer - turns one source line into a token list.
//!
//! Tokenizing happens in two steps: logos recognizes [`RawToken`]s, then
//! [`lex`] converts numeric literals and symbol names into a [`TokenKind`]
//! carrying the cooked value. Comments (`; ...`) are dropped.

mod raw_token;

use std::fmt;

use lispy_ir::{BinaryOp, Name, Span};
use logos::Logos;
use raw_token::RawToken;

/// Lexing failure. Lexing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character `{ch}`")]
    UnexpectedChar { ch: char, span: Span },
    #[error("integer literal `{text}` does not fit in 64 bits")]
    IntegerTooLarge { text: String, span: Span },
    #[error("invalid number literal `{text}`")]
    InvalidNumber { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. }
            | LexError::IntegerTooLarge { span, .. }
            | LexError::InvalidNumber { span, .. } => *span,
        }
    }
}

/// Cooked token kind.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    LBracket,
    RBracket,
    Let,
    Def,
    If,
    Boolean(bool),
    Int(i64),
    Float(f64),
    Symbol(Name),
    /// Any built-in operator, including the `and`/`or` keywords.
    Op(BinaryOp),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::LBracket => write!(f, "`[`"),
            TokenKind::RBracket => write!(f, "`]`"),
            TokenKind::Let => write!(f, "`let`"),
            TokenKind::Def => write!(f, "`def`"),
            TokenKind::If => write!(f, "`if`"),
            TokenKind::Boolean(true) => write!(f, "`TRUE`"),
            TokenKind::Boolean(false) => write!(f, "`FALSE`"),
            TokenKind::Int(n) => write!(f, "number `{n}`"),
            TokenKind::Float(x) => write!(f, "number `{x:?}`"),
            TokenKind::Symbol(name) => write!(f, "symbol `{name}`"),
            TokenKind::Op(op) => write!(f, "operator `{op}`"),
        }
    }
}

/// A token and where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Tokenize `source`.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(raw) = lexer.next() {
        let span = Span::from(lexer.span());
        let text = lexer.slice();
        let Ok(raw) = raw else {
            let ch = text.chars().next().unwrap_or('\0');
            return Err(LexError::UnexpectedChar { ch, span });
        };
        let kind = match raw {
            RawToken::Comment => continue,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Let => TokenKind::Let,
            RawToken::Def => TokenKind::Def,
            RawToken::If => TokenKind::If,
            RawToken::True => TokenKind::Boolean(true),
            RawToken::False => TokenKind::Boolean(false),
            RawToken::Plus => TokenKind::Op(BinaryOp::Add),
            RawToken::Minus => TokenKind::Op(BinaryOp::Sub),
            RawToken::Star => TokenKind::Op(BinaryOp::Mul),
            RawToken::Slash => TokenKind::Op(BinaryOp::Div),
            RawToken::Percent => TokenKind::Op(BinaryOp::Mod),
            RawToken::Caret => TokenKind::Op(BinaryOp::Pow),
            RawToken::Eq => TokenKind::Op(BinaryOp::Eq),
            RawToken::Lt => TokenKind::Op(BinaryOp::Lt),
            RawToken::Gt => TokenKind::Op(BinaryOp::Gt),
            RawToken::LtEq => TokenKind::Op(BinaryOp::LtEq),
            RawToken::GtEq => TokenKind::Op(BinaryOp::GtEq),
            RawToken::And => TokenKind::Op(BinaryOp::And),
            RawToken::Or => TokenKind::Op(BinaryOp::Or),
            RawToken::Int => TokenKind::Int(cook_int(text, span)?),
            RawToken::Float => TokenKind::Float(cook_float(text, span)?),
            RawToken::Symbol => TokenKind::Symbol(Name::from(text)),
        };
        tokens.push(Token::new(kind, span));
    }

    Ok(tokens)
}

fn cook_int(text: &str, span: Span) -> Result<i64, LexError> {
    text.parse().map_err(|_| LexError::IntegerTooLarge {
        text: text.to_string(),
        span,
    })
}

fn cook_float(text: &str, span: Span) -> Result<f64, LexError> {
    text.parse().map_err(|_| LexError::InvalidNumber {
        text: text.to_string(),
        span,
    })
}
