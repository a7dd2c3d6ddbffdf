//! Token cursor: lookahead and consumption over a token slice.

use lispy_ir::Span;
use lispy_lexer::{Token, TokenKind};
use tracing::trace;

use crate::ParseError;

pub(crate) struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Byte offset just past the source, for end-of-input spans.
    source_len: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a [Token], source_len: usize) -> Self {
        Cursor {
            tokens,
            pos: 0,
            source_len,
        }
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Whether the next token is `kind`, without consuming it.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek().is_some_and(|token| &token.kind == kind)
    }

    /// Consume the next token, or fail at end of input.
    pub(crate) fn advance(&mut self, expected: &'static str) -> Result<&'a Token, ParseError> {
        let token = self.peek().ok_or_else(|| self.eof_error(expected))?;
        self.pos += 1;
        Ok(token)
    }

    /// Consume the next token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a token that must be `kind`.
    pub(crate) fn expect(
        &mut self,
        kind: &TokenKind,
        expected: &'static str,
    ) -> Result<&'a Token, ParseError> {
        let token = self.advance(expected)?;
        if &token.kind == kind {
            Ok(token)
        } else {
            trace!(expected, found = %token.kind, "mismatched token");
            Err(ParseError::UnexpectedToken {
                expected,
                found: token.kind.to_string(),
                span: token.span,
            })
        }
    }

    pub(crate) fn eof_error(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedEof {
            expected,
            span: Span::point(self.source_len),
        }
    }
}
