//! Parse errors.

use lispy_ir::{Name, Span};
use lispy_lexer::LexError;

/// Syntax error for one input line.
///
/// The parser stops at the first error; there is no recovery.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        span: Span,
    },
    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: &'static str, span: Span },
    #[error("parameter `{name}` appears more than once in `{function}`")]
    DuplicateParameter {
        function: Name,
        name: Name,
        span: Span,
    },
}

impl ParseError {
    /// Where the error points in the source line.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::DuplicateParameter { span, .. } => *span,
        }
    }

    /// True when more input could complete the line (unbalanced `(`).
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParseError::UnexpectedEof { .. })
    }
}
