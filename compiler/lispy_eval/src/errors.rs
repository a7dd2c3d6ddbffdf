//! Evaluation errors.
//!
//! `EvalErrorKind` is the structured category; `EvalError` wraps it with an
//! optional backtrace of the function calls active when it was raised.
//! Construct errors through the `#[cold]` factory functions below rather
//! than building kinds by hand.
//!
//! Every kind is recoverable at the granularity of one input line: the
//! interpreter unwinds its frames and the session carries on.

use std::fmt;

use lispy_ir::Name;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    /// Lookup exhausted every frame.
    #[error("undefined symbol: '{name}'")]
    UndefinedSymbol { name: String },

    /// Operator token outside the built-in set.
    #[error("unknown operator: '{token}'")]
    UnknownOperator { token: String },

    /// Wrong number of arguments for a function or operator.
    #[error("'{name}' takes {expected} {}, found {got}", arguments(.expected))]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Operator or form applied to values of the wrong kind.
    #[error("type mismatch: {operation} cannot be applied to {operand}")]
    TypeMismatch { operation: String, operand: String },

    #[error("division by zero")]
    DivisionByZero,

    /// Integer result outside the 64-bit range.
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    /// Call depth (or an alias chain) exceeded the configured limit.
    #[error("stack exhausted: more than {depth} nested calls")]
    StackExhausted { depth: usize },

    /// Scope discipline was broken. Indicates an interpreter bug.
    #[error("internal invariant violated: {detail}")]
    InvariantViolation { detail: String },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn arguments(count: &usize) -> &'static str {
    if *count == 1 {
        "argument"
    } else {
        "arguments"
    }
}

/// Maximum frames kept in a captured backtrace.
const MAX_BACKTRACE_FRAMES: usize = 16;

/// Snapshot of the active function calls at an error site, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<Name>,
    /// Frames dropped beyond `MAX_BACKTRACE_FRAMES`.
    omitted: usize,
}

impl EvalBacktrace {
    /// Build from call names listed innermost first.
    pub fn new(frames: impl IntoIterator<Item = Name>) -> Self {
        let mut kept = Vec::new();
        let mut omitted = 0;
        for name in frames {
            if kept.len() < MAX_BACKTRACE_FRAMES {
                kept.push(name);
            } else {
                omitted += 1;
            }
        }
        EvalBacktrace {
            frames: kept,
            omitted,
        }
    }

    pub fn frames(&self) -> &[Name] {
        &self.frames
    }

    pub fn omitted(&self) -> usize {
        self.omitted
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "call backtrace:")?;
        for (i, name) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {name}")?;
        }
        if self.omitted > 0 {
            writeln!(f, "  ... {} more", self.omitted)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Calls active when the error was raised, if any were.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            backtrace: None,
        }
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Lookup

#[cold]
pub fn undefined_symbol(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedSymbol {
        name: name.to_string(),
    })
}

// Application

#[cold]
pub fn unknown_operator(token: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownOperator {
        token: token.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// `operation` names what was attempted (e.g. "`<`", "if condition");
/// `operand` describes what it was given (e.g. "BOOLEAN and NUMBER").
#[cold]
pub fn type_mismatch(operation: &str, operand: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        operation: operation.to_string(),
        operand: operand.to_string(),
    })
}

// Arithmetic

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

// Resources and internal state

#[cold]
pub fn stack_exhausted(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackExhausted { depth })
}

#[cold]
pub fn invariant_violation(detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvariantViolation {
        detail: detail.into(),
    })
}
