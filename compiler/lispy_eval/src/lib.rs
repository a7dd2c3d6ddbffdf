//! Lispy Eval - tree-walking evaluator for Lispy expressions.
//!
//! # Architecture
//!
//! - `Interpreter`: dispatches on `Expr`, owns the session state
//! - `Environment`: stack of scope frames, frame 0 global
//! - `CallStack`: active calls, recursion limit, backtraces
//! - `evaluate_binary` / `fold`: the built-in operators
//!
//! Deep expressions and deep recursion run under
//! `lispy_stack::ensure_sufficient_stack`, so runaway recursion surfaces as
//! `StackExhausted` instead of overflowing the host stack.

mod diagnostics;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod value;

pub use diagnostics::{CallFrame, CallStack};
pub use environment::{Binding, Environment, Frame};
pub use errors::{
    arity_mismatch, division_by_zero, integer_overflow, invariant_violation, stack_exhausted,
    type_mismatch, undefined_symbol, unknown_operator, EvalBacktrace, EvalError, EvalErrorKind,
    EvalResult,
};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter, DEFAULT_MAX_CALL_DEPTH};
pub use operators::{evaluate_binary, fold};
pub use value::Value;

#[cfg(test)]
mod tests;
