//! Lispy IR - expression trees shared by the front end and the evaluator.
//!
//! This crate contains:
//! - [`Span`] for byte ranges in a source line
//! - [`BinaryOp`], the fixed table of built-in operators
//! - [`Expr`] and [`FunctionDef`], the immutable expression tree
//!
//! Trees are built once by the parser and may be evaluated any number of
//! times. Function bodies are shared through `Rc` so that a definition
//! stored in the environment and the `def` node that created it point at
//! the same allocation.

mod ast;
mod operators;
mod span;

pub use ast::{Expr, FunctionDef, Name, Number};
pub use operators::BinaryOp;
pub use span::Span;
