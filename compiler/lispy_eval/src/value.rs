//! Runtime values.

use std::fmt;
use std::rc::Rc;

use lispy_ir::{FunctionDef, Number};

/// Result of evaluating an expression. Immutable once produced.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A definition ready to be invoked. Nothing is captured: free symbols
    /// in the body are looked up in whatever frames are live at call time.
    Function(Rc<FunctionDef>),
}

impl Value {
    /// Display name of the value's kind, as used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) | Value::Float(_) => "NUMBER",
            Value::Bool(_) => "BOOLEAN",
            Value::Function(_) => "FUNCTION",
        }
    }

    pub fn function(def: &Rc<FunctionDef>) -> Self {
        Value::Function(Rc::clone(def))
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(n) => Value::Int(n),
            Number::Float(x) => Value::Float(x),
        }
    }
}

/// Structural equality: variants must match and closures must be the
/// same definition. The `=` operator has its own numeric rules.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// REPL rendering: `<NUMBER: 6>`, `<BOOLEAN: TRUE>`, `<FUNCTION: fact>`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "<NUMBER: {n}>"),
            Value::Float(x) => write!(f, "<NUMBER: {x:?}>"),
            Value::Bool(true) => write!(f, "<BOOLEAN: TRUE>"),
            Value::Bool(false) => write!(f, "<BOOLEAN: FALSE>"),
            Value::Function(def) => write!(f, "<FUNCTION: {}>", def.name),
        }
    }
}
