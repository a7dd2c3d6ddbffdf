//! Binary operator implementations.
//!
//! The operator set is fixed, so dispatch is a `match` on [`BinaryOp`] and
//! the operand kinds. Integer arithmetic is checked; division and modulo
//! round toward negative infinity.

use lispy_ir::BinaryOp;

use crate::errors::{arity_mismatch, division_by_zero, integer_overflow, type_mismatch};
use crate::{EvalError, EvalResult, Value};

/// Fold `values` left to right through `op`.
///
/// A single value comes back unchanged. An empty list is an arity error
/// reported against the operator's symbol.
pub fn fold(op: BinaryOp, values: Vec<Value>) -> EvalResult {
    let mut values = values.into_iter();
    let first = values
        .next()
        .ok_or_else(|| arity_mismatch(op.as_symbol(), 1, 0))?;
    values.try_fold(first, |acc, value| evaluate_binary(acc, value, op))
}

/// Evaluate one binary operation.
#[allow(clippy::needless_pass_by_value)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    if op == BinaryOp::Eq {
        return Ok(Value::Bool(values_equal(&left, &right)));
    }
    match (&left, &right) {
        (Value::Bool(a), Value::Bool(b)) if op.is_logical() => Ok(eval_bool_binary(*a, *b, op)),
        (Value::Int(a), Value::Int(b)) if !op.is_logical() => eval_int_binary(*a, *b, op),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) if !op.is_logical() => {
            eval_float_binary(as_float(&left), as_float(&right), op)
        }
        _ => Err(mismatch(op, &left, &right)),
    }
}

#[cold]
fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    type_mismatch(
        &format!("`{op}`"),
        &format!("{} and {}", left.type_name(), right.type_name()),
    )
}

/// `=`: integers and floats compare numerically, closures by identity,
/// different kinds never match.
#[allow(clippy::float_cmp)]
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(_), Value::Float(_)) | (Value::Float(_), Value::Int(_)) => {
            as_float(left) == as_float(right)
        }
        _ => left == right,
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_float(value: &Value) -> f64 {
    match value {
        Value::Int(n) => *n as f64,
        Value::Float(x) => *x,
        Value::Bool(_) | Value::Function(_) => f64::NAN,
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> Value {
    Value::Bool(match op {
        BinaryOp::Or => a || b,
        _ => a && b,
    })
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    let symbol = op.as_symbol();
    match op {
        BinaryOp::Add => a.checked_add(b).map(Value::Int).ok_or_else(|| integer_overflow(symbol)),
        BinaryOp::Sub => a.checked_sub(b).map(Value::Int).ok_or_else(|| integer_overflow(symbol)),
        BinaryOp::Mul => a.checked_mul(b).map(Value::Int).ok_or_else(|| integer_overflow(symbol)),
        BinaryOp::Div => floor_div(a, b).map(Value::Int),
        BinaryOp::Mod => floor_mod(a, b).map(Value::Int),
        BinaryOp::Pow => int_pow(a, b),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::And | BinaryOp::Or => Err(mismatch(op, &Value::Int(a), &Value::Int(b))),
    }
}

fn floor_div(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(division_by_zero());
    }
    let quotient = a.checked_div(b).ok_or_else(|| integer_overflow("/"))?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

fn floor_mod(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(division_by_zero());
    }
    // `i64::MIN % -1` overflows in hardware but is zero.
    if b == -1 {
        return Ok(0);
    }
    let remainder = a % b;
    if remainder != 0 && (remainder < 0) != (b < 0) {
        Ok(remainder + b)
    } else {
        Ok(remainder)
    }
}

/// Non-negative exponents stay integral; negative ones go through floats.
#[allow(clippy::cast_precision_loss)]
fn int_pow(base: i64, exp: i64) -> EvalResult {
    if exp < 0 {
        if base == 0 {
            return Err(division_by_zero());
        }
        return Ok(Value::Float((base as f64).powf(exp as f64)));
    }
    match u32::try_from(exp) {
        Ok(exp) => base
            .checked_pow(exp)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("^")),
        Err(_) => match base {
            0 | 1 => Ok(Value::Int(base)),
            -1 => Ok(Value::Int(if exp % 2 == 0 { 1 } else { -1 })),
            _ => Err(integer_overflow("^")),
        },
    }
}

#[allow(clippy::float_cmp)]
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Ok(Value::Float(a / b))
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            let remainder = a % b;
            if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
                Ok(Value::Float(remainder + b))
            } else {
                Ok(Value::Float(remainder))
            }
        }
        BinaryOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(division_by_zero());
            }
            Ok(Value::Float(a.powf(b)))
        }
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::And | BinaryOp::Or => Err(mismatch(op, &Value::Float(a), &Value::Float(b))),
    }
}
