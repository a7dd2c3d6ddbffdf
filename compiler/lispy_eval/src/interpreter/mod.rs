//! Tree-walking interpreter for Lispy.
//!
//! `Interpreter::eval` dispatches on the closed [`Expr`] enum, one method
//! per variant. The interpreter owns the [`Environment`] for the whole
//! session plus the [`CallStack`] of active calls.
//!
//! # Calls
//!
//! An invocation resolves its target, checks arity, evaluates arguments in
//! the caller's frame, then evaluates the body inside a fresh frame held by
//! a [`ScopedInterpreter`] guard. The guard pops the frame on every exit
//! path, so an error leaves the environment exactly as deep as it was
//! before the call.
//!
//! Functions capture nothing. Free symbols in a body are looked up through
//! whatever frames are live when it runs.

mod builder;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use std::rc::Rc;

use lispy_ir::{BinaryOp, Expr, FunctionDef, Name};
use lispy_stack::ensure_sufficient_stack;
use tracing::{debug, debug_span, trace};

use crate::diagnostics::{CallFrame, CallStack};
use crate::errors::{arity_mismatch, invariant_violation, type_mismatch, unknown_operator};
use crate::{fold, Binding, Environment, EvalError, EvalResult, Value};

/// Call depth used when the builder is not told otherwise.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Evaluator state for one session.
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) call_stack: CallStack,
}

impl Interpreter {
    /// Interpreter with the default call depth limit.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// The session environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn max_call_depth(&self) -> usize {
        self.call_stack.max_depth()
    }

    /// Evaluate a sequence of top-level forms in order.
    ///
    /// Returns the last value, or `None` for an empty sequence. The first
    /// error stops evaluation; bindings made by earlier forms stay.
    pub fn eval_program(&mut self, forms: &[Expr]) -> Result<Option<Value>, EvalError> {
        let mut last = None;
        let mut outcome = Ok(());
        for form in forms {
            match self.eval(form) {
                Ok(value) => last = Some(value),
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }
        self.check_global_scope()?;
        outcome.map(|()| last)
    }

    /// Evaluate one expression.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult {
        trace!(kind = expr.kind_name(), "eval");
        match expr {
            Expr::Number(number) => Ok(Value::from(*number)),
            Expr::Boolean(b) => Ok(Value::Bool(*b)),
            Expr::Symbol(name) => self.eval_symbol(name),
            Expr::Operator { op, args } => self.eval_operator(op, args),
            Expr::Let { name, value } => self.eval_let(name, value),
            Expr::Definition(def) => Ok(self.eval_definition(def)),
            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => self.eval_if(cond, then_branch, else_branch),
            Expr::Invocation { target, args } => self.eval_invocation(target, args),
        }
    }

    fn eval_symbol(&self, name: &str) -> EvalResult {
        let binding = self.env.resolve(name, self.max_call_depth())?;
        trace!(name, "symbol resolved");
        binding_value(binding)
    }

    fn eval_operator(&mut self, op: &str, args: &[Expr]) -> EvalResult {
        let op = BinaryOp::from_symbol(op).ok_or_else(|| unknown_operator(op))?;
        // Every operand is evaluated before folding, `and`/`or` included.
        let values = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<Result<Vec<_>, _>>()?;
        fold(op, values)
    }

    fn eval_let(&mut self, name: &Name, operand: &Expr) -> EvalResult {
        let value = self.eval(operand)?;
        let binding = match operand {
            Expr::Symbol(target) if target != name => Binding::Symbol(target.clone()),
            _ => Binding::Value(value.clone()),
        };
        self.env.assign(name.clone(), binding);
        Ok(value)
    }

    fn eval_definition(&mut self, def: &Rc<FunctionDef>) -> Value {
        debug!(name = %def.name, arity = def.arity(), "define function");
        self.env
            .assign(def.name.clone(), Binding::Function(Rc::clone(def)));
        Value::function(def)
    }

    fn eval_if(&mut self, cond: &Expr, then_branch: &Expr, else_branch: &Expr) -> EvalResult {
        match self.eval(cond)? {
            Value::Bool(true) => self.eval(then_branch),
            Value::Bool(false) => self.eval(else_branch),
            other => Err(type_mismatch("if condition", other.type_name())),
        }
    }

    fn eval_invocation(&mut self, target: &str, args: &[Expr]) -> EvalResult {
        let def = self.resolve_function(target)?;
        if def.arity() != args.len() {
            return Err(arity_mismatch(&def.name, def.arity(), args.len()));
        }

        let mut bindings = Vec::with_capacity(args.len());
        for (param, arg) in def.params.iter().zip(args) {
            let binding = match arg {
                // Passing `x` for parameter `x`: bind a placeholder that the
                // lookup guard resolves in the caller's frame. Only a direct
                // binding qualifies; an alias in the caller would otherwise
                // be followed from the callee's frame.
                Expr::Symbol(name) if name == param => {
                    let value = self.eval_symbol(name)?;
                    if matches!(
                        self.env.get(name)?,
                        Binding::Value(_) | Binding::Function(_)
                    ) {
                        Binding::Symbol(name.clone())
                    } else {
                        Binding::Value(value)
                    }
                }
                _ => Binding::Value(self.eval(arg)?),
            };
            bindings.push((param.clone(), binding));
        }

        self.call_stack
            .push(CallFrame::new(def.name.clone()))
            .map_err(|err| self.call_stack.attach_backtrace(err))?;

        let span = debug_span!("call", function = %def.name, depth = self.call_stack.depth());
        let _entered = span.enter();
        debug!(args = bindings.len(), "enter");

        let result = self
            .with_bindings(bindings, |scoped| scoped.eval(&def.body))
            .map_err(|err| self.call_stack.attach_backtrace(err));
        self.call_stack.pop();

        debug!(ok = result.is_ok(), "exit");
        result
    }

    fn resolve_function(&self, target: &str) -> Result<Rc<FunctionDef>, EvalError> {
        match self.env.resolve(target, self.max_call_depth())? {
            Binding::Function(def) | Binding::Value(Value::Function(def)) => Ok(Rc::clone(def)),
            Binding::Value(other) => Err(type_mismatch(
                &format!("invocation of `{target}`"),
                other.type_name(),
            )),
            Binding::Symbol(name) => Err(invariant_violation(format!(
                "`{target}` resolved to the unresolved symbol `{name}`"
            ))),
        }
    }

    fn check_global_scope(&self) -> Result<(), EvalError> {
        if self.env.is_global_scope() && self.call_stack.is_empty() {
            return Ok(());
        }
        Err(invariant_violation(format!(
            "evaluation finished with {} frames and {} calls live",
            self.env.depth(),
            self.call_stack.depth()
        )))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Value a resolved binding stands for.
fn binding_value(binding: &Binding) -> EvalResult {
    match binding {
        Binding::Value(value) => Ok(value.clone()),
        Binding::Function(def) => Ok(Value::function(def)),
        Binding::Symbol(name) => Err(invariant_violation(format!(
            "deferred symbol `{name}` escaped resolution"
        ))),
    }
}

#[cfg(test)]
mod tests;
