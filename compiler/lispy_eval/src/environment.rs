//! Environment: the stack of scope frames.
//!
//! Frame 0 is the global scope and lives as long as the environment. Every
//! function call pushes one fresh frame on entry and pops it on exit, so
//! frames are strictly nested. Lookups walk from the innermost frame
//! outward; because frames are stacked by call order, "outward" from a
//! callee's frame is its caller's frame.
//!
//! # Self-reference guard
//!
//! A frame may hold a deferred [`Binding::Symbol`] that names the very
//! symbol it is bound to (a parameter `x` passed the caller's `x`). Such an
//! entry is a placeholder, not a match: [`Environment::get`] skips the
//! frame and keeps searching outward, which lands on the caller's binding
//! instead of looping on the placeholder forever.

use std::rc::Rc;

use lispy_ir::{FunctionDef, Name};
use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::errors::{invariant_violation, stack_exhausted, undefined_symbol};
use crate::{EvalError, Value};

/// What a symbol is bound to within one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    Value(Value),
    Function(Rc<FunctionDef>),
    /// Deferred reference to another symbol, resolved at lookup time.
    Symbol(Name),
}

impl Binding {
    /// Whether this binding is a placeholder for `name` itself.
    #[inline]
    fn refers_to_itself(&self, name: &str) -> bool {
        matches!(self, Binding::Symbol(target) if &**target == name)
    }
}

/// One layer of the scope stack.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    bindings: FxHashMap<Name, Binding>,
}

impl Frame {
    pub fn new() -> Self {
        Frame::default()
    }

    #[inline]
    pub fn bind(&mut self, name: Name, binding: Binding) {
        self.bindings.insert(name, binding);
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Scope stack for one interpreter session.
#[derive(Clone, Debug)]
pub struct Environment {
    /// Innermost frame last; index 0 is the global frame.
    frames: Vec<Frame>,
}

impl Environment {
    /// Create an environment holding only the global frame.
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame::new()],
        }
    }

    /// Number of live frames, the global frame included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True when only the global frame is live.
    #[inline]
    pub fn is_global_scope(&self) -> bool {
        self.frames.len() == 1
    }

    /// Push a new empty frame.
    #[inline]
    pub fn push_scope(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Pop the innermost frame.
    ///
    /// The global frame is never popped: asking for it is a scope
    /// discipline bug and fails with `InvariantViolation`, leaving the
    /// environment untouched.
    pub fn pop_scope(&mut self) -> Result<(), EvalError> {
        if self.is_global_scope() {
            warn!("attempted to pop the global frame");
            return Err(invariant_violation("attempted to pop the global frame"));
        }
        self.frames.pop();
        Ok(())
    }

    /// Bind `name` in the innermost frame, replacing any binding of the
    /// same name there and shadowing outer ones.
    pub fn assign(&mut self, name: Name, binding: Binding) {
        trace!(%name, depth = self.depth(), "assign");
        self.innermost_mut().bind(name, binding);
    }

    /// Find the binding for `name`, innermost frame first.
    ///
    /// A frame whose entry for `name` is a placeholder for `name` itself
    /// does not count as a match (see the module docs).
    pub fn get(&self, name: &str) -> Result<&Binding, EvalError> {
        for (depth, frame) in self.frames.iter().enumerate().rev() {
            match frame.lookup(name) {
                Some(binding) if binding.refers_to_itself(name) => {
                    trace!(name, depth, "skipping self-referencing placeholder");
                }
                Some(binding) => return Ok(binding),
                None => {}
            }
        }
        Err(undefined_symbol(name))
    }

    /// Look up `name` and follow deferred symbol bindings until a value or
    /// function is reached.
    ///
    /// Each hop starts again from the innermost frame. More than
    /// `max_hops` hops means the aliases form a cycle and is reported as
    /// `StackExhausted`.
    pub fn resolve<'a>(&'a self, name: &'a str, max_hops: usize) -> Result<&'a Binding, EvalError> {
        let mut current = name;
        for _ in 0..=max_hops {
            match self.get(current)? {
                Binding::Symbol(target) => current = &**target,
                binding => return Ok(binding),
            }
        }
        Err(stack_exhausted(max_hops))
    }

    fn innermost_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
