//! RAII scope guard for the interpreter environment.
//!
//! [`ScopedInterpreter`] pushes a frame when created and pops it when
//! dropped, including during unwinding. It holds `&mut Interpreter` and
//! implements `Deref`/`DerefMut`, so code inside the scope keeps calling
//! interpreter methods as usual.
//!
//! ```text
//! interpreter.with_bindings(bindings, |scoped| scoped.eval(body))
//! // frame popped here, whether `eval` returned Ok or Err
//! ```

use std::ops::{Deref, DerefMut};

use lispy_ir::Name;
use tracing::error;

use super::Interpreter;
use crate::Binding;

/// Guard that owns one environment frame for its lifetime.
///
/// The guard only pops the frame it pushed, so the pop can fail only if a
/// frame was popped behind its back; that is logged at `error`.
pub struct ScopedInterpreter<'a> {
    interpreter: &'a mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.interpreter.env.pop_scope() {
            error!(%err, "scope guard found no frame to pop");
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a frame and return a guard that pops it on drop.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` inside a new frame.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` inside a new frame pre-populated with `bindings`.
    pub fn with_bindings<T, F, I>(&mut self, bindings: I, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
        I: IntoIterator<Item = (Name, Binding)>,
    {
        self.with_env_scope(|scoped| {
            for (name, binding) in bindings {
                scoped.env.assign(name, binding);
            }
            f(scoped)
        })
    }
}
