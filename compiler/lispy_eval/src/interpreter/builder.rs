//! `InterpreterBuilder` for configuring Interpreter instances.

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::diagnostics::CallStack;
use crate::Environment;

/// Builder for [`Interpreter`].
#[derive(Clone, Debug)]
pub struct InterpreterBuilder {
    max_call_depth: usize,
    env: Option<Environment>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            env: None,
        }
    }

    /// Limit on nested function calls. Going deeper fails with
    /// `StackExhausted`. `None` keeps the default.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth.unwrap_or(DEFAULT_MAX_CALL_DEPTH);
        self
    }

    /// Start from an existing environment instead of an empty global frame.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            env: self.env.unwrap_or_default(),
            call_stack: CallStack::new(self.max_call_depth),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
