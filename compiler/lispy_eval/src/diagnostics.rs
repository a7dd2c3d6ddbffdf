//! Call-frame tracking for the evaluator.
//!
//! `CallStack` records one `CallFrame` per active function call. It
//! enforces the recursion limit in `push()` and snapshots itself into an
//! `EvalBacktrace` when an error escapes a call.

use lispy_ir::Name;

use crate::errors::stack_exhausted;
use crate::{EvalBacktrace, EvalError};

/// A single frame in the live call stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Name of the called function.
    pub name: Name,
}

impl CallFrame {
    pub fn new(name: Name) -> Self {
        CallFrame { name }
    }
}

/// Live call stack for the interpreter.
///
/// ```text
/// stack.push(CallFrame::new(name))?;
/// // ... evaluate function body ...
/// stack.pop();
/// ```
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is NOT pushed when the limit is reached.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(stack_exhausted(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent call frame.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot the active calls, most recent first.
    pub fn capture(&self) -> EvalBacktrace {
        EvalBacktrace::new(self.frames.iter().rev().map(|frame| frame.name.clone()))
    }

    /// Attach a backtrace to `err` unless it already carries one or no call
    /// is active. The innermost error site wins.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvalErrorKind;

    fn frame(name: &str) -> CallFrame {
        CallFrame::new(Name::from(name))
    }

    #[test]
    fn push_pop_tracks_depth() {
        let mut stack = CallStack::new(4);
        assert!(stack.is_empty());
        stack.push(frame("f")).unwrap();
        stack.push(frame("g")).unwrap();
        assert_eq!(stack.depth(), 2);
        stack.pop();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn push_past_limit_fails_without_pushing() {
        let mut stack = CallStack::new(2);
        stack.push(frame("f")).unwrap();
        stack.push(frame("f")).unwrap();

        let err = stack.push(frame("f")).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::StackExhausted { depth: 2 });
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn capture_lists_innermost_first() {
        let mut stack = CallStack::new(8);
        stack.push(frame("outer")).unwrap();
        stack.push(frame("inner")).unwrap();

        let backtrace = stack.capture();
        let names: Vec<&str> = backtrace.frames().iter().map(|n| &**n).collect();
        assert_eq!(names, vec!["inner", "outer"]);
    }

    #[test]
    fn capture_truncates_long_stacks() {
        let mut stack = CallStack::new(100);
        for _ in 0..20 {
            stack.push(frame("f")).unwrap();
        }
        let backtrace = stack.capture();
        assert_eq!(backtrace.frames().len(), 16);
        assert_eq!(backtrace.omitted(), 4);
    }

    #[test]
    fn attach_backtrace_keeps_the_first_one() {
        let mut stack = CallStack::new(8);
        let bare = crate::errors::division_by_zero();
        assert_eq!(stack.attach_backtrace(bare.clone()), bare);

        stack.push(frame("inner")).unwrap();
        let err = stack.attach_backtrace(bare);
        stack.push(frame("deeper")).unwrap();
        let err = stack.attach_backtrace(err);

        let backtrace = err.backtrace.unwrap();
        assert_eq!(backtrace.frames().len(), 1);
        assert_eq!(&*backtrace.frames()[0], "inner");
    }
}
