//! Host stack growth for deep recursion.
//!
//! Both the parser (nested parentheses) and the evaluator (nested calls)
//! recurse once per level of the input. Wrapping each level in
//! [`ensure_sufficient_stack`] lets the host stack grow on demand, so the
//! evaluator's own call-depth limit is what stops runaway recursion rather
//! than a hard stack overflow.
//!
//! On `wasm32` the wrapper is a plain call.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
