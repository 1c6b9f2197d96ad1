//! Host stack guard for recursion over program text.
//!
//! Patterns and clause bodies are trees written by the front end, so the
//! validator and the body lowering walk them recursively. Their depth is
//! bounded by the program, not by runtime data, but a generated program can
//! still nest deeply enough to exhaust the default thread stack.
//!
//! Runtime recursion (function calls and arrow-triggered calls) never goes
//! through this guard: the evaluator keeps its own frame stack on the heap.
//!
//! - **Native targets**: grows the stack on demand with `stacker`.
//! - **WASM targets**: plain passthrough.

/// Minimum stack space to keep available (64KB red zone).
const RED_ZONE: usize = 64 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the host stack first if less than the red zone remains.
///
/// ```text
/// fn walk(pattern: &Pattern) -> usize {
///     ensure_sufficient_stack(|| match pattern {
///         Pattern::Constructor { fields, .. } => 1 + fields.iter().map(walk).sum::<usize>(),
///         _ => 0,
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
