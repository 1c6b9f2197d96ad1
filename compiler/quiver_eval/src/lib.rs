//! Quiver Eval - the arrow-pattern evaluator.
//!
//! Runs functions of a [`CheckedProgram`](quiver_check::CheckedProgram).
//! Clauses are tried in order; the first whose patterns match the arguments
//! is selected. Each arrow pattern in the selected clause then triggers a
//! call of the same function on the sub-term at its position, and the
//! result is bound through the arrow's inner pattern before the body runs.
//!
//! # Architecture
//!
//! - `lower`: bodies become post-order instruction sequences
//! - `matcher`: structural matching that records arrow sites
//! - `machine`: explicit frame stack; no host recursion on runtime data
//! - [`Interpreter`]: argument checks, limits, batch evaluation
//! - [`run_host_loop`]: drives the `init`/`iter` protocol
//!
//! Every arrow call receives a strict sub-term of its caller's argument, so
//! evaluation terminates; [`EvalLimits`] bounds the resources it may use on
//! the way.

mod arguments;
mod environment;
mod errors;
mod host_loop;
mod interpreter;
mod limits;
mod lower;
mod machine;
mod matcher;

pub use environment::Environment;
pub use errors::{EvalError, EvalErrorKind, EvalResult, MAX_BACKTRACE_FRAMES};
pub use host_loop::{run_host_loop, LoopExit, LoopOutcome, LoopProtocol};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use limits::{
    CancellationToken, EvalCounters, EvalLimits, MAX_DEPTH_ENV, STEP_BUDGET_ENV,
};

#[cfg(test)]
mod test_helpers;
