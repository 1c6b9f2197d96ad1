//! Host-loop driver.
//!
//! A host program runs as a loop: `init()` yields the first state, then
//! `iter(state)` is called repeatedly and returns either `Some(next_state)`
//! or `None` to stop. Each call is an ordinary, terminating evaluation; the
//! loop itself is not bounded by the arrow discipline, so it stops only when
//! `iter` says so, when the iteration cap is reached, or on cancellation.

use quiver_ir::{Name, StringInterner, Value};
use tracing::{debug, trace};

use crate::errors::{type_mismatch, unknown_function};
use crate::{EvalError, EvalErrorKind, Interpreter};

/// Names of the functions and constructors making up the loop protocol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoopProtocol {
    /// Zero-argument function producing the initial state.
    pub init: Name,
    /// One-argument function from a state to `some(state)` or `none`.
    pub iter: Name,
    /// Unary constructor carrying the next state.
    pub some: Name,
    /// Nullary constructor ending the loop.
    pub none: Name,
}

impl LoopProtocol {
    /// The protocol spelled `init`, `iter`, `Some` and `None`.
    pub fn new(interner: &StringInterner) -> Result<Self, EvalError> {
        Self::named(interner, "init", "iter", "Some", "None")
    }

    /// Resolves the four names against the loaded program's interner, which
    /// is left untouched. A name the program never mentions cannot name one
    /// of its functions or constructors, so it is reported as unknown.
    pub fn named(
        interner: &StringInterner,
        init: &str,
        iter: &str,
        some: &str,
        none: &str,
    ) -> Result<Self, EvalError> {
        let resolve = |name: &str| interner.get(name).ok_or_else(|| unknown_function(name));
        Ok(LoopProtocol {
            init: resolve(init)?,
            iter: resolve(iter)?,
            some: resolve(some)?,
            none: resolve(none)?,
        })
    }
}

/// Why a host loop stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopExit {
    /// `iter` returned the `none` constructor.
    Finished,
    /// The iteration cap was reached first.
    IterationLimit,
}

/// Final state of a host loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopOutcome {
    pub state: Value,
    /// Completed calls to `iter`.
    pub iterations: u64,
    pub exit: LoopExit,
}

/// Drive `protocol` to completion, or until `max_iterations` calls to `iter`.
pub fn run_host_loop(
    interpreter: &Interpreter,
    protocol: &LoopProtocol,
    max_iterations: Option<u64>,
) -> Result<LoopOutcome, EvalError> {
    let mut state = interpreter.evaluate(protocol.init, Vec::new())?;
    let mut iterations = 0u64;
    loop {
        if max_iterations.is_some_and(|max| iterations >= max) {
            debug!(iterations, "host loop reached its iteration cap");
            return Ok(LoopOutcome {
                state,
                iterations,
                exit: LoopExit::IterationLimit,
            });
        }
        if interpreter
            .cancellation_token()
            .is_some_and(|token| token.is_cancelled())
        {
            return Err(EvalErrorKind::Cancelled.into());
        }

        let next = interpreter.evaluate(protocol.iter, vec![state.clone()])?;
        iterations += 1;
        match next.as_ctor() {
            Some((ctor, [next_state])) if ctor == protocol.some => {
                trace!(iterations, "host loop step");
                state = next_state.clone();
            }
            Some((ctor, [])) if ctor == protocol.none => {
                debug!(iterations, "host loop finished");
                return Ok(LoopOutcome {
                    state,
                    iterations,
                    exit: LoopExit::Finished,
                });
            }
            _ => {
                let interner = interpreter.interner();
                return Err(type_mismatch(
                    interner.lookup(protocol.iter),
                    "`Some(state)` or `None`",
                    next.kind_name(),
                ));
            }
        }
    }
}
