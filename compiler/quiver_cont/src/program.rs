//! Continuous values whose continuation is a program function.

use std::sync::Arc;

use quiver_eval::{EvalError, EvalErrorKind, Interpreter};
use quiver_ir::{Name, Value};
use tracing::trace;

/// A state advanced by a two-parameter function `(state, event) -> state`
/// of the interpreter's program.
///
/// Each event is one evaluation, so applying events can fail with any
/// runtime error; a failure leaves the original value untouched.
#[derive(Clone, Debug)]
pub struct ProgramContinuousValue {
    state: Value,
    interpreter: Arc<Interpreter>,
    continuation: Name,
}

impl ProgramContinuousValue {
    /// Pair `state` with `continuation`, which must take two arguments.
    pub fn new(
        interpreter: Arc<Interpreter>,
        continuation: Name,
        state: Value,
    ) -> Result<Self, EvalError> {
        let program = interpreter.program();
        let name = interpreter.interner().lookup(continuation);
        let Some(id) = program.function_id(continuation) else {
            return Err(EvalErrorKind::UnknownFunction {
                function: name.to_owned(),
            }
            .into());
        };
        let arity = program.function(id).arity();
        if arity != 2 {
            return Err(EvalErrorKind::WrongArgCount {
                function: name.to_owned(),
                expected: arity,
                got: 2,
            }
            .into());
        }
        Ok(ProgramContinuousValue {
            state,
            interpreter,
            continuation,
        })
    }

    #[inline]
    pub fn state(&self) -> &Value {
        &self.state
    }

    /// Name of the continuation function.
    #[inline]
    pub fn continuation(&self) -> Name {
        self.continuation
    }

    pub fn interpreter(&self) -> &Arc<Interpreter> {
        &self.interpreter
    }

    /// The value after `event`.
    pub fn try_apply_event(&self, event: &Value) -> Result<Self, EvalError> {
        let state = self.step(&self.state, event)?;
        Ok(self.with_state(state))
    }

    /// The value after each of `events`, in order; stops at the first
    /// failing event.
    pub fn try_apply_events<'e>(
        &self,
        events: impl IntoIterator<Item = &'e Value>,
    ) -> Result<Self, EvalError> {
        let mut state = self.state.clone();
        for (index, event) in events.into_iter().enumerate() {
            trace!(index, "applying event");
            state = self.step(&state, event)?;
        }
        Ok(self.with_state(state))
    }

    /// State after applying `events`.
    pub fn try_final_value<'e>(
        &self,
        events: impl IntoIterator<Item = &'e Value>,
    ) -> Result<Value, EvalError> {
        self.try_apply_events(events).map(|cv| cv.state)
    }

    fn step(&self, state: &Value, event: &Value) -> Result<Value, EvalError> {
        self.interpreter
            .evaluate(self.continuation, vec![state.clone(), event.clone()])
    }

    fn with_state(&self, state: Value) -> Self {
        ProgramContinuousValue {
            state,
            interpreter: Arc::clone(&self.interpreter),
            continuation: self.continuation,
        }
    }
}
