//! `InterpreterBuilder` for creating interpreters with custom limits.

use std::sync::Arc;

use quiver_check::CheckedProgram;
use tracing::debug;

use super::Interpreter;
use crate::lower::LoweredProgram;
use crate::{CancellationToken, EvalLimits};

/// Builder for [`Interpreter`].
///
/// Bodies are lowered once, in [`build`](Self::build).
pub struct InterpreterBuilder {
    program: Arc<CheckedProgram>,
    limits: EvalLimits,
    cancel: Option<CancellationToken>,
}

impl InterpreterBuilder {
    pub fn new(program: impl Into<Arc<CheckedProgram>>) -> Self {
        InterpreterBuilder {
            program: program.into(),
            limits: EvalLimits::default(),
            cancel: None,
        }
    }

    /// Replace all limits.
    #[must_use]
    pub fn limits(mut self, limits: EvalLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the maximum number of pending invocations.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.limits.max_depth = max_depth;
        self
    }

    /// Cap calls plus instructions per evaluation.
    #[must_use]
    pub fn step_budget(mut self, steps: u64) -> Self {
        self.limits.step_budget = Some(steps);
        self
    }

    /// Poll `token` during evaluation and stop once it is cancelled.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn build(self) -> Interpreter {
        let lowered = LoweredProgram::lower(&self.program);
        debug!(
            functions = self.program.program().functions.len(),
            max_depth = self.limits.max_depth,
            step_budget = ?self.limits.step_budget,
            "interpreter ready"
        );
        Interpreter {
            program: self.program,
            lowered,
            limits: self.limits,
            cancel: self.cancel,
        }
    }
}
