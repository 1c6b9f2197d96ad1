//! Evaluation limits and counters.
//!
//! Arrow recursion always terminates, but how deep and how long it runs is
//! proportional to the size of the input. `EvalLimits` caps both so a caller
//! can bound the resources a single evaluation may use.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Environment variable overriding [`EvalLimits::max_depth`].
pub const MAX_DEPTH_ENV: &str = "QUIVER_MAX_DEPTH";
/// Environment variable setting [`EvalLimits::step_budget`].
pub const STEP_BUDGET_ENV: &str = "QUIVER_STEP_BUDGET";

/// Resource policy for one interpreter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalLimits {
    /// Maximum number of pending invocations.
    pub max_depth: usize,
    /// Maximum number of calls plus instructions, or `None` for unbounded.
    pub step_budget: Option<u64>,
    /// Steps between polls of the cancellation token.
    pub cancel_check_interval: u32,
}

impl Default for EvalLimits {
    fn default() -> Self {
        EvalLimits {
            max_depth: 100_000,
            step_budget: None,
            cancel_check_interval: 256,
        }
    }
}

impl EvalLimits {
    /// Default limits with a step budget.
    pub fn bounded(steps: u64) -> Self {
        EvalLimits {
            step_budget: Some(steps),
            ..Self::default()
        }
    }

    /// Default limits overridden by `QUIVER_MAX_DEPTH` and
    /// `QUIVER_STEP_BUDGET`. Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut limits = Self::default();
        if let Some(depth) = lookup(MAX_DEPTH_ENV).and_then(|v| v.trim().parse().ok()) {
            limits.max_depth = depth;
        }
        if let Some(steps) = lookup(STEP_BUDGET_ENV).and_then(|v| v.trim().parse().ok()) {
            limits.step_budget = Some(steps);
        }
        limits
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_step_budget(mut self, steps: Option<u64>) -> Self {
        self.step_budget = steps;
        self
    }

    #[must_use]
    pub fn with_cancel_check_interval(mut self, interval: u32) -> Self {
        self.cancel_check_interval = interval.max(1);
        self
    }
}

/// What one evaluation did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalCounters {
    /// Invocations, including the entry call and arrow-triggered calls.
    pub calls: u64,
    /// Invocations triggered by arrow patterns.
    pub arrow_calls: u64,
    /// Clauses tried against an argument tuple.
    pub clause_attempts: u64,
    /// Body instructions executed.
    pub instructions: u64,
    /// Most invocations pending at once.
    pub max_depth: usize,
}

impl EvalCounters {
    /// Calls plus instructions: the quantity the step budget limits.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.calls.saturating_add(self.instructions)
    }

    /// Format a summary report.
    pub fn report(&self) -> String {
        format!(
            "Evaluation profile:\n  \
             calls:           {}\n  \
             arrow calls:     {}\n  \
             clause attempts: {}\n  \
             instructions:    {}\n  \
             max depth:       {}",
            self.calls, self.arrow_calls, self.clause_attempts, self.instructions, self.max_depth
        )
    }
}

/// Cooperative cancellation flag shared between a caller and evaluations.
///
/// Evaluations poll it every [`EvalLimits::cancel_check_interval`] steps and
/// fail with `Cancelled` once it is set.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the flag so the token can be reused.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}
