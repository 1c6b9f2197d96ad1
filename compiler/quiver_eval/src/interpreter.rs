//! The interpreter: a validated program plus its evaluation policy.

mod builder;

use std::sync::Arc;

use quiver_check::{CheckedProgram, FunctionId};
use quiver_ir::{Name, SharedInterner, Value};
use rayon::prelude::*;
use tracing::debug;

use crate::arguments::check_arguments;
use crate::errors::unknown_function;
use crate::lower::LoweredProgram;
use crate::machine::Machine;
use crate::{CancellationToken, EvalCounters, EvalError, EvalErrorKind, EvalLimits, EvalResult};

pub use builder::InterpreterBuilder;

/// Evaluates functions of one validated program.
///
/// Holds no per-evaluation state, so a single interpreter serves any number
/// of evaluations, concurrently included.
#[derive(Debug)]
pub struct Interpreter {
    program: Arc<CheckedProgram>,
    lowered: LoweredProgram,
    limits: EvalLimits,
    cancel: Option<CancellationToken>,
}

impl Interpreter {
    /// Interpreter with default limits and no cancellation.
    pub fn new(program: impl Into<Arc<CheckedProgram>>) -> Self {
        InterpreterBuilder::new(program).build()
    }

    pub fn builder(program: impl Into<Arc<CheckedProgram>>) -> InterpreterBuilder {
        InterpreterBuilder::new(program)
    }

    #[inline]
    pub fn program(&self) -> &CheckedProgram {
        &self.program
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        self.program.interner()
    }

    #[inline]
    pub fn limits(&self) -> &EvalLimits {
        &self.limits
    }

    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// Evaluate `function` on `args`.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = self.interner().lookup(function), args = args.len())
    )]
    pub fn evaluate(&self, function: Name, args: Vec<Value>) -> EvalResult {
        self.evaluate_with_stats(function, args).0
    }

    /// Evaluate a function given by its source name.
    pub fn evaluate_named(&self, function: &str, args: Vec<Value>) -> EvalResult {
        let name = self
            .interner()
            .get(function)
            .ok_or_else(|| unknown_function(function))?;
        self.evaluate(name, args)
    }

    /// Evaluate `function` on `args`, also reporting what the evaluation did.
    pub fn evaluate_with_stats(
        &self,
        function: Name,
        args: Vec<Value>,
    ) -> (EvalResult, EvalCounters) {
        match self.prepare(function, &args) {
            Ok(id) => {
                let machine = Machine::new(
                    &self.program,
                    &self.lowered,
                    &self.limits,
                    self.cancel.as_ref(),
                );
                let (result, counters) = machine.run(id, args);
                debug!(
                    ok = result.is_ok(),
                    calls = counters.calls,
                    arrow_calls = counters.arrow_calls,
                    instructions = counters.instructions,
                    max_depth = counters.max_depth,
                    "evaluation finished"
                );
                (result, counters)
            }
            Err(err) => (Err(err), EvalCounters::default()),
        }
    }

    /// Evaluate independent invocations in parallel.
    ///
    /// Results come back in the order of `calls`.
    pub fn evaluate_batch(&self, calls: Vec<(Name, Vec<Value>)>) -> Vec<EvalResult> {
        calls
            .into_par_iter()
            .map(|(function, args)| self.evaluate(function, args))
            .collect()
    }

    /// Resolve the entry function and check the arguments handed to it.
    fn prepare(&self, function: Name, args: &[Value]) -> Result<FunctionId, EvalError> {
        let name = self.interner().lookup(function);
        let id = self
            .program
            .function_id(function)
            .ok_or_else(|| unknown_function(name))?;
        let expected = self.program.function(id).arity();
        if args.len() != expected {
            return Err(EvalErrorKind::WrongArgCount {
                function: name.to_owned(),
                expected,
                got: args.len(),
            }
            .into());
        }
        check_arguments(&self.program, name, args)?;
        Ok(id)
    }
}
