//! Quiver - structural recursion through arrow patterns.
//!
//! Functions recurse only through arrow patterns: a pattern position marked
//! with an arrow calls the enclosing function on the sub-term found there and
//! binds the result. Since every such sub-term is strictly smaller than the
//! argument it came from, and calls between distinct functions form an
//! acyclic graph, every evaluation terminates.
//!
//! This crate re-exports the pipeline:
//!
//! 1. Assemble a [`Program`] (for instance with [`ProgramBuilder`])
//! 2. [`check_program`] validates it into a [`CheckedProgram`]
//! 3. An [`Interpreter`] evaluates its functions
//!
//! [`load`] runs steps 2 and 3 with limits taken from the environment.
//!
//! # Logging
//!
//! Call [`init_tracing`] once at startup. It does nothing unless `RUST_LOG`
//! is set; with `QUIVER_LOG_TREE` also set, spans print as an indented tree.

use std::sync::Once;

use tracing::debug;

pub use quiver_check::{
    check_program, validate, CallGraph, CheckedProgram, FunctionId, ValidationError,
    ValidationErrors,
};
pub use quiver_cont::{Continuation, ContinuousValue, ProgramContinuousValue};
pub use quiver_diagnostic::{ErrorCode, Phase};
pub use quiver_eval::{
    run_host_loop, CancellationToken, EvalCounters, EvalError, EvalErrorKind, EvalLimits,
    EvalResult, Interpreter, InterpreterBuilder, LoopExit, LoopOutcome, LoopProtocol,
};
pub use quiver_ir::{
    BinaryOp, Clause, Constructor, Datatype, Expr, FieldType, FunctionDef, Name, Pattern, Program,
    ProgramBuilder, SharedInterner, StringInterner, Value,
};
pub use quiver_types::{RegistryError, TypeRegistry};

/// Environment variable selecting hierarchical log output.
pub const LOG_TREE_ENV: &str = "QUIVER_LOG_TREE";

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Safe to call more than once; only the first call has any effect, and
/// only if `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let registry = tracing_subscriber::registry().with(filter);
        if std::env::var_os(LOG_TREE_ENV).is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        } else {
            registry
                .with(fmt::layer().with_target(true).with_level(true))
                .init();
        }
    });
}

/// Validate `program` and build an interpreter for it, with limits from
/// `QUIVER_MAX_DEPTH` and `QUIVER_STEP_BUDGET`.
pub fn load(program: Program) -> Result<Interpreter, ValidationErrors> {
    let checked = check_program(program)?;
    let limits = EvalLimits::from_env();
    debug!(?limits, "loading program");
    Ok(Interpreter::builder(checked).limits(limits).build())
}
