//! The evaluation machine.
//!
//! Every pending invocation is a [`Frame`] on an explicit stack; neither body
//! calls nor arrow-triggered calls recurse on the host stack. A frame moves
//! through three states:
//!
//! - **Select**: try clauses in order from `next_clause`
//! - **Binding**: the clause matched; issue one call per arrow site, in
//!   order, binding each result through the site's inner pattern
//! - **Body**: run the clause's lowered body against an operand stack
//!
//! A frame that needs a call suspends itself under the callee's frame and is
//! resumed with the callee's result. If an arrow result does not match its
//! inner pattern the clause fails and selection resumes at the next clause.

use quiver_check::{CheckedProgram, FunctionId};
use quiver_ir::{BinaryOp, Value};
use tracing::trace;

use crate::errors::{type_mismatch, unknown_function, MAX_BACKTRACE_FRAMES};
use crate::lower::{LoweredProgram, Op};
use crate::matcher::{match_clause, match_result, ArrowSite};
use crate::{CancellationToken, Environment, EvalCounters, EvalError, EvalErrorKind, EvalLimits};

/// One pending invocation.
struct Frame<'p> {
    function: FunctionId,
    args: Vec<Value>,
    state: FrameState<'p>,
}

enum FrameState<'p> {
    Select {
        next_clause: usize,
    },
    Binding {
        clause: usize,
        env: Environment,
        arrows: Vec<ArrowSite<'p>>,
        /// Next arrow site to resolve.
        next: usize,
    },
    Body {
        clause: usize,
        env: Environment,
        pc: usize,
        operands: Vec<Value>,
    },
}

impl Frame<'_> {
    fn new(function: FunctionId, args: Vec<Value>) -> Self {
        Frame {
            function,
            args,
            state: FrameState::Select { next_clause: 0 },
        }
    }

    /// Resume with the result of the call this frame was waiting on.
    fn resume(&mut self, value: Value) {
        match &mut self.state {
            FrameState::Body { operands, .. } => operands.push(value),
            FrameState::Binding {
                clause,
                env,
                arrows,
                next,
            } => {
                let matched = arrows
                    .get(*next)
                    .is_some_and(|site| match_result(site.inner, &value, env));
                if matched {
                    *next += 1;
                } else {
                    trace!(clause = *clause, "arrow result rejected by inner pattern");
                    let next_clause = *clause + 1;
                    self.state = FrameState::Select { next_clause };
                }
            }
            FrameState::Select { .. } => {}
        }
    }
}

/// What the current frame asks of the machine.
enum Step {
    Continue,
    Call {
        function: FunctionId,
        args: Vec<Value>,
        arrow: bool,
    },
    Return(Value),
}

/// A single evaluation in progress.
pub(crate) struct Machine<'p> {
    program: &'p CheckedProgram,
    lowered: &'p LoweredProgram,
    limits: &'p EvalLimits,
    cancel: Option<&'p CancellationToken>,
    /// Frames below the current one, innermost last.
    suspended: Vec<Frame<'p>>,
    counters: EvalCounters,
    until_poll: u32,
}

impl<'p> Machine<'p> {
    pub fn new(
        program: &'p CheckedProgram,
        lowered: &'p LoweredProgram,
        limits: &'p EvalLimits,
        cancel: Option<&'p CancellationToken>,
    ) -> Self {
        Machine {
            program,
            lowered,
            limits,
            cancel,
            suspended: Vec::new(),
            counters: EvalCounters::default(),
            until_poll: limits.cancel_check_interval.max(1),
        }
    }

    /// Evaluate `function` on `args`, which have already been checked
    /// against the function's arity and the registry.
    pub fn run(
        mut self,
        function: FunctionId,
        args: Vec<Value>,
    ) -> (Result<Value, EvalError>, EvalCounters) {
        let result = self.start(function, args);
        (result, self.counters)
    }

    fn start(&mut self, function: FunctionId, args: Vec<Value>) -> Result<Value, EvalError> {
        self.poll_cancellation()?;
        let mut current = self.enter(function, args, false, 1)?;
        self.drive(&mut current)
            .map_err(|err| self.attach_backtrace(err, &current))
    }

    fn drive(&mut self, current: &mut Frame<'p>) -> Result<Value, EvalError> {
        loop {
            match self.step(current)? {
                Step::Continue => {}
                Step::Call {
                    function,
                    args,
                    arrow,
                } => {
                    let depth = self.suspended.len() + 2;
                    let callee = self.enter(function, args, arrow, depth)?;
                    self.suspended.push(std::mem::replace(current, callee));
                }
                Step::Return(value) => match self.suspended.pop() {
                    Some(caller) => {
                        *current = caller;
                        current.resume(value);
                    }
                    None => return Ok(value),
                },
            }
        }
    }

    /// Create the frame for a call that will sit at `depth`.
    fn enter(
        &mut self,
        function: FunctionId,
        args: Vec<Value>,
        arrow: bool,
        depth: usize,
    ) -> Result<Frame<'p>, EvalError> {
        if depth > self.limits.max_depth {
            return Err(EvalErrorKind::StackExhaustion {
                depth: self.limits.max_depth,
            }
            .into());
        }
        self.counters.calls += 1;
        if arrow {
            self.counters.arrow_calls += 1;
            trace!(function = self.function_name(function), depth, "arrow call");
        }
        self.counters.max_depth = self.counters.max_depth.max(depth);
        self.charge()?;
        Ok(Frame::new(function, args))
    }

    fn step(&mut self, frame: &mut Frame<'p>) -> Result<Step, EvalError> {
        let program = self.program;
        let lowered = self.lowered;
        match &mut frame.state {
            FrameState::Select { next_clause } => {
                let start = *next_clause;
                let function = program.function(frame.function);
                for (index, clause) in function.clauses.iter().enumerate().skip(start) {
                    self.counters.clause_attempts += 1;
                    let mut env = Environment::new();
                    let mut arrows = Vec::new();
                    if !match_clause(&clause.params, &frame.args, &mut env, &mut arrows) {
                        continue;
                    }
                    trace!(
                        function = self.function_name(frame.function),
                        clause = index,
                        arrows = arrows.len(),
                        "clause selected"
                    );
                    frame.state = if arrows.is_empty() {
                        FrameState::Body {
                            clause: index,
                            env,
                            pc: 0,
                            operands: Vec::new(),
                        }
                    } else {
                        FrameState::Binding {
                            clause: index,
                            env,
                            arrows,
                            next: 0,
                        }
                    };
                    return Ok(Step::Continue);
                }
                Err(self.no_match(frame))
            }
            FrameState::Binding {
                clause,
                env,
                arrows,
                next,
            } => {
                if let Some(site) = arrows.get(*next) {
                    let mut args = frame.args.clone();
                    if let Some(slot) = args.get_mut(site.slot) {
                        *slot = site.term.clone();
                    }
                    return Ok(Step::Call {
                        function: frame.function,
                        args,
                        arrow: true,
                    });
                }
                frame.state = FrameState::Body {
                    clause: *clause,
                    env: std::mem::take(env),
                    pc: 0,
                    operands: Vec::new(),
                };
                Ok(Step::Continue)
            }
            FrameState::Body {
                clause,
                env,
                pc,
                operands,
            } => {
                let code = lowered.body(frame.function, *clause);
                while let Some(op) = code.get(*pc) {
                    *pc += 1;
                    self.counters.instructions += 1;
                    self.charge()?;
                    match op {
                        Op::Int(n) => operands.push(Value::int(*n)),
                        Op::Load(name) => match env.lookup(*name) {
                            Some(value) => operands.push(value.clone()),
                            // Unreachable for checked bodies.
                            None => {
                                return Err(EvalErrorKind::UnboundVariable {
                                    function: self.function_name(frame.function).to_owned(),
                                    name: program.interner().lookup(*name).to_owned(),
                                }
                                .into())
                            }
                        },
                        Op::Construct { ctor, arity } => {
                            let fields = take_operands(operands, *arity);
                            operands.push(Value::ctor(*ctor, fields));
                        }
                        Op::Call { function, arity } => {
                            return Ok(Step::Call {
                                function: *function,
                                args: take_operands(operands, *arity),
                                arrow: false,
                            });
                        }
                        // Never lowered from a checked program.
                        Op::Unresolved(name) => {
                            return Err(unknown_function(program.interner().lookup(*name)));
                        }
                        Op::Binary(op) => {
                            let rhs = pop_operand(operands, *op)?;
                            let lhs = pop_operand(operands, *op)?;
                            operands.push(apply_binary(*op, &lhs, &rhs)?);
                        }
                    }
                }
                let result = pop_operand_for_return(operands)?;
                Ok(Step::Return(result))
            }
        }
    }

    /// Count one step against the budget and poll for cancellation.
    fn charge(&mut self) -> Result<(), EvalError> {
        if let Some(budget) = self.limits.step_budget {
            if self.counters.steps() > budget {
                return Err(EvalErrorKind::BudgetExceeded { budget }.into());
            }
        }
        self.until_poll -= 1;
        if self.until_poll == 0 {
            self.until_poll = self.limits.cancel_check_interval.max(1);
            self.poll_cancellation()?;
        }
        Ok(())
    }

    fn poll_cancellation(&self) -> Result<(), EvalError> {
        match self.cancel {
            Some(token) if token.is_cancelled() => Err(EvalErrorKind::Cancelled.into()),
            _ => Ok(()),
        }
    }

    fn no_match(&self, frame: &Frame<'_>) -> EvalError {
        let interner = self.program.interner();
        EvalErrorKind::NoMatch {
            function: self.function_name(frame.function).to_owned(),
            args: frame
                .args
                .iter()
                .map(|arg| arg.display(interner).to_string())
                .collect(),
        }
        .into()
    }

    fn function_name(&self, function: FunctionId) -> &'static str {
        self.program
            .interner()
            .lookup(self.program.function(function).name)
    }

    /// Record the innermost pending invocations on `err`.
    fn attach_backtrace(&self, err: EvalError, current: &Frame<'_>) -> EvalError {
        let frames = std::iter::once(current)
            .chain(self.suspended.iter().rev())
            .take(MAX_BACKTRACE_FRAMES)
            .map(|frame| self.function_name(frame.function).to_owned())
            .collect();
        err.with_backtrace(frames)
    }
}

fn take_operands(operands: &mut Vec<Value>, count: usize) -> Vec<Value> {
    operands.split_off(operands.len().saturating_sub(count))
}

fn pop_operand(operands: &mut Vec<Value>, op: BinaryOp) -> Result<Value, EvalError> {
    operands
        .pop()
        .ok_or_else(|| type_mismatch(op.as_symbol(), "an operand", "nothing"))
}

fn pop_operand_for_return(operands: &mut Vec<Value>) -> Result<Value, EvalError> {
    operands
        .pop()
        .ok_or_else(|| type_mismatch("return", "a value", "nothing"))
}

fn apply_binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
    match (lhs.as_int(), rhs.as_int()) {
        (Some(a), Some(b)) => op.apply(a, b).map(Value::int).ok_or_else(|| {
            EvalErrorKind::IntegerOverflow {
                op: op.as_symbol(),
                lhs: a,
                rhs: b,
            }
            .into()
        }),
        (None, _) => Err(type_mismatch(op.as_symbol(), "an integer", lhs.kind_name())),
        (_, None) => Err(type_mismatch(op.as_symbol(), "an integer", rhs.kind_name())),
    }
}
