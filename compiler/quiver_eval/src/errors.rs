//! Runtime errors.
//!
//! Every runtime failure is an [`EvalError`]: a structured [`EvalErrorKind`]
//! plus a backtrace of the invocations that were pending when it happened.

use std::fmt;

use quiver_diagnostic::ErrorCode;

/// Frames kept in a backtrace, most recent first.
pub const MAX_BACKTRACE_FRAMES: usize = 16;

/// What went wrong during evaluation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    /// No clause of `function` matched `args`.
    #[error("no clause of `{function}` matches ({})", args.join(", "))]
    NoMatch { function: String, args: Vec<String> },

    /// Pending invocations exceeded the configured depth.
    #[error("evaluation exceeded the maximum depth of {depth} pending calls")]
    StackExhaustion { depth: usize },

    #[error("evaluation exceeded its budget of {budget} steps")]
    BudgetExceeded { budget: u64 },

    #[error("evaluation was cancelled")]
    Cancelled,

    #[error("`{function}` expects {expected} argument(s), got {got}")]
    WrongArgCount {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("unknown function `{function}`")]
    UnknownFunction { function: String },

    #[error("argument {position} of `{function}` is malformed: {reason}")]
    MalformedArgument {
        function: String,
        position: usize,
        reason: String,
    },

    #[error("`{operation}` expects {expected}, found {found}")]
    TypeMismatch {
        operation: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("integer overflow in `{lhs} {op} {rhs}`")]
    IntegerOverflow { op: &'static str, lhs: i64, rhs: i64 },

    #[error("variable `{name}` is not bound in `{function}`")]
    UnboundVariable { function: String, name: String },
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::NoMatch { .. } => ErrorCode::E6001,
            EvalErrorKind::StackExhaustion { .. } => ErrorCode::E6002,
            EvalErrorKind::BudgetExceeded { .. } => ErrorCode::E6003,
            EvalErrorKind::Cancelled => ErrorCode::E6004,
            EvalErrorKind::WrongArgCount { .. } => ErrorCode::E6005,
            EvalErrorKind::UnknownFunction { .. } => ErrorCode::E6006,
            EvalErrorKind::MalformedArgument { .. } => ErrorCode::E6007,
            EvalErrorKind::TypeMismatch { .. } => ErrorCode::E6008,
            EvalErrorKind::IntegerOverflow { .. } => ErrorCode::E6009,
            EvalErrorKind::UnboundVariable { .. } => ErrorCode::E6010,
        }
    }
}

/// A runtime error with the call chain that led to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Pending invocations at the error site, most recent first, at most
    /// [`MAX_BACKTRACE_FRAMES`] entries.
    pub backtrace: Vec<String>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            backtrace: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: Vec<String>) -> Self {
        self.backtrace = backtrace;
        self
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self.kind, EvalErrorKind::NoMatch { .. })
    }

    /// Whether the failure came from a resource limit rather than the
    /// program's own semantics.
    pub fn is_resource_limit(&self) -> bool {
        matches!(
            self.kind,
            EvalErrorKind::StackExhaustion { .. }
                | EvalErrorKind::BudgetExceeded { .. }
                | EvalErrorKind::Cancelled
        )
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for frame in &self.backtrace {
            write!(f, "\n  in {frame}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

/// Result of an evaluation.
pub type EvalResult<T = quiver_ir::Value> = Result<T, EvalError>;

// Constructors for the errors raised in more than one place.

pub(crate) fn unknown_function(function: &str) -> EvalError {
    EvalErrorKind::UnknownFunction {
        function: function.to_owned(),
    }
    .into()
}

pub(crate) fn type_mismatch(
    operation: impl Into<String>,
    expected: &'static str,
    found: &'static str,
) -> EvalError {
    EvalErrorKind::TypeMismatch {
        operation: operation.into(),
        expected,
        found,
    }
    .into()
}
