//! Validation errors.
//!
//! Every check reports into one batch; a program is accepted only when the
//! batch is empty.

use std::fmt;

use quiver_diagnostic::ErrorCode;
use quiver_types::RegistryError;

/// A single static problem with a program.
///
/// Clause and parameter positions are 0-based.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("in `{function}`: unknown constructor `{constructor}`")]
    UnknownConstructor {
        function: String,
        constructor: String,
    },

    #[error("in `{function}`: constructor `{constructor}` expects {expected} field(s), got {got}")]
    ArityMismatch {
        function: String,
        constructor: String,
        expected: usize,
        got: usize,
    },

    #[error(
        "in `{function}` clause {clause}: arrow pattern cannot replace the entire pattern of parameter {parameter}"
    )]
    ArrowAtTopLevel {
        function: String,
        clause: usize,
        parameter: usize,
    },

    #[error(
        "in `{function}` clause {clause}: arrow pattern nested inside another arrow pattern in parameter {parameter}"
    )]
    NestedArrow {
        function: String,
        clause: usize,
        parameter: usize,
    },

    #[error("function `{function}` has no clauses")]
    EmptyFunction { function: String },

    #[error("in `{function}` clause {clause}: expected {expected} parameter pattern(s), got {got}")]
    ClauseArityMismatch {
        function: String,
        clause: usize,
        expected: usize,
        got: usize,
    },

    #[error("in `{function}` clause {clause}: variable `{name}` is not bound by the clause")]
    UnboundVariable {
        function: String,
        clause: usize,
        name: String,
    },

    #[error("in `{function}` clause {clause}: variable `{name}` is bound more than once")]
    DuplicateBinding {
        function: String,
        clause: usize,
        name: String,
    },

    #[error("function `{function}` is defined more than once")]
    DuplicateFunction { function: String },

    #[error(
        "in `{function}` clause {clause}: function calls itself by name; recurse through an arrow pattern instead"
    )]
    IllegalSelfCall { function: String, clause: usize },

    #[error("in `{function}`: call to unknown function `{callee}`")]
    UnknownFunction { function: String, callee: String },

    #[error("in `{function}`: `{callee}` expects {expected} argument(s), got {got}")]
    CallArityMismatch {
        function: String,
        callee: String,
        expected: usize,
        got: usize,
    },

    #[error("cyclic dependency between functions: {}", render_cycle(.cycle))]
    CyclicDependency { cycle: Vec<String> },
}

fn render_cycle(cycle: &[String]) -> String {
    let mut rendered = cycle.join(" -> ");
    if let Some(first) = cycle.first() {
        rendered.push_str(" -> ");
        rendered.push_str(first);
    }
    rendered
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::Registry(err) => err.code(),
            ValidationError::UnknownConstructor { .. } => ErrorCode::E1003,
            ValidationError::ArrowAtTopLevel { .. } => ErrorCode::E2001,
            ValidationError::NestedArrow { .. } => ErrorCode::E2002,
            ValidationError::ArityMismatch { .. } => ErrorCode::E2003,
            ValidationError::EmptyFunction { .. } => ErrorCode::E2004,
            ValidationError::ClauseArityMismatch { .. } => ErrorCode::E2005,
            ValidationError::UnboundVariable { .. } => ErrorCode::E2006,
            ValidationError::DuplicateBinding { .. } => ErrorCode::E2007,
            ValidationError::IllegalSelfCall { .. } => ErrorCode::E3001,
            ValidationError::CyclicDependency { .. } => ErrorCode::E3002,
            ValidationError::UnknownFunction { .. } => ErrorCode::E3003,
            ValidationError::CallArityMismatch { .. } => ErrorCode::E3004,
            ValidationError::DuplicateFunction { .. } => ErrorCode::E3005,
        }
    }
}

/// The non-empty batch of errors that rejected a program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty());
        ValidationErrors(errors)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Error codes in report order.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.0.iter().map(ValidationError::code).collect()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.0.len() == 1 { "error" } else { "errors" };
        write!(f, "program rejected with {} {noun}", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  [{}] {err}", err.code())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
