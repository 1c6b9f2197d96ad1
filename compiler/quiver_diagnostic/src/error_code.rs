//! Error codes for all Quiver diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the phase that reports it.

use std::fmt;

/// Error codes for all Quiver diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Datatype registry errors
/// - E2xxx: Pattern and clause shape errors
/// - E3xxx: Call graph errors
/// - E6xxx: Runtime / eval errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Registry Errors (E1xxx)
    /// Datatype name registered twice
    E1001,
    /// Constructor name collides with an already registered constructor
    E1002,
    /// Constructor name not registered
    E1003,
    /// Constructor field references an unregistered datatype
    E1004,

    // Shape Errors (E2xxx)
    /// Arrow pattern is the whole parameter pattern
    E2001,
    /// Arrow pattern nested inside another arrow pattern
    E2002,
    /// Constructor used with the wrong number of fields
    E2003,
    /// Function has no clauses
    E2004,
    /// Clause parameter count differs from the function's arity
    E2005,
    /// Variable referenced in a body is not bound by the clause
    E2006,
    /// Variable bound twice in one clause
    E2007,

    // Call Graph Errors (E3xxx)
    /// Function body calls its own function by name
    E3001,
    /// Cycle between distinct functions
    E3002,
    /// Body calls a function that is not defined
    E3003,
    /// Call supplies the wrong number of arguments
    E3004,
    /// Function name defined twice
    E3005,

    // Runtime Errors (E6xxx)
    /// No clause matched the arguments
    E6001,
    /// Frame stack exhausted
    E6002,
    /// Step budget exhausted
    E6003,
    /// Evaluation cancelled
    E6004,
    /// Entry call supplied the wrong number of arguments
    E6005,
    /// Entry function not defined
    E6006,
    /// Argument value is not a well-formed constructor application
    E6007,
    /// Arithmetic applied to a non-integer value
    E6008,
    /// Integer overflow in arithmetic
    E6009,
    /// Variable not bound at runtime
    E6010,
}

/// Phase that reports a given error code.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Registry,
    Shape,
    CallGraph,
    Runtime,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            // Registry
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            // Shape
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            // Call graph
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            // Runtime
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
        }
    }

    /// One-line summary, used for `--explain`-style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "duplicate datatype",
            ErrorCode::E1002 => "duplicate constructor",
            ErrorCode::E1003 => "unknown constructor",
            ErrorCode::E1004 => "unknown type in constructor field",
            ErrorCode::E2001 => "arrow pattern replaces the entire parameter pattern",
            ErrorCode::E2002 => "arrow pattern nested inside another arrow pattern",
            ErrorCode::E2003 => "constructor arity mismatch",
            ErrorCode::E2004 => "function has no clauses",
            ErrorCode::E2005 => "clause arity mismatch",
            ErrorCode::E2006 => "unbound variable",
            ErrorCode::E2007 => "variable bound more than once",
            ErrorCode::E3001 => "function calls itself by name",
            ErrorCode::E3002 => "cyclic dependency between functions",
            ErrorCode::E3003 => "unknown function",
            ErrorCode::E3004 => "call arity mismatch",
            ErrorCode::E3005 => "duplicate function",
            ErrorCode::E6001 => "no clause matches",
            ErrorCode::E6002 => "evaluation stack exhausted",
            ErrorCode::E6003 => "step budget exceeded",
            ErrorCode::E6004 => "evaluation cancelled",
            ErrorCode::E6005 => "wrong argument count",
            ErrorCode::E6006 => "unknown entry function",
            ErrorCode::E6007 => "malformed argument value",
            ErrorCode::E6008 => "type mismatch",
            ErrorCode::E6009 => "integer overflow",
            ErrorCode::E6010 => "unbound variable at runtime",
        }
    }

    /// The phase that reports this code, derived from its leading digit.
    pub fn phase(&self) -> Phase {
        match self.as_str().as_bytes().get(1) {
            Some(b'1') => Phase::Registry,
            Some(b'2') => Phase::Shape,
            Some(b'3') => Phase::CallGraph,
            _ => Phase::Runtime,
        }
    }

    /// Check if this error is reported before any evaluation runs.
    pub fn is_static(&self) -> bool {
        self.phase() != Phase::Runtime
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
