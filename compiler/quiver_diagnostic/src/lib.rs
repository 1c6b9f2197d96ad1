//! Quiver Diagnostic - error codes shared by every Quiver error type.
//!
//! Registry, validator and evaluator errors each carry a stable [`ErrorCode`]
//! so callers can match on failures without parsing messages.

mod error_code;

pub use error_code::{ErrorCode, Phase};
