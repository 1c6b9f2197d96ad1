//! Quiver Cont - continuous values.
//!
//! A continuous value pairs a current state with a continuation
//! `(state, event) -> state`. Applying an event yields a new continuous
//! value with the same continuation; applying a sequence is a left fold.
//!
//! - [`ContinuousValue`]: the continuation is a host closure
//! - [`ProgramContinuousValue`]: the continuation is a two-parameter
//!   function of a validated program, run by the evaluator

mod continuous;
mod program;

pub use continuous::{Continuation, ContinuousValue};
pub use program::ProgramContinuousValue;
