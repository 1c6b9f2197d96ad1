//! Quiver IR - the abstract syntax the Quiver core consumes.
//!
//! A front end (not part of this workspace) produces a [`Program`]: a set of
//! algebraic datatypes plus a set of functions, each a list of clauses whose
//! parameter patterns may contain arrow patterns. Everything here is plain
//! data; validation lives in `quiver_check` and evaluation in `quiver_eval`.
//!
//! # Design Philosophy
//!
//! - **Intern identifiers**: every constructor, function and variable name is
//!   a `Name(u32)` issued by a [`StringInterner`] shared with the program.
//! - **Closed variant sets**: [`Pattern`], [`Expr`] and [`Value`] are enums so
//!   every consumer matches exhaustively.
//! - **Immutable values**: constructor applications are reference counted and
//!   built bottom-up, so no value graph can be cyclic.

mod builder;
mod expr;
mod interner;
mod name;
mod pattern;
mod program;
mod value;

pub use builder::ProgramBuilder;
pub use expr::{BinaryOp, Expr};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use pattern::Pattern;
pub use program::{Clause, Constructor, Datatype, FieldType, FunctionDef, Program};
pub use value::{CtorValue, Value, ValueDisplay, MAX_DISPLAY_DEPTH};
