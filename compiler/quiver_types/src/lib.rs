//! Quiver Types - the datatype registry.
//!
//! Holds every algebraic datatype of a program and answers constructor
//! lookups for the validator and the evaluator. Registration happens once
//! while a program is loaded; afterwards the registry is only read.

mod errors;
mod registry;

pub use errors::RegistryError;
pub use registry::{CtorInfo, DatatypeId, TypeRegistry};
