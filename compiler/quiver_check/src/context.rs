//! Per-function view shared by the checks.

use quiver_ir::{FunctionDef, Name, Program};
use quiver_types::TypeRegistry;
use rustc_hash::FxHashMap;

use crate::FunctionId;

pub(crate) struct FunctionContext<'a> {
    pub program: &'a Program,
    pub registry: &'a TypeRegistry,
    pub functions: &'a FxHashMap<Name, FunctionId>,
    pub function: &'a FunctionDef,
}

impl FunctionContext<'_> {
    /// Name of the function being checked.
    pub fn function_name(&self) -> String {
        self.lookup(self.function.name)
    }

    pub fn lookup(&self, name: Name) -> String {
        self.program.interner().lookup(name).to_owned()
    }
}
