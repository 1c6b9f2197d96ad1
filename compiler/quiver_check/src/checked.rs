//! Validated programs.

use quiver_ir::{FunctionDef, Name, Program, SharedInterner};
use quiver_types::TypeRegistry;
use rustc_hash::FxHashMap;

use crate::CallGraph;

/// Index of a function in its program's declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(u32);

impl FunctionId {
    pub(crate) fn new(position: usize) -> Self {
        FunctionId(u32::try_from(position).unwrap_or(u32::MAX))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A program that passed validation, with its registry and call graph.
///
/// Read-only from here on; evaluations share it by reference, across
/// threads included.
#[derive(Debug)]
pub struct CheckedProgram {
    program: Program,
    registry: TypeRegistry,
    functions: FxHashMap<Name, FunctionId>,
    call_graph: CallGraph,
}

impl CheckedProgram {
    pub(crate) fn new(
        program: Program,
        registry: TypeRegistry,
        functions: FxHashMap<Name, FunctionId>,
        call_graph: CallGraph,
    ) -> Self {
        CheckedProgram {
            program,
            registry,
            functions,
            call_graph,
        }
    }

    #[inline]
    pub fn program(&self) -> &Program {
        &self.program
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        self.program.interner()
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[inline]
    pub fn call_graph(&self) -> &CallGraph {
        &self.call_graph
    }

    pub fn function_id(&self, name: Name) -> Option<FunctionId> {
        self.functions.get(&name).copied()
    }

    /// Resolve a function by its source name.
    pub fn function_id_by_str(&self, name: &str) -> Option<FunctionId> {
        self.interner()
            .get(name)
            .and_then(|name| self.function_id(name))
    }

    #[inline]
    pub fn function(&self, id: FunctionId) -> &FunctionDef {
        &self.program.functions[id.index()]
    }

    /// Every function with its id, in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &FunctionDef)> {
        self.program
            .functions
            .iter()
            .enumerate()
            .map(|(position, function)| (FunctionId::new(position), function))
    }
}
