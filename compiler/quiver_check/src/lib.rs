//! Quiver Check - static validation of whole programs.
//!
//! Validation runs once, before any evaluation, and reports every problem it
//! finds in one batch:
//!
//! - **Registry**: datatypes register cleanly and their fields name known types
//! - **Arrow placement**: every arrow sits below a constructor pattern
//! - **Constructors**: patterns and bodies use registered constructors at the
//!   declared arity
//! - **Scope**: clause shapes agree, variables are bound exactly once, calls
//!   name known functions at their arity
//! - **Call graph**: no function calls itself by name, and the graph of calls
//!   between distinct functions is acyclic
//!
//! A program that passes becomes a [`CheckedProgram`], the only form the
//! evaluator accepts.

mod arrows;
mod call_graph;
mod checked;
mod constructors;
mod context;
mod errors;
mod scope;

use quiver_ir::{Name, Program};
use quiver_types::TypeRegistry;
use rustc_hash::FxHashMap;
use tracing::debug;

pub use call_graph::CallGraph;
pub use checked::{CheckedProgram, FunctionId};
pub use errors::{ValidationError, ValidationErrors};

use context::FunctionContext;

/// Validate `program`, returning every error found (empty on success).
#[tracing::instrument(level = "debug", skip_all, fields(functions = program.functions.len()))]
pub fn validate(program: &Program) -> Vec<ValidationError> {
    analyze(program).errors
}

/// Validate `program` and, if it is well formed, seal it for evaluation.
#[tracing::instrument(level = "debug", skip_all, fields(functions = program.functions.len()))]
pub fn check_program(program: Program) -> Result<CheckedProgram, ValidationErrors> {
    let Analysis {
        registry,
        functions,
        call_graph,
        errors,
    } = analyze(&program);
    if errors.is_empty() {
        Ok(CheckedProgram::new(program, registry, functions, call_graph))
    } else {
        Err(ValidationErrors::new(errors))
    }
}

struct Analysis {
    registry: TypeRegistry,
    functions: FxHashMap<Name, FunctionId>,
    call_graph: CallGraph,
    errors: Vec<ValidationError>,
}

fn analyze(program: &Program) -> Analysis {
    let interner = program.interner();
    let mut registry = TypeRegistry::new(interner.clone());
    let mut errors: Vec<ValidationError> = registry
        .register_all(program.datatypes.iter().cloned())
        .into_iter()
        .map(ValidationError::from)
        .collect();
    errors.extend(
        registry
            .check_field_types()
            .into_iter()
            .map(ValidationError::from),
    );
    let registry_errors = errors.len();

    let functions = index_functions(program, &mut errors);

    for function in &program.functions {
        let cx = FunctionContext {
            program,
            registry: &registry,
            functions: &functions,
            function,
        };
        arrows::check(&cx, &mut errors);
        constructors::check(&cx, &mut errors);
        scope::check(&cx, &mut errors);
        call_graph::check_self_calls(&cx, &mut errors);
    }

    let call_graph = CallGraph::build(program, &functions);
    for cycle in call_graph.cycles() {
        errors.push(ValidationError::CyclicDependency {
            cycle: cycle
                .iter()
                .map(|id| interner.lookup(call_graph.name(*id)).to_owned())
                .collect(),
        });
    }

    debug!(
        datatypes = registry.len(),
        registry_errors,
        errors = errors.len(),
        "validation finished"
    );

    Analysis {
        registry,
        functions,
        call_graph,
        errors,
    }
}

/// Map each function name to its first definition, reporting redefinitions.
fn index_functions(
    program: &Program,
    errors: &mut Vec<ValidationError>,
) -> FxHashMap<Name, FunctionId> {
    let mut index = FxHashMap::default();
    for (position, function) in program.functions.iter().enumerate() {
        if index.contains_key(&function.name) {
            errors.push(ValidationError::DuplicateFunction {
                function: program.interner().lookup(function.name).to_owned(),
            });
        } else {
            index.insert(function.name, FunctionId::new(position));
        }
    }
    index
}
