//! Argument validation.
//!
//! Callers build argument values outside the program, so before evaluation
//! each one is checked against the registry: every constructor must exist,
//! carry its declared number of fields, and fit the declared field types.
//! The walk is iterative and visits each shared sub-term once.

use std::sync::Arc;

use quiver_check::CheckedProgram;
use quiver_ir::{FieldType, Value};
use rustc_hash::FxHashSet;

use crate::{EvalError, EvalErrorKind};

pub(crate) fn check_arguments(
    program: &CheckedProgram,
    function: &str,
    args: &[Value],
) -> Result<(), EvalError> {
    let registry = program.registry();
    let interner = program.interner();
    let malformed = |position: usize, reason: String| -> EvalError {
        EvalErrorKind::MalformedArgument {
            function: function.to_owned(),
            position,
            reason,
        }
        .into()
    };

    let mut visited: FxHashSet<*const quiver_ir::CtorValue> = FxHashSet::default();
    for (position, arg) in args.iter().enumerate() {
        let mut pending: Vec<(&Value, Option<FieldType>)> = vec![(arg, None)];
        while let Some((value, expected)) = pending.pop() {
            let node = match (value, expected) {
                (Value::Int(_), None | Some(FieldType::Int)) => continue,
                (Value::Int(_), Some(FieldType::Named(ty))) => {
                    return Err(malformed(
                        position,
                        format!("expected a `{}` value, found an integer", interner.lookup(ty)),
                    ));
                }
                (Value::Ctor(node), _) => node,
            };
            let name = interner.lookup(node.ctor);
            let info = registry
                .lookup_constructor(node.ctor)
                .map_err(|_| malformed(position, format!("unknown constructor `{name}`")))?;
            let datatype = registry.datatype(info.datatype);
            match expected {
                Some(FieldType::Int) => {
                    return Err(malformed(
                        position,
                        format!("expected an integer, found `{name}`"),
                    ));
                }
                Some(FieldType::Named(ty)) if ty != datatype.name => {
                    return Err(malformed(
                        position,
                        format!(
                            "`{name}` builds a `{}`, expected a `{}`",
                            interner.lookup(datatype.name),
                            interner.lookup(ty)
                        ),
                    ));
                }
                _ => {}
            }
            if node.fields().len() != info.arity {
                return Err(malformed(
                    position,
                    format!(
                        "`{name}` expects {} field(s), got {}",
                        info.arity,
                        node.fields().len()
                    ),
                ));
            }
            if !visited.insert(Arc::as_ptr(node)) {
                continue;
            }
            let field_types = datatype
                .constructors
                .get(info.index)
                .map_or(&[][..], |ctor| &ctor.fields[..]);
            pending.extend(
                node.fields()
                    .iter()
                    .zip(field_types)
                    .map(|(field, ty)| (field, Some(*ty))),
            );
        }
    }
    Ok(())
}
