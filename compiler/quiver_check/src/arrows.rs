//! Arrow placement.
//!
//! An arrow recurses on the sub-term in its position, so it must sit below at
//! least one constructor pattern of the parameter: that makes the sub-term a
//! strict part of the argument. An arrow inside another arrow's inner pattern
//! would recurse on part of a result rather than part of the argument.

use quiver_ir::Pattern;
use quiver_stack::ensure_sufficient_stack;

use crate::context::FunctionContext;
use crate::ValidationError;

#[derive(Copy, Clone, PartialEq, Eq)]
enum Position {
    /// The parameter pattern itself, possibly under `As` wrappers.
    Root,
    /// Below at least one constructor pattern.
    UnderConstructor,
    /// Inside an arrow's inner pattern.
    InsideArrow,
}

pub(crate) fn check(cx: &FunctionContext<'_>, errors: &mut Vec<ValidationError>) {
    for (clause, body) in cx.function.clauses.iter().enumerate() {
        for (parameter, pattern) in body.params.iter().enumerate() {
            let site = Site { clause, parameter };
            walk(cx, site, pattern, Position::Root, errors);
        }
    }
}

#[derive(Copy, Clone)]
struct Site {
    clause: usize,
    parameter: usize,
}

fn walk(
    cx: &FunctionContext<'_>,
    site: Site,
    pattern: &Pattern,
    position: Position,
    errors: &mut Vec<ValidationError>,
) {
    ensure_sufficient_stack(|| match pattern {
        Pattern::Wildcard | Pattern::Bind(_) => {}
        Pattern::As { pattern, .. } => walk(cx, site, pattern, position, errors),
        Pattern::Constructor { fields, .. } => {
            let below = if position == Position::InsideArrow {
                Position::InsideArrow
            } else {
                Position::UnderConstructor
            };
            for field in fields {
                walk(cx, site, field, below, errors);
            }
        }
        Pattern::Arrow(inner) => {
            match position {
                Position::Root => errors.push(ValidationError::ArrowAtTopLevel {
                    function: cx.function_name(),
                    clause: site.clause,
                    parameter: site.parameter,
                }),
                Position::InsideArrow => errors.push(ValidationError::NestedArrow {
                    function: cx.function_name(),
                    clause: site.clause,
                    parameter: site.parameter,
                }),
                Position::UnderConstructor => {}
            }
            walk(cx, site, inner, Position::InsideArrow, errors);
        }
    });
}
