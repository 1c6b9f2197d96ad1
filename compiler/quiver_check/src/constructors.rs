//! Constructor well-formedness in patterns and bodies.
//!
//! Constructors of a datatype that failed to register are skipped: the
//! registry error already covers them.

use quiver_ir::{Expr, Name, Pattern};
use quiver_stack::ensure_sufficient_stack;

use crate::context::FunctionContext;
use crate::ValidationError;

pub(crate) fn check(cx: &FunctionContext<'_>, errors: &mut Vec<ValidationError>) {
    for clause in &cx.function.clauses {
        for pattern in &clause.params {
            check_pattern(cx, pattern, errors);
        }
        check_expr(cx, &clause.body, errors);
    }
}

fn check_pattern(cx: &FunctionContext<'_>, pattern: &Pattern, errors: &mut Vec<ValidationError>) {
    ensure_sufficient_stack(|| match pattern {
        Pattern::Wildcard | Pattern::Bind(_) => {}
        Pattern::As { pattern, .. } | Pattern::Arrow(pattern) => {
            check_pattern(cx, pattern, errors);
        }
        Pattern::Constructor { name, fields } => {
            check_application(cx, *name, fields.len(), errors);
            for field in fields {
                check_pattern(cx, field, errors);
            }
        }
    });
}

fn check_expr(cx: &FunctionContext<'_>, expr: &Expr, errors: &mut Vec<ValidationError>) {
    ensure_sufficient_stack(|| match expr {
        Expr::Int(_) | Expr::Var(_) => {}
        Expr::Construct { ctor, args } => {
            check_application(cx, *ctor, args.len(), errors);
            for arg in args {
                check_expr(cx, arg, errors);
            }
        }
        Expr::Call { args, .. } => {
            for arg in args {
                check_expr(cx, arg, errors);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            check_expr(cx, lhs, errors);
            check_expr(cx, rhs, errors);
        }
    });
}

fn check_application(
    cx: &FunctionContext<'_>,
    ctor: Name,
    got: usize,
    errors: &mut Vec<ValidationError>,
) {
    match cx.registry.lookup_constructor(ctor) {
        Ok(info) if info.arity != got => errors.push(ValidationError::ArityMismatch {
            function: cx.function_name(),
            constructor: cx.lookup(ctor),
            expected: info.arity,
            got,
        }),
        Ok(_) => {}
        Err(_) if cx.registry.was_rejected(ctor) => {}
        Err(_) => errors.push(ValidationError::UnknownConstructor {
            function: cx.function_name(),
            constructor: cx.lookup(ctor),
        }),
    }
}
