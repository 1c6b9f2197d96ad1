//! Lowering clause bodies to flat instruction sequences.
//!
//! A body tree becomes its post-order: operands first, then the operation
//! that consumes them. The machine runs these sequences against an operand
//! stack, so a nested call suspends the caller's frame instead of recursing
//! on the host stack. Function names are resolved to ids once, here.

use quiver_check::{CheckedProgram, FunctionId};
use quiver_ir::{BinaryOp, Expr, Name};
use quiver_stack::ensure_sufficient_stack;

/// One body instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    /// Push an integer literal.
    Int(i64),
    /// Push the value bound to a variable. Checked bodies only load names
    /// bound by their own clause's patterns.
    Load(Name),
    /// Pop `arity` operands and push the constructor applied to them.
    Construct { ctor: Name, arity: usize },
    /// Pop `arity` operands and call `function` on them.
    Call { function: FunctionId, arity: usize },
    /// Call to a name with no function behind it. A `CheckedProgram` has
    /// every callee resolved by its scope check, so lowering one never
    /// emits this; it keeps `lower` total over the body tree.
    Unresolved(Name),
    /// Pop two integers and push the result.
    Binary(BinaryOp),
}

/// Lowered bodies, indexed by function then clause.
#[derive(Debug)]
pub(crate) struct LoweredProgram {
    bodies: Vec<Vec<Box<[Op]>>>,
}

impl LoweredProgram {
    pub fn lower(program: &CheckedProgram) -> Self {
        let bodies = program
            .functions()
            .map(|(_, function)| {
                function
                    .clauses
                    .iter()
                    .map(|clause| lower_body(program, &clause.body))
                    .collect()
            })
            .collect();
        LoweredProgram { bodies }
    }

    #[inline]
    pub fn body(&self, function: FunctionId, clause: usize) -> &[Op] {
        &self.bodies[function.index()][clause]
    }
}

fn lower_body(program: &CheckedProgram, body: &Expr) -> Box<[Op]> {
    let mut ops = Vec::new();
    lower_expr(program, body, &mut ops);
    ops.into_boxed_slice()
}

fn lower_expr(program: &CheckedProgram, expr: &Expr, ops: &mut Vec<Op>) {
    ensure_sufficient_stack(|| match expr {
        Expr::Int(n) => ops.push(Op::Int(*n)),
        Expr::Var(name) => ops.push(Op::Load(*name)),
        Expr::Construct { ctor, args } => {
            for arg in args {
                lower_expr(program, arg, ops);
            }
            ops.push(Op::Construct {
                ctor: *ctor,
                arity: args.len(),
            });
        }
        Expr::Call { function, args } => {
            for arg in args {
                lower_expr(program, arg, ops);
            }
            ops.push(match program.function_id(*function) {
                Some(id) => Op::Call {
                    function: id,
                    arity: args.len(),
                },
                None => Op::Unresolved(*function),
            });
        }
        Expr::Binary { op, lhs, rhs } => {
            lower_expr(program, lhs, ops);
            lower_expr(program, rhs, ops);
            ops.push(Op::Binary(*op));
        }
    });
}
