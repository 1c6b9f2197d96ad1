//! Clause body expressions.

use std::fmt;

use crate::Name;

/// A clause body.
///
/// There is no way to name the enclosing function's own recursion here:
/// a `Call` to the enclosing function is rejected by validation, and
/// recursion happens only through arrow patterns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal.
    Int(i64),
    /// Reference to a variable bound by the clause's patterns.
    Var(Name),
    /// Constructor application.
    Construct { ctor: Name, args: Vec<Expr> },
    /// Call to another function.
    Call { function: Name, args: Vec<Expr> },
    /// Integer arithmetic.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    #[inline]
    pub fn var(name: Name) -> Self {
        Expr::Var(name)
    }

    #[inline]
    pub fn construct(ctor: Name, args: Vec<Expr>) -> Self {
        Expr::Construct { ctor, args }
    }

    #[inline]
    pub fn call(function: Name, args: Vec<Expr>) -> Self {
        Expr::Call { function, args }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

/// Integer operators available in bodies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
        }
    }

    /// Apply with overflow checking.
    pub fn apply(self, lhs: i64, rhs: i64) -> Option<i64> {
        match self {
            BinaryOp::Add => lhs.checked_add(rhs),
            BinaryOp::Sub => lhs.checked_sub(rhs),
            BinaryOp::Mul => lhs.checked_mul(rhs),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
