//! Clause shape, variable scope and call targets.
//!
//! Every clause of a function has the same number of parameter patterns.
//! Patterns are linear: a name is bound at most once per clause, counting
//! `As` names and names inside arrow inner patterns. A body may only use
//! names its clause binds, and may only call functions that exist, with the
//! right number of arguments. Calls to the enclosing function are left to
//! the call-graph check.

use quiver_ir::{Clause, Expr, Name, Pattern};
use quiver_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use crate::context::FunctionContext;
use crate::ValidationError;

pub(crate) fn check(cx: &FunctionContext<'_>, errors: &mut Vec<ValidationError>) {
    let function = cx.function;
    let Some(first) = function.clauses.first() else {
        errors.push(ValidationError::EmptyFunction {
            function: cx.function_name(),
        });
        return;
    };
    let arity = first.params.len();

    for (index, clause) in function.clauses.iter().enumerate() {
        if clause.params.len() != arity {
            errors.push(ValidationError::ClauseArityMismatch {
                function: cx.function_name(),
                clause: index,
                expected: arity,
                got: clause.params.len(),
            });
        }
        let mut scope = ClauseScope::new(cx, index);
        scope.bind_clause(clause, errors);
        scope.check_body(&clause.body, errors);
    }
}

struct ClauseScope<'cx, 'a> {
    cx: &'cx FunctionContext<'a>,
    clause: usize,
    bound: FxHashSet<Name>,
    /// Names already reported, so each problem is reported once per clause.
    reported: FxHashSet<Name>,
}

impl<'cx, 'a> ClauseScope<'cx, 'a> {
    fn new(cx: &'cx FunctionContext<'a>, clause: usize) -> Self {
        ClauseScope {
            cx,
            clause,
            bound: FxHashSet::default(),
            reported: FxHashSet::default(),
        }
    }

    fn bind_clause(&mut self, clause: &Clause, errors: &mut Vec<ValidationError>) {
        for pattern in &clause.params {
            self.bind_pattern(pattern, errors);
        }
        self.reported.clear();
    }

    fn bind_pattern(&mut self, pattern: &Pattern, errors: &mut Vec<ValidationError>) {
        ensure_sufficient_stack(|| match pattern {
            Pattern::Wildcard => {}
            Pattern::Bind(name) => self.bind(*name, errors),
            Pattern::As { name, pattern } => {
                self.bind(*name, errors);
                self.bind_pattern(pattern, errors);
            }
            Pattern::Constructor { fields, .. } => {
                for field in fields {
                    self.bind_pattern(field, errors);
                }
            }
            Pattern::Arrow(inner) => self.bind_pattern(inner, errors),
        });
    }

    fn bind(&mut self, name: Name, errors: &mut Vec<ValidationError>) {
        if !self.bound.insert(name) && self.reported.insert(name) {
            errors.push(ValidationError::DuplicateBinding {
                function: self.cx.function_name(),
                clause: self.clause,
                name: self.cx.lookup(name),
            });
        }
    }

    fn check_body(&mut self, expr: &Expr, errors: &mut Vec<ValidationError>) {
        ensure_sufficient_stack(|| match expr {
            Expr::Int(_) => {}
            Expr::Var(name) => {
                if !self.bound.contains(name) && self.reported.insert(*name) {
                    errors.push(ValidationError::UnboundVariable {
                        function: self.cx.function_name(),
                        clause: self.clause,
                        name: self.cx.lookup(*name),
                    });
                }
            }
            Expr::Construct { args, .. } => {
                for arg in args {
                    self.check_body(arg, errors);
                }
            }
            Expr::Call { function, args } => {
                self.check_call(*function, args.len(), errors);
                for arg in args {
                    self.check_body(arg, errors);
                }
            }
            Expr::Binary { lhs, rhs, .. } => {
                self.check_body(lhs, errors);
                self.check_body(rhs, errors);
            }
        });
    }

    fn check_call(&self, callee: Name, got: usize, errors: &mut Vec<ValidationError>) {
        let cx = self.cx;
        if callee == cx.function.name {
            return;
        }
        let Some(id) = cx.functions.get(&callee) else {
            errors.push(ValidationError::UnknownFunction {
                function: cx.function_name(),
                callee: cx.lookup(callee),
            });
            return;
        };
        let target = &cx.program.functions[id.index()];
        if !target.clauses.is_empty() && target.arity() != got {
            errors.push(ValidationError::CallArityMismatch {
                function: cx.function_name(),
                callee: cx.lookup(callee),
                expected: target.arity(),
                got,
            });
        }
    }
}
