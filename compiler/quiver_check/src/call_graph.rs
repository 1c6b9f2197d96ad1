//! Call graph analysis.
//!
//! Nodes are functions; there is an edge `A -> B` when a body of `A` calls
//! `B` and `B` is a different function. Self-reference by name is not an
//! edge: it is reported as an illegal self call, since a function may only
//! recur through arrow patterns.
//!
//! # Implementation Details
//!
//! - **Algorithm**: iterative Tarjan strongly connected components, O(V + E)
//!   with no host recursion. Each component with more than one function is
//!   reported once, as a cycle through all of its members.
//! - **Unknown callees**: calls to names that are not functions are left
//!   out of the graph (the scope check reports them).

use std::collections::VecDeque;

use quiver_ir::{Expr, Name, Program};
use quiver_stack::ensure_sufficient_stack;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::context::FunctionContext;
use crate::{FunctionId, ValidationError};

/// Which functions each function calls.
#[derive(Clone, Debug)]
pub struct CallGraph {
    names: Vec<Name>,
    /// Callees per function, deduplicated, in order of first call.
    edges: Vec<Vec<FunctionId>>,
}

/// Tarjan index of a function the search has not reached yet.
const UNVISITED: usize = usize::MAX;

impl CallGraph {
    /// Build the graph of calls between distinct functions.
    pub fn build(program: &Program, functions: &FxHashMap<Name, FunctionId>) -> Self {
        let mut edges = Vec::with_capacity(program.functions.len());
        for function in &program.functions {
            let mut callees = Vec::new();
            for clause in &function.clauses {
                collect_calls(&clause.body, &mut |callee| {
                    if callee == function.name {
                        return;
                    }
                    if let Some(id) = functions.get(&callee) {
                        if !callees.contains(id) {
                            callees.push(*id);
                        }
                    }
                });
            }
            edges.push(callees);
        }
        CallGraph {
            names: program.functions.iter().map(|f| f.name).collect(),
            edges,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, id: FunctionId) -> Name {
        self.names[id.index()]
    }

    /// Functions called by `id`.
    pub fn callees(&self, id: FunctionId) -> &[FunctionId] {
        &self.edges[id.index()]
    }

    /// Strongly connected components with more than one function, each
    /// listed in declaration order, ordered by their first member.
    pub fn components(&self) -> Vec<Vec<FunctionId>> {
        let count = self.edges.len();
        let mut index = vec![UNVISITED; count];
        let mut low = vec![0usize; count];
        let mut on_stack = vec![false; count];
        let mut stack: Vec<usize> = Vec::new();
        let mut next_index = 0usize;
        let mut components: Vec<Vec<usize>> = Vec::new();
        // (node, index of the next edge to follow)
        let mut work: Vec<(usize, usize)> = Vec::new();

        for root in 0..count {
            if index[root] != UNVISITED {
                continue;
            }
            index[root] = next_index;
            low[root] = next_index;
            next_index += 1;
            stack.push(root);
            on_stack[root] = true;
            work.push((root, 0));

            while let Some(top) = work.last_mut() {
                let (node, next) = *top;
                if let Some(callee) = self.edges[node].get(next) {
                    top.1 += 1;
                    let callee = callee.index();
                    if index[callee] == UNVISITED {
                        index[callee] = next_index;
                        low[callee] = next_index;
                        next_index += 1;
                        stack.push(callee);
                        on_stack[callee] = true;
                        work.push((callee, 0));
                    } else if on_stack[callee] {
                        low[node] = low[node].min(index[callee]);
                    }
                    continue;
                }

                work.pop();
                if let Some(&(parent, _)) = work.last() {
                    low[parent] = low[parent].min(low[node]);
                }
                if low[node] == index[node] {
                    let mut members = Vec::new();
                    while let Some(member) = stack.pop() {
                        on_stack[member] = false;
                        members.push(member);
                        if member == node {
                            break;
                        }
                    }
                    if members.len() > 1 {
                        members.sort_unstable();
                        components.push(members);
                    }
                }
            }
        }

        components.sort_unstable_by_key(|members| members.first().copied());
        components
            .into_iter()
            .map(|members| members.into_iter().map(FunctionId::new).collect())
            .collect()
    }

    /// One cycle per strongly connected component, in call order from the
    /// component's first function back to it.
    ///
    /// The cycle passes through every function of its component, revisiting
    /// functions where the component has no simple cycle through all of
    /// them. An acyclic graph reports none.
    pub fn cycles(&self) -> Vec<Vec<FunctionId>> {
        self.components()
            .iter()
            .map(|members| self.covering_walk(members))
            .collect()
    }

    /// Whether no cycle exists between distinct functions.
    pub fn is_acyclic(&self) -> bool {
        self.components().is_empty()
    }

    /// Closed walk through every member of a strongly connected component,
    /// always heading for the nearest member not yet visited.
    fn covering_walk(&self, members: &[FunctionId]) -> Vec<FunctionId> {
        let Some((first, rest)) = members.split_first() else {
            return Vec::new();
        };
        let start = first.index();
        let inside: FxHashSet<usize> = members.iter().map(|id| id.index()).collect();
        let mut uncovered: FxHashSet<usize> = rest.iter().map(|id| id.index()).collect();
        let mut walk = vec![start];
        let mut current = start;

        while !uncovered.is_empty() {
            let path = self.path_within(current, &inside, |node| uncovered.contains(&node));
            let Some(&last) = path.last() else {
                break;
            };
            for node in &path {
                uncovered.remove(node);
            }
            walk.extend_from_slice(&path);
            current = last;
        }

        let mut back = self.path_within(current, &inside, |node| node == start);
        back.pop();
        walk.extend(back);
        walk.into_iter().map(FunctionId::new).collect()
    }

    /// Shortest path from `from` to the first node satisfying `is_target`,
    /// staying inside `inside`. Excludes `from`, ends at the target.
    fn path_within(
        &self,
        from: usize,
        inside: &FxHashSet<usize>,
        is_target: impl Fn(usize) -> bool,
    ) -> Vec<usize> {
        let mut parent: FxHashMap<usize, usize> = FxHashMap::default();
        let mut queue = VecDeque::from([from]);
        while let Some(node) = queue.pop_front() {
            for callee in &self.edges[node] {
                let callee = callee.index();
                if !inside.contains(&callee) {
                    continue;
                }
                if is_target(callee) {
                    let mut path = vec![callee];
                    let mut at = node;
                    while at != from {
                        path.push(at);
                        match parent.get(&at) {
                            Some(&prev) => at = prev,
                            None => break,
                        }
                    }
                    path.reverse();
                    return path;
                }
                if callee == from || parent.contains_key(&callee) {
                    continue;
                }
                parent.insert(callee, node);
                queue.push_back(callee);
            }
        }
        Vec::new()
    }
}

/// Report clauses whose body calls the enclosing function by name.
pub(crate) fn check_self_calls(cx: &FunctionContext<'_>, errors: &mut Vec<ValidationError>) {
    let own = cx.function.name;
    for (clause, body) in cx.function.clauses.iter().enumerate() {
        let mut calls_self = false;
        collect_calls(&body.body, &mut |callee| calls_self |= callee == own);
        if calls_self {
            errors.push(ValidationError::IllegalSelfCall {
                function: cx.function_name(),
                clause,
            });
        }
    }
}

fn collect_calls(expr: &Expr, on_call: &mut dyn FnMut(Name)) {
    ensure_sufficient_stack(|| match expr {
        Expr::Int(_) | Expr::Var(_) => {}
        Expr::Construct { args, .. } => {
            for arg in args {
                collect_calls(arg, on_call);
            }
        }
        Expr::Call { function, args } => {
            on_call(*function);
            for arg in args {
                collect_calls(arg, on_call);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            collect_calls(lhs, on_call);
            collect_calls(rhs, on_call);
        }
    });
}
