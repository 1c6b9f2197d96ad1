//! Clause matching.
//!
//! Matching is structural and never evaluates anything: an arrow pattern
//! matches whatever sub-term sits at its position and is only recorded as an
//! [`ArrowSite`]. The machine resolves the sites once the whole parameter
//! tuple has matched.
//!
//! Recursion here follows the pattern, which is program text, never the
//! value being matched.

use quiver_ir::{Pattern, Value};
use quiver_stack::ensure_sufficient_stack;

use crate::Environment;

/// An arrow pattern met while matching, waiting for its recursive call.
#[derive(Clone, Debug)]
pub(crate) struct ArrowSite<'p> {
    /// Parameter slot the sub-term came from.
    pub slot: usize,
    /// The sub-term the enclosing function is called on.
    pub term: Value,
    /// Pattern the call's result must match.
    pub inner: &'p Pattern,
}

/// Match a clause's parameter patterns against `args`, left to right.
///
/// On success the bindings are in `env` and the arrow sites, in pre-order
/// and left to right across slots, are in `arrows`. On failure both are
/// left in an unspecified state.
pub(crate) fn match_clause<'p>(
    params: &'p [Pattern],
    args: &[Value],
    env: &mut Environment,
    arrows: &mut Vec<ArrowSite<'p>>,
) -> bool {
    if params.len() != args.len() {
        return false;
    }
    params
        .iter()
        .zip(args)
        .enumerate()
        .all(|(slot, (pattern, arg))| {
            match_pattern(pattern, arg, env, &mut |term, inner| {
                arrows.push(ArrowSite { slot, term, inner });
                true
            })
        })
}

/// Match the inner pattern of an arrow against the recursive call's result.
///
/// Inner patterns contain no arrows; one that did would fail to match.
pub(crate) fn match_result(pattern: &Pattern, value: &Value, env: &mut Environment) -> bool {
    match_pattern(pattern, value, env, &mut |_, _| false)
}

fn match_pattern<'p>(
    pattern: &'p Pattern,
    value: &Value,
    env: &mut Environment,
    on_arrow: &mut dyn FnMut(Value, &'p Pattern) -> bool,
) -> bool {
    ensure_sufficient_stack(|| match pattern {
        Pattern::Wildcard => true,
        Pattern::Bind(name) => {
            env.bind(*name, value.clone());
            true
        }
        Pattern::As { name, pattern } => {
            env.bind(*name, value.clone());
            match_pattern(pattern, value, env, on_arrow)
        }
        Pattern::Constructor { name, fields } => match value.as_ctor() {
            Some((ctor, values)) if ctor == *name && values.len() == fields.len() => fields
                .iter()
                .zip(values)
                .all(|(field, value)| match_pattern(field, value, env, on_arrow)),
            _ => false,
        },
        Pattern::Arrow(inner) => on_arrow(value.clone(), &**inner),
    })
}

#[cfg(test)]
mod tests;
