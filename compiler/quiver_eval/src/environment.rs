//! Clause-local variable bindings.

use quiver_ir::{Name, Value};
use smallvec::SmallVec;

/// Bindings made while matching one clause.
///
/// Patterns are linear, so a clause binds each name once; lookups scan
/// from the most recent binding. Most clauses bind a handful of names, so
/// the bindings live inline.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    bindings: SmallVec<[(Name, Value); 8]>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn bind(&mut self, name: Name, value: Value) {
        self.bindings.push((name, value));
    }

    pub fn lookup(&self, name: Name) -> Option<&Value> {
        self.bindings
            .iter()
            .rev()
            .find_map(|(bound, value)| (*bound == name).then_some(value))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Drop bindings made after the first `len`.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.bindings.truncate(len);
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}
