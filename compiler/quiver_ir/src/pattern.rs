//! Clause parameter patterns.

use crate::Name;

/// A parameter pattern.
///
/// `Arrow` is the only way a function recurses on itself: it matches the
/// sub-term in its position like a wildcard, then binds `inner` against the
/// result of calling the enclosing function on that sub-term. An arrow must
/// sit below at least one `Constructor` so the sub-term is strictly smaller
/// than the argument it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// `_`
    Wildcard,
    /// Binds the matched value.
    Bind(Name),
    /// Matches an application of exactly `name`, then each field in order.
    Constructor { name: Name, fields: Vec<Pattern> },
    /// `name @ pattern`: binds the whole value and also matches `pattern`.
    As { name: Name, pattern: Box<Pattern> },
    /// Recursive call on the sub-term here; `inner` matches the result.
    Arrow(Box<Pattern>),
}

impl Pattern {
    #[inline]
    pub fn bind(name: Name) -> Self {
        Pattern::Bind(name)
    }

    #[inline]
    pub fn ctor(name: Name, fields: Vec<Pattern>) -> Self {
        Pattern::Constructor { name, fields }
    }

    #[inline]
    pub fn alias(name: Name, pattern: Pattern) -> Self {
        Pattern::As {
            name,
            pattern: Box::new(pattern),
        }
    }

    #[inline]
    pub fn arrow(inner: Pattern) -> Self {
        Pattern::Arrow(Box::new(inner))
    }
}
