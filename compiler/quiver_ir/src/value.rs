//! Runtime values.
//!
//! A value is either an integer literal or a constructor application. Sub-terms
//! are shared through `Arc`, so handing a field to an arrow-triggered call
//! never copies the structure below it.
//!
//! Values can nest arbitrarily deep (a Peano numeral of a million `S`s is a
//! legal argument), so equality, measurement and drop are all iterative.
//! Rendering stops at [`MAX_DISPLAY_DEPTH`].

use std::fmt;
use std::sync::Arc;

use crate::{Name, StringInterner};

/// Nesting depth beyond which rendered values are elided as `…`.
pub const MAX_DISPLAY_DEPTH: usize = 32;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// Opaque integer literal.
    Int(i64),
    /// Constructor application.
    Ctor(Arc<CtorValue>),
}

/// A constructor applied to its field values.
pub struct CtorValue {
    pub ctor: Name,
    fields: Vec<Value>,
}

impl CtorValue {
    #[inline]
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }
}

impl Drop for CtorValue {
    fn drop(&mut self) {
        // Unlink uniquely owned sub-terms onto a work list so dropping a deep
        // value never recurses.
        let mut pending = std::mem::take(&mut self.fields);
        while let Some(value) = pending.pop() {
            if let Value::Ctor(node) = value {
                if let Ok(mut inner) = Arc::try_unwrap(node) {
                    pending.append(&mut inner.fields);
                }
            }
        }
    }
}

impl Value {
    /// Create an integer literal.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Apply constructor `ctor` to `fields`.
    #[inline]
    pub fn ctor(ctor: Name, fields: Vec<Value>) -> Self {
        Value::Ctor(Arc::new(CtorValue { ctor, fields }))
    }

    /// Nullary constructor.
    #[inline]
    pub fn unit_ctor(ctor: Name) -> Self {
        Self::ctor(ctor, Vec::new())
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Ctor(_) => None,
        }
    }

    /// Constructor name and fields, if this is a constructor application.
    #[inline]
    pub fn as_ctor(&self) -> Option<(Name, &[Value])> {
        match self {
            Value::Ctor(node) => Some((node.ctor, node.fields())),
            Value::Int(_) => None,
        }
    }

    /// Check whether this is an application of exactly `ctor`.
    #[inline]
    pub fn is_ctor(&self, ctor: Name) -> bool {
        matches!(self, Value::Ctor(node) if node.ctor == ctor)
    }

    /// Short description of the value's shape for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Ctor(_) => "constructor application",
        }
    }

    /// Number of constructor applications in the value.
    ///
    /// This is the measure that every arrow-triggered call strictly decreases.
    pub fn size(&self) -> usize {
        let mut count = 0usize;
        let mut pending = vec![self];
        while let Some(value) = pending.pop() {
            if let Value::Ctor(node) = value {
                count = count.saturating_add(1);
                pending.extend(node.fields.iter());
            }
        }
        count
    }

    /// Constructor nesting depth (0 for literals and nullary constructors).
    pub fn depth(&self) -> usize {
        let mut deepest = 0usize;
        let mut pending = vec![(self, 0usize)];
        while let Some((value, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            if let Value::Ctor(node) = value {
                let below = depth.saturating_add(1);
                pending.extend(node.fields.iter().map(|field| (field, below)));
            }
        }
        deepest
    }

    /// Render with constructor names resolved through `interner`.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> ValueDisplay<'a> {
        ValueDisplay {
            value: self,
            interner,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            match (left, right) {
                (Value::Int(a), Value::Int(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Value::Ctor(a), Value::Ctor(b)) => {
                    if Arc::ptr_eq(a, b) {
                        continue;
                    }
                    if a.ctor != b.ctor || a.fields.len() != b.fields.len() {
                        return false;
                    }
                    pending.extend(a.fields.iter().zip(b.fields.iter()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Value {}

/// Write `value` as `Ctor(field, ...)`, eliding below [`MAX_DISPLAY_DEPTH`].
///
/// Recursion here is bounded by the depth cap, not by the value.
fn render(
    value: &Value,
    f: &mut fmt::Formatter<'_>,
    depth: usize,
    name: &dyn Fn(Name, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    match value {
        Value::Int(n) => write!(f, "{n}"),
        Value::Ctor(node) => {
            if depth >= MAX_DISPLAY_DEPTH {
                return write!(f, "…");
            }
            name(node.ctor, f)?;
            if node.fields.is_empty() {
                return Ok(());
            }
            write!(f, "(")?;
            for (i, field) in node.fields.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                render(field, f, depth + 1, name)?;
            }
            write!(f, ")")
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f, 0, &|name, f| write!(f, "#{}", name.raw()))
    }
}

/// [`Value`] paired with the interner that resolves its constructor names.
pub struct ValueDisplay<'a> {
    value: &'a Value,
    interner: &'a StringInterner,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self.value, f, 0, &|name, f| {
            write!(f, "{}", self.interner.lookup(name))
        })
    }
}
