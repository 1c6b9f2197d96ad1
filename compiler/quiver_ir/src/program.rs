//! Datatypes, functions and programs.

use crate::{Expr, Name, Pattern, SharedInterner};

/// Type of a constructor field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Integer literal.
    Int,
    /// A datatype by name; may be the constructor's own datatype.
    Named(Name),
}

/// A named, fixed-arity constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    pub name: Name,
    pub fields: Vec<FieldType>,
}

impl Constructor {
    #[inline]
    pub fn arity(&self) -> usize {
        self.fields.len()
    }
}

/// An algebraic datatype: a closed, ordered set of constructors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Datatype {
    pub name: Name,
    pub constructors: Vec<Constructor>,
}

/// One alternative of a function: a pattern per parameter and a body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    pub params: Vec<Pattern>,
    pub body: Expr,
}

impl Clause {
    pub fn new(params: Vec<Pattern>, body: Expr) -> Self {
        Clause { params, body }
    }
}

/// A function: clauses tried in declaration order, first match wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: Name,
    pub clauses: Vec<Clause>,
}

impl FunctionDef {
    /// Arity declared by the first clause (0 for a function with no clauses).
    pub fn arity(&self) -> usize {
        self.clauses.first().map_or(0, |clause| clause.params.len())
    }
}

/// A whole program as handed over by the front end.
///
/// Datatypes and functions keep their declaration order so diagnostics come
/// out in a stable order. The interner issued every `Name` in the program.
#[derive(Clone, Debug)]
pub struct Program {
    interner: SharedInterner,
    pub datatypes: Vec<Datatype>,
    pub functions: Vec<FunctionDef>,
}

impl Program {
    pub fn new(interner: SharedInterner) -> Self {
        Program {
            interner,
            datatypes: Vec::new(),
            functions: Vec::new(),
        }
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Find a function by name (first definition wins).
    pub fn function(&self, name: Name) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }
}
