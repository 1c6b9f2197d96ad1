//! `ProgramBuilder` for assembling programs without a front end.
//!
//! Interns names on the fly so callers can write `b.ctor("S", ...)` rather
//! than threading `Name`s around. Every `Name` and `Value` produced here
//! belongs to the builder's interner, which the built program keeps.

use crate::{
    Clause, Constructor, Datatype, Expr, FieldType, FunctionDef, Name, Pattern, Program,
    SharedInterner, Value,
};

/// Field type spelled `Int` in [`ProgramBuilder::constructor`].
const INT_FIELD: &str = "Int";

/// Incremental builder for a [`Program`].
pub struct ProgramBuilder {
    program: Program,
}

impl ProgramBuilder {
    /// Create a builder with a fresh interner.
    pub fn new() -> Self {
        Self::with_interner(SharedInterner::new())
    }

    /// Create a builder that interns into an existing interner.
    pub fn with_interner(interner: SharedInterner) -> Self {
        ProgramBuilder {
            program: Program::new(interner),
        }
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        self.program.interner()
    }

    #[inline]
    pub fn name(&self, s: &str) -> Name {
        self.program.interner().intern(s)
    }

    /// A constructor whose fields are datatype names, or `Int`.
    pub fn constructor(&self, name: &str, fields: &[&str]) -> Constructor {
        Constructor {
            name: self.name(name),
            fields: fields
                .iter()
                .map(|field| {
                    if *field == INT_FIELD {
                        FieldType::Int
                    } else {
                        FieldType::Named(self.name(field))
                    }
                })
                .collect(),
        }
    }

    /// Declare a datatype. Duplicates are kept for the validator to report.
    pub fn datatype(&mut self, name: &str, constructors: Vec<Constructor>) -> &mut Self {
        let name = self.name(name);
        self.program.datatypes.push(Datatype { name, constructors });
        self
    }

    /// Declare a function. Duplicates are kept for the validator to report.
    pub fn function(&mut self, name: &str, clauses: Vec<Clause>) -> &mut Self {
        let name = self.name(name);
        self.program.functions.push(FunctionDef { name, clauses });
        self
    }

    pub fn build(self) -> Program {
        self.program
    }

    // Patterns

    pub fn bind(&self, name: &str) -> Pattern {
        Pattern::bind(self.name(name))
    }

    pub fn ctor(&self, name: &str, fields: Vec<Pattern>) -> Pattern {
        Pattern::ctor(self.name(name), fields)
    }

    pub fn alias(&self, name: &str, pattern: Pattern) -> Pattern {
        Pattern::alias(self.name(name), pattern)
    }

    // Expressions

    pub fn var(&self, name: &str) -> Expr {
        Expr::var(self.name(name))
    }

    pub fn construct(&self, ctor: &str, args: Vec<Expr>) -> Expr {
        Expr::construct(self.name(ctor), args)
    }

    pub fn call(&self, function: &str, args: Vec<Expr>) -> Expr {
        Expr::call(self.name(function), args)
    }

    // Values

    pub fn value(&self, ctor: &str, fields: Vec<Value>) -> Value {
        Value::ctor(self.name(ctor), fields)
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}
