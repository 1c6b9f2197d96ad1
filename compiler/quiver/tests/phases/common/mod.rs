//! Shared programs and value constructors for phase tests.

use quiver::{
    check_program, BinaryOp, CheckedProgram, Clause, Expr, Interpreter, Pattern, ProgramBuilder,
    SharedInterner, Value,
};

/// `Nat = O | S(Nat)` and `List = Nil | Cons(Int, List)`.
pub fn with_datatypes() -> ProgramBuilder {
    let mut b = ProgramBuilder::new();
    let nat = vec![b.constructor("O", &[]), b.constructor("S", &["Nat"])];
    b.datatype("Nat", nat);
    let list = vec![
        b.constructor("Nil", &[]),
        b.constructor("Cons", &["Int", "List"]),
    ];
    b.datatype("List", list);
    b
}

/// `plus(a, O) = a`, `plus(a, S(->c)) = S(c)`.
pub fn add_plus(b: &mut ProgramBuilder) {
    let clauses = vec![
        Clause::new(vec![b.bind("a"), b.ctor("O", vec![])], b.var("a")),
        Clause::new(
            vec![b.bind("a"), b.ctor("S", vec![Pattern::arrow(b.bind("c"))])],
            b.construct("S", vec![b.var("c")]),
        ),
    ];
    b.function("plus", clauses);
}

/// `length(Nil) = 0`, `length(Cons(_, ->n)) = 1 + n`.
pub fn add_length(b: &mut ProgramBuilder) {
    let clauses = vec![
        Clause::new(vec![b.ctor("Nil", vec![])], Expr::Int(0)),
        Clause::new(
            vec![b.ctor("Cons", vec![Pattern::Wildcard, Pattern::arrow(b.bind("n"))])],
            Expr::binary(BinaryOp::Add, Expr::Int(1), b.var("n")),
        ),
    ];
    b.function("length", clauses);
}

/// Data types plus `plus` and `length`, validated.
pub fn arithmetic() -> CheckedProgram {
    let mut b = with_datatypes();
    add_plus(&mut b);
    add_length(&mut b);
    check_program(b.build()).unwrap()
}

pub fn interpreter() -> Interpreter {
    Interpreter::new(arithmetic())
}

pub fn nat(interner: &SharedInterner, n: usize) -> Value {
    let succ = interner.intern("S");
    (0..n).fold(Value::unit_ctor(interner.intern("O")), |v, _| {
        Value::ctor(succ, vec![v])
    })
}

pub fn list(interner: &SharedInterner, items: &[i64]) -> Value {
    let cons = interner.intern("Cons");
    items
        .iter()
        .rev()
        .fold(Value::unit_ctor(interner.intern("Nil")), |tail, item| {
            Value::ctor(cons, vec![Value::int(*item), tail])
        })
}
