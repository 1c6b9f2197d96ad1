//! Test helpers for evaluator unit tests.
//!
//! Provides one program exercising every evaluator feature and a `Fixture`
//! that builds values against its interner.

use quiver_check::{check_program, CheckedProgram};
use quiver_ir::{BinaryOp, Clause, Expr, Pattern, ProgramBuilder, SharedInterner, Value};

use crate::{EvalResult, Interpreter, InterpreterBuilder};

/// Datatypes: `Nat = O | S(Nat)`, `List = Nil | Cons(Int, List)`,
/// `Bool = True | False`, `Opt = Some(Nat) | None`,
/// `Tree = Leaf | Node(Tree, Int, Tree)`.
pub fn standard_program() -> CheckedProgram {
    let mut b = ProgramBuilder::new();
    let nat = vec![b.constructor("O", &[]), b.constructor("S", &["Nat"])];
    b.datatype("Nat", nat);
    let list = vec![
        b.constructor("Nil", &[]),
        b.constructor("Cons", &["Int", "List"]),
    ];
    b.datatype("List", list);
    let boolean = vec![b.constructor("True", &[]), b.constructor("False", &[])];
    b.datatype("Bool", boolean);
    let opt = vec![b.constructor("Some", &["Nat"]), b.constructor("None", &[])];
    b.datatype("Opt", opt);
    let tree = vec![
        b.constructor("Leaf", &[]),
        b.constructor("Node", &["Tree", "Int", "Tree"]),
    ];
    b.datatype("Tree", tree);

    let arrow = |name: &str| Pattern::arrow(b.bind(name));
    let add = |lhs, rhs| Expr::binary(BinaryOp::Add, lhs, rhs);

    // plus(a, O) = a; plus(a, S(->c)) = S(c)
    let plus = vec![
        Clause::new(vec![b.bind("a"), b.ctor("O", vec![])], b.var("a")),
        Clause::new(
            vec![b.bind("a"), b.ctor("S", vec![arrow("c")])],
            b.construct("S", vec![b.var("c")]),
        ),
    ];
    // length(Nil) = 0; length(Cons(_, ->n)) = 1 + n
    let length = vec![
        Clause::new(vec![b.ctor("Nil", vec![])], Expr::Int(0)),
        Clause::new(
            vec![b.ctor("Cons", vec![Pattern::Wildcard, arrow("n")])],
            add(Expr::Int(1), b.var("n")),
        ),
    ];
    // sum(Nil) = 0; sum(Cons(x, ->s)) = x + s
    let sum = vec![
        Clause::new(vec![b.ctor("Nil", vec![])], Expr::Int(0)),
        Clause::new(
            vec![b.ctor("Cons", vec![b.bind("x"), arrow("s")])],
            add(b.var("x"), b.var("s")),
        ),
    ];
    // only_zero(O) = O
    let only_zero = vec![Clause::new(
        vec![b.ctor("O", vec![])],
        b.construct("O", vec![]),
    )];
    // to_int(O) = 0; to_int(S(->n)) = 1 + n
    let to_int = vec![
        Clause::new(vec![b.ctor("O", vec![])], Expr::Int(0)),
        Clause::new(
            vec![b.ctor("S", vec![arrow("n")])],
            add(Expr::Int(1), b.var("n")),
        ),
    ];
    // fact(O) = 1; fact(n @ S(->x)) = to_int(n) * x
    let fact = vec![
        Clause::new(vec![b.ctor("O", vec![])], Expr::Int(1)),
        Clause::new(
            vec![b.alias("n", b.ctor("S", vec![arrow("x")]))],
            Expr::binary(
                BinaryOp::Mul,
                b.call("to_int", vec![b.var("n")]),
                b.var("x"),
            ),
        ),
    ];
    // even(O) = True; even(S(->False)) = True; even(S(_)) = False
    let even = vec![
        Clause::new(vec![b.ctor("O", vec![])], b.construct("True", vec![])),
        Clause::new(
            vec![b.ctor("S", vec![Pattern::arrow(b.ctor("False", vec![]))])],
            b.construct("True", vec![]),
        ),
        Clause::new(
            vec![b.ctor("S", vec![Pattern::Wildcard])],
            b.construct("False", vec![]),
        ),
    ];
    // half(O) = O; half(S(O)) = O; half(S(S(->h))) = S(h)
    let half = vec![
        Clause::new(vec![b.ctor("O", vec![])], b.construct("O", vec![])),
        Clause::new(
            vec![b.ctor("S", vec![b.ctor("O", vec![])])],
            b.construct("O", vec![]),
        ),
        Clause::new(
            vec![b.ctor("S", vec![b.ctor("S", vec![arrow("h")])])],
            b.construct("S", vec![b.var("h")]),
        ),
    ];
    // pred_all(S(->x)) = x, with no clause for O
    let pred_all = vec![Clause::new(vec![b.ctor("S", vec![arrow("x")])], b.var("x"))];
    // total_length(xs, ys) = length(xs) + length(ys)
    let total_length = vec![Clause::new(
        vec![b.bind("xs"), b.bind("ys")],
        add(
            b.call("length", vec![b.var("xs")]),
            b.call("length", vec![b.var("ys")]),
        ),
    )];
    // tree_sum(Leaf) = 0; tree_sum(Node(->l, v, ->r)) = l + v + r
    let tree_sum = vec![
        Clause::new(vec![b.ctor("Leaf", vec![])], Expr::Int(0)),
        Clause::new(
            vec![b.ctor("Node", vec![arrow("l"), b.bind("v"), arrow("r")])],
            add(add(b.var("l"), b.var("v")), b.var("r")),
        ),
    ];
    // weighted(O, _) = 0; weighted(_, O) = 1;
    // weighted(S(->x), S(->y)) = 10 * x + y
    let weighted = vec![
        Clause::new(vec![b.ctor("O", vec![]), Pattern::Wildcard], Expr::Int(0)),
        Clause::new(vec![Pattern::Wildcard, b.ctor("O", vec![])], Expr::Int(1)),
        Clause::new(
            vec![b.ctor("S", vec![arrow("x")]), b.ctor("S", vec![arrow("y")])],
            add(
                Expr::binary(BinaryOp::Mul, Expr::Int(10), b.var("x")),
                b.var("y"),
            ),
        ),
    ];
    // bad_add(n) = n + 1
    let bad_add = vec![Clause::new(vec![b.bind("n")], add(b.var("n"), Expr::Int(1)))];
    // big() = i64::MAX * 2
    let big = vec![Clause::new(
        vec![],
        Expr::binary(BinaryOp::Mul, Expr::Int(i64::MAX), Expr::Int(2)),
    )];
    // init() = S(S(S(O))); iter(O) = None; iter(S(n)) = Some(n)
    let init = vec![Clause::new(
        vec![],
        b.construct(
            "S",
            vec![b.construct(
                "S",
                vec![b.construct("S", vec![b.construct("O", vec![])])],
            )],
        ),
    )];
    let iter = vec![
        Clause::new(vec![b.ctor("O", vec![])], b.construct("None", vec![])),
        Clause::new(
            vec![b.ctor("S", vec![b.bind("n")])],
            b.construct("Some", vec![b.var("n")]),
        ),
    ];

    b.function("plus", plus)
        .function("length", length)
        .function("sum", sum)
        .function("only_zero", only_zero)
        .function("to_int", to_int)
        .function("fact", fact)
        .function("even", even)
        .function("half", half)
        .function("pred_all", pred_all)
        .function("total_length", total_length)
        .function("tree_sum", tree_sum)
        .function("weighted", weighted)
        .function("bad_add", bad_add)
        .function("big", big)
        .function("init", init)
        .function("iter", iter);

    check_program(b.build()).unwrap_or_else(|e| panic!("{e}"))
}

/// An interpreter over [`standard_program`] plus value constructors.
pub struct Fixture {
    pub interpreter: Interpreter,
    pub interner: SharedInterner,
}

impl Fixture {
    pub fn new() -> Self {
        Self::configured(|builder| builder)
    }

    pub fn configured(configure: impl FnOnce(InterpreterBuilder) -> InterpreterBuilder) -> Self {
        let program = standard_program();
        let interner = program.interner().clone();
        Fixture {
            interpreter: configure(Interpreter::builder(program)).build(),
            interner,
        }
    }

    pub fn ctor(&self, name: &str, fields: Vec<Value>) -> Value {
        Value::ctor(self.interner.intern(name), fields)
    }

    /// Peano numeral `n`.
    pub fn nat(&self, n: usize) -> Value {
        let (zero, succ) = (self.interner.intern("O"), self.interner.intern("S"));
        let mut value = Value::unit_ctor(zero);
        for _ in 0..n {
            value = Value::ctor(succ, vec![value]);
        }
        value
    }

    pub fn list(&self, items: &[i64]) -> Value {
        let (nil, cons) = (self.interner.intern("Nil"), self.interner.intern("Cons"));
        items.iter().rev().fold(Value::unit_ctor(nil), |tail, item| {
            Value::ctor(cons, vec![Value::int(*item), tail])
        })
    }

    pub fn eval(&self, function: &str, args: Vec<Value>) -> EvalResult {
        self.interpreter.evaluate_named(function, args)
    }

    pub fn render(&self, value: &Value) -> String {
        value.display(&self.interner).to_string()
    }
}
