//! Property tests: every evaluation of a validated program ends.
//!
//! Random argument terms, well-typed or not, are fed to a small program.
//! Evaluation must return a value or a non-resource error, and the work it
//! does is bounded by the size of its input.

#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use quiver::{check_program, BinaryOp, Clause, EvalLimits, Expr, Interpreter, Pattern, Value};

use crate::common::{add_length, add_plus, list, nat, with_datatypes};

/// An argument term before its names are interned.
#[derive(Clone, Debug)]
enum Term {
    Int(i64),
    Nat(usize),
    List(Vec<i64>),
    /// Any constructor over any fields, possibly ill-typed.
    Node(&'static str, Vec<Term>),
}

fn term_strategy() -> impl Strategy<Value = Term> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Term::Int),
        (0..300usize).prop_map(Term::Nat),
        prop::collection::vec(-1_000..1_000i64, 0..60).prop_map(Term::List),
        prop::sample::select(vec!["O", "Nil"]).prop_map(|ctor| Term::Node(ctor, Vec::new())),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        (
            prop::sample::select(vec!["S", "Cons", "O"]),
            prop::collection::vec(inner, 1..3),
        )
            .prop_map(|(ctor, fields)| Term::Node(ctor, fields))
    })
}

fn entry_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["plus", "length", "total", "pred_all"])
}

fn build(interp: &Interpreter, term: &Term) -> Value {
    let interner = interp.interner();
    match term {
        Term::Int(n) => Value::int(*n),
        Term::Nat(n) => nat(interner, *n),
        Term::List(items) => list(interner, items),
        Term::Node(ctor, fields) => Value::ctor(
            interner.intern(ctor),
            fields.iter().map(|field| build(interp, field)).collect(),
        ),
    }
}

/// `plus` and `length`, a function calling `length` twice, and a partial
/// function with no clause for `O`.
fn program() -> Interpreter {
    let mut b = with_datatypes();
    add_plus(&mut b);
    add_length(&mut b);
    let total = vec![Clause::new(
        vec![b.bind("xs"), b.bind("ys")],
        Expr::binary(
            BinaryOp::Add,
            b.call("length", vec![b.var("xs")]),
            b.call("length", vec![b.var("ys")]),
        ),
    )];
    let pred_all = vec![Clause::new(
        vec![b.ctor("S", vec![Pattern::arrow(b.bind("x"))])],
        b.var("x"),
    )];
    b.function("total", total).function("pred_all", pred_all);
    Interpreter::builder(check_program(b.build()).unwrap())
        .limits(EvalLimits::bounded(10_000_000))
        .build()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    /// No evaluation runs into a resource limit, and each does work linear
    /// in the size of its arguments.
    #[test]
    fn prop_evaluation_terminates(
        entry in entry_strategy(),
        first in term_strategy(),
        second in term_strategy(),
    ) {
        let interp = program();
        let name = interp.interner().intern(entry);
        let program = interp.program();
        let arity = program
            .function_id(name)
            .map_or(0, |id| program.function(id).arity());
        let args: Vec<Value> = [first, second]
            .iter()
            .take(arity)
            .map(|term| build(&interp, term))
            .collect();
        let input_size: usize = args.iter().map(Value::size).sum();
        let input_size = u64::try_from(input_size).unwrap();

        let (result, counters) = interp.evaluate_with_stats(name, args);
        if let Err(err) = &result {
            prop_assert!(!err.is_resource_limit(), "{}", err);
        }
        prop_assert!(counters.arrow_calls <= input_size);
        prop_assert!(counters.steps() <= 16 * (input_size + 1));
        prop_assert!(counters.max_depth as u64 <= input_size + 2);
    }

    /// Each arrow-triggered call consumes one constructor of the input.
    #[test]
    fn prop_plus_arrow_calls_match_input(m in 0..500usize, n in 0..500usize) {
        let interp = program();
        let interner = interp.interner().clone();
        let plus = interner.intern("plus");
        let (result, counters) =
            interp.evaluate_with_stats(plus, vec![nat(&interner, m), nat(&interner, n)]);
        prop_assert_eq!(result, Ok(nat(&interner, m + n)));
        prop_assert_eq!(counters.arrow_calls, n as u64);
    }
}
