//! Evaluation phase tests.

use pretty_assertions::assert_eq;
use quiver::{
    check_program, load, run_host_loop, BinaryOp, Clause, ErrorCode, EvalErrorKind, EvalLimits,
    EvalResult, Expr, Interpreter, LoopExit, LoopProtocol, Pattern, Value,
};

use crate::common::{add_length, add_plus, arithmetic, interpreter, list, nat, with_datatypes};

#[test]
fn length_counts_three_cells() {
    let interp = interpreter();
    let interner = interp.interner().clone();
    let arg = list(&interner, &[7, 8, 9]);
    assert_eq!(interp.evaluate_named("length", vec![arg]), Ok(Value::int(3)));
}

#[test]
fn peano_two_plus_three() {
    let interp = interpreter();
    let interner = interp.interner().clone();
    let result = interp
        .evaluate_named("plus", vec![nat(&interner, 2), nat(&interner, 3)])
        .unwrap();
    assert_eq!(result, nat(&interner, 5));
    assert_eq!(result.display(&interner).to_string(), "S(S(S(S(S(O)))))");
}

#[test]
fn uncovered_argument_is_no_match() {
    let mut b = with_datatypes();
    let only_zero = vec![Clause::new(vec![b.ctor("O", vec![])], Expr::Int(0))];
    b.function("only_zero", only_zero);
    let interp = Interpreter::new(check_program(b.build()).unwrap());
    let interner = interp.interner().clone();

    let err = interp
        .evaluate_named("only_zero", vec![nat(&interner, 1)])
        .unwrap_err();
    assert!(err.is_no_match());
    assert_eq!(err.code(), ErrorCode::E6001);
    assert_eq!(
        err.kind,
        EvalErrorKind::NoMatch {
            function: "only_zero".to_owned(),
            args: vec!["S(O)".to_owned()],
        }
    );
}

#[test]
fn factorial_through_alias_and_arrow() {
    let mut b = with_datatypes();
    // to_int(O) = 0; to_int(S(->k)) = 1 + k
    let to_int = vec![
        Clause::new(vec![b.ctor("O", vec![])], Expr::Int(0)),
        Clause::new(
            vec![b.ctor("S", vec![Pattern::arrow(b.bind("k"))])],
            Expr::binary(BinaryOp::Add, Expr::Int(1), b.var("k")),
        ),
    ];
    // fact(O) = 1; fact(n @ S(->x)) = to_int(n) * x
    let fact = vec![
        Clause::new(vec![b.ctor("O", vec![])], Expr::Int(1)),
        Clause::new(
            vec![b.alias("n", b.ctor("S", vec![Pattern::arrow(b.bind("x"))]))],
            Expr::binary(
                BinaryOp::Mul,
                b.call("to_int", vec![b.var("n")]),
                b.var("x"),
            ),
        ),
    ];
    b.function("to_int", to_int).function("fact", fact);
    let interp = Interpreter::new(check_program(b.build()).unwrap());
    let interner = interp.interner().clone();

    let results: Vec<_> = (0..=6)
        .map(|n| interp.evaluate_named("fact", vec![nat(&interner, n)]).unwrap())
        .collect();
    let expected: Vec<Value> = [1, 1, 2, 6, 24, 120, 720].map(Value::int).into();
    assert_eq!(results, expected);
}

#[test]
fn parallel_batch_matches_sequential() {
    let interp = interpreter();
    let interner = interp.interner().clone();
    let length = interner.intern("length");
    let calls: Vec<_> = (0..32)
        .map(|n| {
            let items: Vec<i64> = (0..n).collect();
            (length, vec![list(&interner, &items)])
        })
        .collect();

    let results = interp.evaluate_batch(calls);
    let expected: Vec<EvalResult> = (0..32).map(|n| Ok(Value::int(n))).collect();
    assert_eq!(results, expected);
}

#[test]
fn step_budget_stops_long_evaluations() {
    let interp = Interpreter::builder(arithmetic())
        .step_budget(50)
        .build();
    let interner = interp.interner().clone();
    let err = interp
        .evaluate_named("plus", vec![nat(&interner, 0), nat(&interner, 1_000)])
        .unwrap_err();
    assert!(err.is_resource_limit());
    assert_eq!(err.kind, EvalErrorKind::BudgetExceeded { budget: 50 });
}

#[test]
fn deep_values_do_not_overflow_the_host_stack() {
    let interp = Interpreter::builder(arithmetic())
        .limits(EvalLimits::default().with_max_depth(500_000))
        .build();
    let interner = interp.interner().clone();
    let n = 250_000;
    let args = vec![nat(&interner, 1), nat(&interner, n)];
    let (result, counters) = interp.evaluate_with_stats(interner.intern("plus"), args);
    assert_eq!(result.map(|v| v.size()), Ok(n + 2));
    assert_eq!(counters.arrow_calls, n as u64);
}

#[test]
fn load_checks_then_builds() {
    let mut b = with_datatypes();
    add_plus(&mut b);
    add_length(&mut b);
    let interp = load(b.build()).unwrap();
    assert!(interp.program().function_id_by_str("length").is_some());

    let mut b = with_datatypes();
    let clauses = vec![Clause::new(vec![Pattern::arrow(b.bind("y"))], b.var("y"))];
    b.function("f", clauses);
    let err = load(b.build()).unwrap_err();
    assert_eq!(err.codes(), vec![ErrorCode::E2001]);
}

#[test]
fn host_loop_counts_down() {
    let mut b = with_datatypes();
    let opt = vec![b.constructor("Some", &["Nat"]), b.constructor("None", &[])];
    b.datatype("Opt", opt);
    let init = vec![Clause::new(
        vec![],
        b.construct("S", vec![b.construct("S", vec![b.construct("O", vec![])])]),
    )];
    let iter = vec![
        Clause::new(vec![b.ctor("O", vec![])], b.construct("None", vec![])),
        Clause::new(
            vec![b.ctor("S", vec![b.bind("n")])],
            b.construct("Some", vec![b.var("n")]),
        ),
    ];
    b.function("init", init).function("iter", iter);
    let interp = Interpreter::new(check_program(b.build()).unwrap());
    let interner = interp.interner().clone();

    let protocol = LoopProtocol::new(&interner).unwrap();
    let outcome = run_host_loop(&interp, &protocol, None).unwrap();
    assert_eq!(outcome.exit, LoopExit::Finished);
    assert_eq!(outcome.iterations, 3);
    assert_eq!(outcome.state, nat(&interner, 0));
}

#[test]
fn tracing_init_is_idempotent() {
    quiver::init_tracing();
    quiver::init_tracing();
}
