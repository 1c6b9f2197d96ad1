//! Validation phase tests.

use pretty_assertions::assert_eq;
use quiver::{check_program, validate, Clause, ErrorCode, Expr, Pattern, Phase, ValidationError};

use crate::common::{add_length, add_plus, with_datatypes};

#[test]
fn arrow_as_whole_parameter_is_rejected() {
    let mut b = with_datatypes();
    let clauses = vec![Clause::new(vec![Pattern::arrow(b.bind("y"))], b.var("y"))];
    b.function("f", clauses);

    let errors = validate(&b.build());
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ValidationError::ArrowAtTopLevel { .. }));
    assert_eq!(errors[0].code(), ErrorCode::E2001);
}

#[test]
fn mutual_recursion_is_rejected() {
    let mut b = with_datatypes();
    let f = vec![Clause::new(vec![b.bind("x")], b.call("g", vec![b.var("x")]))];
    let g = vec![Clause::new(vec![b.bind("x")], b.call("f", vec![b.var("x")]))];
    b.function("f", f).function("g", g);

    let errors = validate(&b.build());
    assert_eq!(
        errors,
        vec![ValidationError::CyclicDependency {
            cycle: vec!["f".to_owned(), "g".to_owned()],
        }]
    );
    assert_eq!(errors[0].code().phase(), Phase::CallGraph);
}

#[test]
fn direct_self_call_is_rejected() {
    let mut b = with_datatypes();
    let clauses = vec![Clause::new(vec![b.bind("x")], b.call("f", vec![b.var("x")]))];
    b.function("f", clauses);

    let errors = validate(&b.build());
    assert_eq!(
        errors,
        vec![ValidationError::IllegalSelfCall {
            function: "f".to_owned(),
            clause: 0,
        }]
    );
}

#[test]
fn duplicate_datatypes_and_constructors_are_rejected() {
    let mut b = with_datatypes();
    let again = vec![b.constructor("O", &[])];
    b.datatype("Nat", again);
    let clash = vec![b.constructor("Cons", &["Nat"])];
    b.datatype("Stream", clash);

    let errors = validate(&b.build());
    let codes: Vec<_> = errors.iter().map(ValidationError::code).collect();
    assert_eq!(codes, vec![ErrorCode::E1001, ErrorCode::E1002]);
    assert!(codes.iter().all(|code| code.phase() == Phase::Registry));
}

#[test]
fn all_errors_reported_in_one_batch() {
    let mut b = with_datatypes();
    add_plus(&mut b);
    add_length(&mut b);
    let bad_ctor = vec![Clause::new(
        vec![b.ctor("S", vec![Pattern::Wildcard, Pattern::Wildcard])],
        Expr::Int(0),
    )];
    let bad_arrow = vec![Clause::new(vec![Pattern::arrow(Pattern::Wildcard)], Expr::Int(0))];
    let bad_call = vec![Clause::new(vec![b.bind("x")], b.call("nowhere", vec![]))];
    b.function("bad_ctor", bad_ctor)
        .function("bad_arrow", bad_arrow)
        .function("bad_call", bad_call);

    let err = check_program(b.build()).unwrap_err();
    assert_eq!(
        err.codes(),
        vec![ErrorCode::E2003, ErrorCode::E2001, ErrorCode::E3003]
    );
    assert!(err.iter().all(|e| e.code().is_static()));
}
