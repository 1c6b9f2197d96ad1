//! Continuous value tests.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quiver::{
    check_program, BinaryOp, Clause, ContinuousValue, Expr, Interpreter, ProgramContinuousValue,
    Value,
};

use crate::common::with_datatypes;

#[test]
fn closure_fold_sums_events() {
    let running = ContinuousValue::new(0i64, |state: &i64, event: &i64| state + event);
    assert_eq!(running.final_value(&[1, 2, 3]), 6);
    assert_eq!(running.final_value(&[1, 2, 3, 4, 5]), 15);
    assert_eq!(running.final_value(&[]), 0);
    assert_eq!(running.apply_events(&[1, 2]).apply_event(&3).into_state(), 6);
}

#[test]
fn program_fold_sums_events() {
    let mut b = with_datatypes();
    let add = vec![Clause::new(
        vec![b.bind("acc"), b.bind("e")],
        Expr::binary(BinaryOp::Add, b.var("acc"), b.var("e")),
    )];
    b.function("add", add);
    let interp = Arc::new(Interpreter::new(check_program(b.build()).unwrap()));
    let add = interp.interner().intern("add");

    let running = ProgramContinuousValue::new(Arc::clone(&interp), add, Value::int(0)).unwrap();
    let first = [1, 2, 3].map(Value::int);
    let second = [1, 2, 3, 4, 5].map(Value::int);
    assert_eq!(running.try_final_value(&first), Ok(Value::int(6)));
    assert_eq!(running.try_final_value(&second), Ok(Value::int(15)));
    assert_eq!(running.try_final_value(&[]), Ok(Value::int(0)));
    assert_eq!(running.state(), &Value::int(0));
}
