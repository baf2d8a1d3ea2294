mod common;

use chk_checkers::{check_satisfies, satisfies, Checker, Value};
use common::{assert_fail, assert_pass, ints};

fn is_42(value: i64) -> bool {
    value == 42
}

#[test]
fn predicate_receives_converted_value() {
    let checker = satisfies(is_42);
    assert_pass(checker.check(&[Value::Int(42)]));
    assert_fail(checker.check(&[Value::Int(41)]), "");
}

#[test]
fn wrong_kind_is_reported_with_function_shape() {
    let checker = satisfies(is_42);
    assert_fail(
        checker.check(&[Value::from("42")]),
        "wrong argument type string for fn(int) -> bool",
    );
    assert_fail(
        checker.check(&[Value::Nil]),
        "wrong argument type nil for fn(int) -> bool",
    );
}

#[test]
fn optional_parameters_accept_nil() {
    let checker = satisfies(|value: Option<i64>| value.is_none());
    assert_pass(checker.check(&[Value::Nil]));
    assert_fail(checker.check(&[Value::Int(1)]), "");
}

#[test]
fn sequence_parameters() {
    assert_pass(check_satisfies(&ints(&[1, 2, 3]), |items: Vec<i64>| {
        items.iter().sum::<i64>() == 6
    }));
    assert_fail(
        check_satisfies(&Value::from(vec!["a"]), |items: Vec<i64>| items.is_empty()),
        "wrong argument type []string for fn([]int) -> bool",
    );
}

#[test]
fn any_parameter_sees_raw_value() {
    assert_pass(check_satisfies(&Value::Bool(true), |value: Value| {
        value == Value::Bool(true)
    }));
}

#[test]
fn arity_is_enforced() {
    let checker = satisfies(is_42);
    assert_eq!(checker.info().name, "Satisfies");
    assert_fail(
        checker.check(&[Value::Int(42), Value::Int(42)]),
        "Satisfies expects 1 arguments, got 2",
    );
}
