mod common;

use std::collections::BTreeMap;

use chk_checkers::{
    error_contains, has_prefix, has_suffix, is_empty, is_false, is_true, str_equals, Value,
};
use chk_core::{Record, Seq};
use common::{assert_fail, assert_pass, at, ints};

#[test]
fn str_equals_compares_renderings() {
    assert_pass(str_equals(&Value::Int(1), &Value::from("1")));
    assert_pass(str_equals(&ints(&[1, 2]), &Value::from("[1 2]")));
    let id = Record::new("id").with_display("id-7");
    assert_pass(str_equals(&Value::from(id), &Value::from("id-7")));
    assert_fail(str_equals(&Value::Float(1.5), &Value::from("1.50")), "");
}

#[test]
fn str_equals_treats_nil_specially() {
    assert_pass(str_equals(&Value::Nil, &Value::Nil));
    assert_fail(
        str_equals(&Value::from("<nil>"), &Value::Nil),
        "expecting nil, got not-nil value",
    );
    assert_fail(
        str_equals(&Value::Nil, &Value::from("<nil>")),
        "expecting not-nil value, got nil",
    );
    assert_fail(
        str_equals(&Value::Nil, &Value::Int(0)),
        "expecting not-nil value, got nil",
    );
    assert_fail(
        str_equals(&Value::Int(0), &Value::Nil),
        "expecting nil, got not-nil value",
    );
}

#[test]
fn booleans_only() {
    assert_pass(is_true(&Value::Bool(true)));
    assert_fail(is_true(&Value::Bool(false)), "");
    assert_fail(is_true(&Value::Int(1)), "");
    assert_pass(is_false(&Value::Bool(false)));
    assert_fail(is_false(&Value::Nil), "");
}

#[test]
fn is_empty_accepts_zero_values() {
    for value in [
        Value::Nil,
        Value::from(""),
        Value::Int(0),
        Value::Uint(0),
        Value::Float(0.0),
        Value::Bool(false),
        ints(&[]),
        Value::from(BTreeMap::<String, i64>::new()),
    ] {
        assert_pass(is_empty(&value));
    }
}

#[test]
fn is_empty_rejects_populated_values() {
    for value in [
        Value::from("a"),
        Value::from("abc"),
        Value::Int(1),
        Value::Int(-1),
        Value::Bool(true),
        ints(&[0]),
        Value::from(Seq::of(vec![Value::Nil])),
        Value::from(Record::new("empty")),
        Value::error(""),
    ] {
        assert_fail(is_empty(&value), "");
    }
}

#[test]
fn affixes_use_string_forms() {
    assert_pass(has_prefix(&Value::from("hello world"), &Value::from("hello")));
    assert_fail(has_prefix(&Value::from("hello world"), &Value::from("world")), "");
    assert_pass(has_suffix(&Value::from("hello world"), &Value::from("world")));
    let named = Record::new("host").with_display("db-primary");
    assert_pass(has_prefix(&Value::from(named), &Value::from("db-")));
    assert_pass(has_prefix(&Value::from(at(0)), &Value::from("2024-01-01")));
}

#[test]
fn affixes_reject_values_without_string_form() {
    assert_fail(
        has_prefix(&Value::Int(12), &Value::from("1")),
        "Obtained value is not a string and has no string form",
    );
    assert_fail(
        has_suffix(&Value::from("12"), &Value::Int(2)),
        "expected must be a string",
    );
}

#[test]
fn error_contains_searches_the_message() {
    let err = Value::error("open config.toml: file not found");
    assert_pass(error_contains(&err, &Value::from("not found")));
    assert_fail(error_contains(&err, &Value::from("denied")), "");
    assert_fail(
        error_contains(&Value::Nil, &Value::from("x")),
        "obtained value is nil, expected an error",
    );
    assert_fail(
        error_contains(&Value::from("not found"), &Value::from("not")),
        "obtained value of type string is not an error",
    );
}
