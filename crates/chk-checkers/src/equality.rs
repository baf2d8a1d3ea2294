use chk_core::{Predicate, Value, Verdict};

/// Compares the default string renderings of two values. Nil only equals nil.
pub fn str_equals(obtained: &Value, expected: &Value) -> Verdict {
    match (obtained.is_nil(), expected.is_nil()) {
        (true, true) => Verdict::pass(),
        (false, true) => Verdict::fail_with("expecting nil, got not-nil value"),
        (true, false) => Verdict::fail_with("expecting not-nil value, got nil"),
        (false, false) => Verdict::from_bool(obtained.to_string() == expected.to_string()),
    }
}

/// Passes only for the boolean `true`.
pub fn is_true(value: &Value) -> Verdict {
    Verdict::from_bool(matches!(value, Value::Bool(true)))
}

/// Passes only for the boolean `false`.
pub fn is_false(value: &Value) -> Verdict {
    Verdict::from_bool(matches!(value, Value::Bool(false)))
}

/// Passes for nil, `""`, zero, `false` and empty sequences or mappings.
pub fn is_empty(value: &Value) -> Verdict {
    let empty = match value {
        Value::Nil | Value::Bool(false) => true,
        Value::Int(i) => *i == 0,
        Value::Uint(u) => *u == 0,
        Value::Float(x) => *x == 0.0,
        Value::Str(text) => text.is_empty(),
        Value::Seq(seq) => seq.is_empty(),
        Value::Map(map) => map.is_empty(),
        _ => false,
    };
    Verdict::from_bool(empty)
}

/// Compares values by their string rendering.
pub const STR_EQUALS: Predicate =
    Predicate::binary("StrEquals", &["obtained", "expected"], str_equals);

/// Checks for boolean `true`.
pub const IS_TRUE: Predicate = Predicate::unary("IsTrue", &["value"], is_true);

/// Checks for boolean `false`.
pub const IS_FALSE: Predicate = Predicate::unary("IsFalse", &["value"], is_false);

/// Checks for an empty or zero value.
pub const IS_EMPTY: Predicate = Predicate::unary("IsEmpty", &["value"], is_empty);
