use std::cmp::Ordering;

use chk_core::{Kind, Predicate, Value, Verdict};

/// Checks whether a sequence holds an element equal to `value`, or whether
/// a string contains `value` as a substring.
pub fn contains(container: &Value, value: &Value) -> Verdict {
    match container {
        Value::Seq(seq) => {
            let kind = value.kind();
            if !seq.elem.admits(&kind) {
                return Verdict::fail_with(format!(
                    "value should have type {}, got {kind}",
                    seq.elem
                ));
            }
            Verdict::from_bool(seq.items.contains(value))
        }
        Value::Str(text) => match value {
            Value::Str(needle) => Verdict::from_bool(text.contains(needle.as_str())),
            other => Verdict::fail_with(format!(
                "value should have type string, got {}",
                other.kind()
            )),
        },
        other => Verdict::fail_with(format!(
            "Unsupported argument types: {}, {}",
            other.kind(),
            value.kind()
        )),
    }
}

/// [`contains`] with the arguments reversed.
pub fn is_in(value: &Value, container: &Value) -> Verdict {
    contains(container, value)
}

/// Checks that two sequences of the same kind hold the same elements with
/// the same multiplicities, in any order.
pub fn same_contents(obtained: &Value, expected: &Value) -> Verdict {
    let Value::Seq(obtained) = obtained else {
        return Verdict::fail_with(format!(
            "SameContents expects the obtained value to be a slice, got {}",
            obtained.kind()
        ));
    };
    let Value::Seq(expected) = expected else {
        return Verdict::fail_with(format!(
            "SameContents expects the expected value to be a slice, got {}",
            expected.kind()
        ));
    };
    let untyped = obtained.elem == Kind::Any || expected.elem == Kind::Any;
    if obtained.elem != expected.elem && !untyped {
        return Verdict::fail_with(format!(
            "SameContents expects two slices of the same type, expected: {}, got: {}",
            expected.kind(),
            obtained.kind()
        ));
    }
    if obtained.len() != expected.len() {
        return Verdict::fail();
    }

    let mut remaining: Vec<&Value> = obtained.items.iter().collect();
    for item in &expected.items {
        match remaining.iter().position(|candidate| *candidate == item) {
            Some(idx) => {
                remaining.swap_remove(idx);
            }
            None => return Verdict::fail(),
        }
    }
    Verdict::pass()
}

/// Checks that two sequences are equal element by element.
pub fn slice_equals(obtained: &Value, expected: &Value) -> Verdict {
    match (obtained, expected) {
        (Value::Seq(a), Value::Seq(b)) => Verdict::from_bool(a.len() == b.len() && a == b),
        _ => Verdict::fail_with("Both arguments must be slices"),
    }
}

/// Checks that two mappings hold the same entries.
pub fn map_equals(obtained: &Value, expected: &Value) -> Verdict {
    match (obtained, expected) {
        (Value::Map(a), Value::Map(b)) => Verdict::from_bool(a.len() == b.len() && a == b),
        _ => Verdict::fail_with("Both arguments must be maps"),
    }
}

/// Checks that a sequence is in non-decreasing natural order.
pub fn is_sorted(value: &Value) -> Verdict {
    let Value::Seq(seq) = value else {
        return Verdict::fail_with(format!(
            "IsSorted expects a slice, got {}",
            value.kind()
        ));
    };
    if seq.elem != Kind::Any && !seq.elem.is_ordered() {
        return Verdict::fail_with(format!(
            "IsSorted expects a slice of ordered elements, got {}",
            seq.kind()
        ));
    }
    for pair in seq.items.windows(2) {
        match pair[0].natural_cmp(&pair[1]) {
            Some(Ordering::Greater) => return Verdict::fail(),
            Some(_) => {}
            None => {
                return Verdict::fail_with(format!(
                    "IsSorted cannot order {} against {}",
                    pair[0].kind(),
                    pair[1].kind()
                ))
            }
        }
    }
    Verdict::pass()
}

/// Checks that a sequence or string contains an element.
pub const CONTAINS: Predicate = Predicate::binary(
    "Contains",
    &["container", "value expected to contain"],
    contains,
);

/// Checks that an element is in a sequence or string.
pub const IS_IN: Predicate = Predicate::binary("IsIn", &["value", "container"], is_in);

/// Checks that two sequences hold the same multiset of elements.
pub const SAME_CONTENTS: Predicate =
    Predicate::binary("SameContents", &["obtained", "expected"], same_contents);

/// Checks that two sequences are equal.
pub const SLICE_EQUALS: Predicate =
    Predicate::binary("SliceEquals", &["obtained", "expected"], slice_equals);

/// Checks that two mappings are equal.
pub const MAP_EQUALS: Predicate =
    Predicate::binary("MapEquals", &["obtained", "expected"], map_equals);

/// Checks that a sequence is sorted.
pub const IS_SORTED: Predicate = Predicate::unary("IsSorted", &["obtained"], is_sorted);
