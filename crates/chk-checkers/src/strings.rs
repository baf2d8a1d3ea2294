use chk_core::{Predicate, Value, Verdict};

fn affix_check(obtained: &Value, expected: &Value, test: fn(&str, &str) -> bool) -> Verdict {
    let Value::Str(expected) = expected else {
        return Verdict::fail_with("expected must be a string");
    };
    match obtained.string_form() {
        Some(text) => Verdict::from_bool(test(&text, expected)),
        None => Verdict::fail_with("Obtained value is not a string and has no string form"),
    }
}

/// Checks that the string form of `obtained` starts with `expected`.
pub fn has_prefix(obtained: &Value, expected: &Value) -> Verdict {
    affix_check(obtained, expected, |text, prefix| text.starts_with(prefix))
}

/// Checks that the string form of `obtained` ends with `expected`.
pub fn has_suffix(obtained: &Value, expected: &Value) -> Verdict {
    affix_check(obtained, expected, |text, suffix| text.ends_with(suffix))
}

/// Checks that an error's message contains `expected`.
pub fn error_contains(obtained: &Value, expected: &Value) -> Verdict {
    let Value::Str(expected) = expected else {
        return Verdict::fail_with("expected must be a string");
    };
    match obtained {
        Value::Error(err) => Verdict::from_bool(err.message().contains(expected.as_str())),
        Value::Nil => Verdict::fail_with("obtained value is nil, expected an error"),
        other => Verdict::fail_with(format!(
            "obtained value of type {} is not an error",
            other.kind()
        )),
    }
}

/// Checks a string prefix.
pub const HAS_PREFIX: Predicate =
    Predicate::binary("HasPrefix", &["obtained", "expected"], has_prefix);

/// Checks a string suffix.
pub const HAS_SUFFIX: Predicate =
    Predicate::binary("HasSuffix", &["obtained", "expected"], has_suffix);

/// Checks an error message for a substring.
pub const ERROR_CONTAINS: Predicate =
    Predicate::binary("ErrorContains", &["obtained", "expected"], error_contains);
