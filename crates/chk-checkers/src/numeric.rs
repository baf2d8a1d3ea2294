use chk_core::{Predicate, Value, Verdict};

/// Coerces integer and floating point values to `f64`.
pub fn to_float(value: &Value) -> Result<f64, String> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Uint(u) => Ok(*u as f64),
        Value::Float(x) => Ok(*x),
        other => Err(format!("Expecting a number, got: {}", other.kind())),
    }
}

fn operand(role: &str, value: &Value) -> Result<f64, String> {
    to_float(value).map_err(|err| format!("Wrong {role} value: {err}"))
}

fn equal_with_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

fn within_bound(value: f64, lower: f64, upper: f64) -> bool {
    value >= lower && value <= upper
}

fn tolerance_holds(obtained: &Value, expected: &Value, tolerance: &Value) -> Result<bool, String> {
    let obtained = operand("obtained", obtained)?;
    let expected = operand("expected", expected)?;
    let tolerance = operand("tolerance", tolerance)?;
    Ok(equal_with_tolerance(obtained, expected, tolerance))
}

fn bound_holds(obtained: &Value, lower: &Value, upper: &Value) -> Result<bool, String> {
    let obtained = operand("obtained", obtained)?;
    let lower = operand("lower", lower)?;
    let upper = operand("upper", upper)?;
    Ok(within_bound(obtained, lower, upper))
}

/// Passes when `|obtained - expected| <= tolerance`.
pub fn equals_with_tolerance(obtained: &Value, expected: &Value, tolerance: &Value) -> Verdict {
    Verdict::from_result(tolerance_holds(obtained, expected, tolerance))
}

/// Passes when `lower <= obtained <= upper`.
pub fn between(obtained: &Value, lower: &Value, upper: &Value) -> Verdict {
    Verdict::from_result(bound_holds(obtained, lower, upper))
}

/// Checks that two numbers are close enough.
pub const EQUALS_WITH_TOLERANCE: Predicate = Predicate::ternary(
    "EqualsWithTolerance",
    &["obtained", "expected", "tolerance"],
    equals_with_tolerance,
);

/// Alias of [`EQUALS_WITH_TOLERANCE`].
pub const CLOSE_TO: Predicate = EQUALS_WITH_TOLERANCE.alias("CloseTo");

/// Checks that a number lies within inclusive bounds.
pub const BETWEEN: Predicate =
    Predicate::ternary("Between", &["obtained", "lower", "upper"], between);
