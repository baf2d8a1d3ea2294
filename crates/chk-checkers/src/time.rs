use chk_core::{arity_mismatch, Checker, CheckerInfo, Predicate, Value, Verdict};
use chrono::{DateTime, TimeDelta, Utc};

/// Default tolerance of [`TimeEquals`], in microseconds.
pub const DEFAULT_TIME_EQUALS_TOLERANCE_US: i64 = 1;

const TIME_BETWEEN_INFO: CheckerInfo = CheckerInfo::new("TimeBetween", &["obtained"]);
const TIME_EQUALS_INFO: CheckerInfo = CheckerInfo::new("TimeEquals", &["obtained", "expected"]);

fn instant(role: &str, value: &Value) -> Result<DateTime<Utc>, String> {
    match value {
        Value::Time(t) => Ok(*t),
        _ => Err(format!("{role} value type must be time")),
    }
}

fn duration(role: &str, value: &Value) -> Result<TimeDelta, String> {
    match value {
        Value::Duration(d) => Ok(*d),
        _ => Err(format!("{role} value type must be duration")),
    }
}

fn within(obtained: DateTime<Utc>, expected: DateTime<Utc>, max_diff: TimeDelta) -> bool {
    let dt = expected - obtained;
    dt >= -max_diff && dt <= max_diff
}

/// Checker passing when the obtained instant lies within `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBetween {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Builds a [`TimeBetween`] checker, swapping the bounds when `end` precedes `start`.
pub fn time_between(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeBetween {
    if end < start {
        TimeBetween {
            start: end,
            end: start,
        }
    } else {
        TimeBetween { start, end }
    }
}

impl TimeBetween {
    /// Lower bound after normalisation.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Upper bound after normalisation.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    fn evaluate(&self, obtained: &Value) -> Result<bool, String> {
        let when = instant("obtained", obtained)?;
        if when < self.start {
            return Err(format!(
                "obtained value {} is before start value {}",
                obtained,
                Value::Time(self.start)
            ));
        }
        if when > self.end {
            return Err(format!(
                "obtained value {} is after end value {}",
                obtained,
                Value::Time(self.end)
            ));
        }
        Ok(true)
    }
}

impl Checker for TimeBetween {
    fn info(&self) -> CheckerInfo {
        TIME_BETWEEN_INFO
    }

    fn check(&self, params: &[Value]) -> Verdict {
        match params {
            [obtained] => Verdict::from_result(self.evaluate(obtained)),
            _ => arity_mismatch(&TIME_BETWEEN_INFO, params.len()),
        }
    }
}

fn shorter(obtained: &Value, expected: &Value) -> Result<bool, String> {
    Ok(duration("obtained", obtained)? < duration("expected", expected)?)
}

fn close_enough(obtained: &Value, expected: &Value, max_diff: TimeDelta) -> Result<bool, String> {
    let obtained = instant("obtained", obtained)?;
    let expected = instant("expected", expected)?;
    Ok(within(obtained, expected, max_diff))
}

/// Passes when the obtained duration is strictly shorter than the expected one.
pub fn duration_less_than(obtained: &Value, expected: &Value) -> Verdict {
    Verdict::from_result(shorter(obtained, expected))
}

/// Passes when `|expected - obtained| <= max_diff`.
pub fn within_duration(obtained: &Value, expected: &Value, max_diff: &Value) -> Verdict {
    let check = || -> Result<bool, String> {
        let obtained = instant("obtained", obtained)?;
        let expected = instant("expected", expected)?;
        let max_diff = duration("max_diff", max_diff)?;
        Ok(within(obtained, expected, max_diff))
    };
    Verdict::from_result(check())
}

/// Checker comparing instants up to a fixed tolerance. Nil equals only nil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeEquals {
    tolerance: TimeDelta,
}

impl TimeEquals {
    /// Comparison with a custom tolerance.
    pub fn with_tolerance(tolerance: TimeDelta) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    /// Tolerance in use.
    pub fn tolerance(&self) -> TimeDelta {
        self.tolerance
    }

    /// Compares two instants, either of which may be nil.
    pub fn compare(&self, obtained: &Value, expected: &Value) -> Verdict {
        match (obtained, expected) {
            (Value::Nil, Value::Nil) => Verdict::pass(),
            (Value::Nil, Value::Time(_)) => Verdict::fail_with("expecting not-nil time, got nil"),
            (Value::Time(_), Value::Nil) => Verdict::fail_with("expecting nil, got not-nil time"),
            _ => Verdict::from_result(close_enough(obtained, expected, self.tolerance)),
        }
    }
}

impl Default for TimeEquals {
    fn default() -> Self {
        Self::with_tolerance(TimeDelta::microseconds(DEFAULT_TIME_EQUALS_TOLERANCE_US))
    }
}

impl Checker for TimeEquals {
    fn info(&self) -> CheckerInfo {
        TIME_EQUALS_INFO
    }

    fn check(&self, params: &[Value]) -> Verdict {
        match params {
            [obtained, expected] => self.compare(obtained, expected),
            _ => arity_mismatch(&TIME_EQUALS_INFO, params.len()),
        }
    }
}

/// [`TimeEquals`] with the default one microsecond tolerance.
pub fn time_equals(obtained: &Value, expected: &Value) -> Verdict {
    TimeEquals::default().compare(obtained, expected)
}

/// Checks that one duration is shorter than another.
pub const DURATION_LESS_THAN: Predicate = Predicate::binary(
    "DurationLessThan",
    &["obtained", "expected"],
    duration_less_than,
);

/// Checks that two instants are within a maximum distance.
pub const WITHIN_DURATION: Predicate = Predicate::ternary(
    "WithinDuration",
    &["obtained", "expected", "max_diff"],
    within_duration,
);
