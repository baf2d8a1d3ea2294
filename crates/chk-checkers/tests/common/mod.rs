#![allow(dead_code)]

use chk_checkers::{Value, Verdict};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

pub fn ints(items: &[i64]) -> Value {
    Value::from(items.to_vec())
}

pub fn strs(items: &[&str]) -> Value {
    Value::from(items.to_vec())
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn at(secs: i64) -> DateTime<Utc> {
    epoch() + TimeDelta::seconds(secs)
}

pub fn assert_pass(verdict: Verdict) {
    assert!(verdict.passed, "expected pass, got {verdict:?}");
    assert!(verdict.diagnostic.is_empty(), "unexpected diagnostic: {verdict:?}");
}

pub fn assert_fail(verdict: Verdict, diagnostic: &str) {
    assert!(!verdict.passed, "expected failure, got {verdict:?}");
    assert_eq!(verdict.diagnostic, diagnostic);
}
