use std::marker::PhantomData;

use chk_core::{arity_mismatch, Checker, CheckerInfo, FromValue, Value, Verdict};

const SATISFIES_INFO: CheckerInfo = CheckerInfo::new("Satisfies", &["obtained"]);

/// Checker passing when a typed predicate returns true for the obtained value.
///
/// The value is converted to `T` first; a value of the wrong kind fails with
/// a diagnostic naming both the value kind and the function shape.
pub struct Satisfies<T, F> {
    func: F,
    _param: PhantomData<fn(T)>,
}

/// Builds a [`Satisfies`] checker around `func`.
pub fn satisfies<T, F>(func: F) -> Satisfies<T, F>
where
    T: FromValue,
    F: Fn(T) -> bool + Send + Sync,
{
    Satisfies {
        func,
        _param: PhantomData,
    }
}

/// Applies `func` to `value` converted to `T`.
pub fn check_satisfies<T: FromValue>(value: &Value, func: impl Fn(T) -> bool) -> Verdict {
    match T::from_value(value) {
        Some(arg) => Verdict::from_bool(func(arg)),
        None => Verdict::fail_with(format!(
            "wrong argument type {} for fn({}) -> bool",
            value.kind(),
            T::kind()
        )),
    }
}

impl<T, F> Checker for Satisfies<T, F>
where
    T: FromValue,
    F: Fn(T) -> bool + Send + Sync,
{
    fn info(&self) -> CheckerInfo {
        SATISFIES_INFO
    }

    fn check(&self, params: &[Value]) -> Verdict {
        match params {
            [value] => check_satisfies(value, &self.func),
            _ => arity_mismatch(&SATISFIES_INFO, params.len()),
        }
    }
}

impl<T, F> std::fmt::Debug for Satisfies<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Satisfies").finish_non_exhaustive()
    }
}
