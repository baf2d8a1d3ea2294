use serde::Serialize;

use crate::value::Value;
use crate::verdict::Verdict;

/// Static descriptor of a checker: its name and positional parameter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckerInfo {
    /// Name under which hosts refer to the checker.
    pub name: &'static str,
    /// Names of the positional parameters, obtained value first.
    pub params: &'static [&'static str],
}

impl CheckerInfo {
    /// Creates a descriptor.
    pub const fn new(name: &'static str, params: &'static [&'static str]) -> Self {
        Self { name, params }
    }

    /// Number of positional parameters the checker expects.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Failing verdict for an invocation with the wrong number of arguments.
pub fn arity_mismatch(info: &CheckerInfo, got: usize) -> Verdict {
    Verdict::fail_with(format!(
        "{} expects {} arguments, got {}",
        info.name,
        info.arity(),
        got
    ))
}

/// Contract shared by every checker.
pub trait Checker: Send + Sync {
    /// Returns the checker descriptor.
    fn info(&self) -> CheckerInfo;

    /// Evaluates the checker against positional parameters.
    fn check(&self, params: &[Value]) -> Verdict;
}

impl<C: Checker + ?Sized> Checker for &C {
    fn info(&self) -> CheckerInfo {
        (**self).info()
    }

    fn check(&self, params: &[Value]) -> Verdict {
        (**self).check(params)
    }
}

impl<C: Checker + ?Sized> Checker for Box<C> {
    fn info(&self) -> CheckerInfo {
        (**self).info()
    }

    fn check(&self, params: &[Value]) -> Verdict {
        (**self).check(params)
    }
}

impl<C: Checker + ?Sized> Checker for std::sync::Arc<C> {
    fn info(&self) -> CheckerInfo {
        (**self).info()
    }

    fn check(&self, params: &[Value]) -> Verdict {
        (**self).check(params)
    }
}

#[derive(Clone, Copy)]
enum CheckFn {
    Unary(fn(&Value) -> Verdict),
    Binary(fn(&Value, &Value) -> Verdict),
    Ternary(fn(&Value, &Value, &Value) -> Verdict),
}

/// Checker backed by a plain function and a static descriptor.
#[derive(Clone, Copy)]
pub struct Predicate {
    info: CheckerInfo,
    func: CheckFn,
}

impl Predicate {
    /// Predicate over one value.
    pub const fn unary(
        name: &'static str,
        params: &'static [&'static str],
        func: fn(&Value) -> Verdict,
    ) -> Self {
        Self {
            info: CheckerInfo::new(name, params),
            func: CheckFn::Unary(func),
        }
    }

    /// Predicate over two values.
    pub const fn binary(
        name: &'static str,
        params: &'static [&'static str],
        func: fn(&Value, &Value) -> Verdict,
    ) -> Self {
        Self {
            info: CheckerInfo::new(name, params),
            func: CheckFn::Binary(func),
        }
    }

    /// Predicate over three values.
    pub const fn ternary(
        name: &'static str,
        params: &'static [&'static str],
        func: fn(&Value, &Value, &Value) -> Verdict,
    ) -> Self {
        Self {
            info: CheckerInfo::new(name, params),
            func: CheckFn::Ternary(func),
        }
    }

    /// The same predicate under another name.
    pub const fn alias(self, name: &'static str) -> Self {
        Self {
            info: CheckerInfo::new(name, self.info.params),
            func: self.func,
        }
    }
}

impl Checker for Predicate {
    fn info(&self) -> CheckerInfo {
        self.info
    }

    fn check(&self, params: &[Value]) -> Verdict {
        match (self.func, params) {
            (CheckFn::Unary(func), [value]) => func(value),
            (CheckFn::Binary(func), [first, second]) => func(first, second),
            (CheckFn::Ternary(func), [first, second, third]) => func(first, second, third),
            _ => arity_mismatch(&self.info, params.len()),
        }
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate")
            .field("name", &self.info.name)
            .field("params", &self.info.params)
            .finish_non_exhaustive()
    }
}
