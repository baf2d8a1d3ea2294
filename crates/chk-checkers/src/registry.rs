use std::collections::BTreeMap;
use std::sync::Arc;

use chk_core::errors::{CheckError, ErrorInfo};
use chk_core::serde::{params_from_json_slice, to_canonical_json_bytes};
use chk_core::{Checker, CheckerInfo, Predicate, Value, Verdict};
use chrono::TimeDelta;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::RegistryConfig;
use crate::container::{CONTAINS, IS_IN, IS_SORTED, MAP_EQUALS, SAME_CONTENTS, SLICE_EQUALS};
use crate::equality::{IS_EMPTY, IS_FALSE, IS_TRUE, STR_EQUALS};
use crate::fs::{
    DOES_NOT_EXIST, IS_DIRECTORY, IS_NON_EMPTY_FILE, IS_SYMLINK, SAME_PATH,
    SYMLINK_DOES_NOT_EXIST,
};
use crate::numeric::{BETWEEN, CLOSE_TO, EQUALS_WITH_TOLERANCE};
use crate::strings::{ERROR_CONTAINS, HAS_PREFIX, HAS_SUFFIX};
use crate::time::{TimeEquals, DURATION_LESS_THAN, WITHIN_DURATION};

/// Every function-backed checker, in registration order.
pub const PREDICATES: [Predicate; 23] = [
    EQUALS_WITH_TOLERANCE,
    BETWEEN,
    CONTAINS,
    IS_IN,
    SAME_CONTENTS,
    SLICE_EQUALS,
    MAP_EQUALS,
    IS_SORTED,
    IS_TRUE,
    IS_FALSE,
    IS_EMPTY,
    STR_EQUALS,
    HAS_PREFIX,
    HAS_SUFFIX,
    ERROR_CONTAINS,
    DURATION_LESS_THAN,
    WITHIN_DURATION,
    IS_DIRECTORY,
    IS_NON_EMPTY_FILE,
    IS_SYMLINK,
    DOES_NOT_EXIST,
    SYMLINK_DOES_NOT_EXIST,
    SAME_PATH,
];

/// Registered name paired with the checker's own descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    /// Name the checker is registered under.
    pub name: String,
    /// Descriptor reported by the checker.
    pub info: CheckerInfo,
}

/// Mapping from checker name to checker.
#[derive(Clone, Default)]
pub struct CheckerRegistry {
    checkers: BTreeMap<String, Arc<dyn Checker>>,
}

impl CheckerRegistry {
    /// Registry without any checkers.
    pub fn empty() -> Self {
        Self::default()
    }

    fn base(time_equals: TimeEquals) -> Self {
        let mut registry = Self::empty();
        for predicate in PREDICATES {
            registry.register(predicate.info().name, predicate);
        }
        registry.register("TimeEquals", time_equals);
        registry
    }

    /// Every standard checker plus the `CloseTo` alias.
    pub fn standard() -> Self {
        let mut registry = Self::base(TimeEquals::default());
        registry.register(CLOSE_TO.info().name, CLOSE_TO);
        registry
    }

    /// Standard checkers adjusted by `config`.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, CheckError> {
        let tolerance = TimeDelta::microseconds(config.time_equals_tolerance()?);
        let mut registry = Self::base(TimeEquals::with_tolerance(tolerance));
        // Alias targets resolve against the base set only.
        let base = registry.checkers.clone();
        for (alias, target) in &config.aliases {
            let alias_error = |message: String| {
                CheckError::Config(
                    ErrorInfo::new("config-alias", message)
                        .with_context("alias", alias.clone())
                        .with_context("target", target.clone()),
                )
            };
            if config.aliases.contains_key(target) && !base.contains_key(target) {
                return Err(alias_error(format!(
                    "alias {alias} targets alias {target}; aliases must name a checker"
                )));
            }
            let checker = base
                .get(target)
                .cloned()
                .ok_or_else(|| alias_error(format!("alias {alias} targets unknown checker")))?;
            registry.checkers.insert(alias.clone(), checker);
        }
        for name in &config.disabled {
            if registry.checkers.remove(name).is_none() {
                return Err(CheckError::Config(
                    ErrorInfo::new("config-disabled", format!("cannot disable unknown checker {name}"))
                        .with_context("checker", name.clone()),
                ));
            }
        }
        debug!(checkers = registry.len(), "built checker registry from config");
        Ok(registry)
    }

    /// Adds or replaces a checker under `name`.
    pub fn register(&mut self, name: impl Into<String>, checker: impl Checker + 'static) {
        self.checkers.insert(name.into(), Arc::new(checker));
    }

    /// Looks up a checker.
    pub fn get(&self, name: &str) -> Option<&dyn Checker> {
        self.checkers.get(name).map(|checker| checker.as_ref())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.checkers.keys().map(String::as_str)
    }

    /// Number of registered checkers.
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Descriptors of every registered checker.
    pub fn describe(&self) -> Vec<RegistryEntry> {
        self.checkers
            .iter()
            .map(|(name, checker)| RegistryEntry {
                name: name.clone(),
                info: checker.info(),
            })
            .collect()
    }

    /// Descriptors as canonical JSON.
    pub fn describe_json(&self) -> Result<Vec<u8>, CheckError> {
        to_canonical_json_bytes(&self.describe())
    }

    /// Runs the named checker against positional parameters.
    pub fn check(&self, name: &str, params: &[Value]) -> Result<Verdict, CheckError> {
        let checker = self.get(name).ok_or_else(|| CheckError::unknown_checker(name))?;
        let info = checker.info();
        if params.len() != info.arity() {
            return Err(CheckError::arity(name, info.params, params.len()));
        }
        trace!(checker = name, "dispatching checker");
        let verdict = checker.check(params);
        if !verdict.passed {
            debug!(checker = name, diagnostic = %verdict.diagnostic, "check failed");
        }
        Ok(verdict)
    }

    /// Runs the named checker against parameters given as a JSON array.
    pub fn check_json(&self, name: &str, params: &[u8]) -> Result<Verdict, CheckError> {
        let params = params_from_json_slice(params)?;
        self.check(name, &params)
    }
}

impl std::fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("names", &self.checkers.keys().collect::<Vec<_>>())
            .finish()
    }
}
