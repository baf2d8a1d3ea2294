//! Structured error types for checker infrastructure.
//!
//! Predicates themselves never return these: a failing check is a
//! [`Verdict`](crate::Verdict). Errors are reserved for lookup, arity,
//! configuration and decoding problems around the predicates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`CheckError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (checker names, paths, counts).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        for (key, value) in &self.context {
            write!(f, " {key}={value}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

/// Canonical error type for checker lookup and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum CheckError {
    /// Unknown or disabled checker names.
    #[error("registry error: {0}")]
    Registry(ErrorInfo),
    /// Positional argument count does not match the checker descriptor.
    #[error("arity error: {0}")]
    Arity(ErrorInfo),
    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// JSON encoding and decoding errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl CheckError {
    /// Lookup of a name the registry does not hold.
    pub fn unknown_checker(name: &str) -> Self {
        CheckError::Registry(
            ErrorInfo::new("unknown-checker", format!("no checker named {name}"))
                .with_context("checker", name),
        )
    }

    /// Dispatch with the wrong number of positional parameters.
    pub fn arity(name: &str, params: &[&str], got: usize) -> Self {
        CheckError::Arity(
            ErrorInfo::new(
                "arity",
                format!("{name} expects {} arguments, got {got}", params.len()),
            )
            .with_context("checker", name)
            .with_hint(params.join(", ")),
        )
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            CheckError::Registry(info)
            | CheckError::Arity(info)
            | CheckError::Config(info)
            | CheckError::Serde(info) => info,
        }
    }
}
