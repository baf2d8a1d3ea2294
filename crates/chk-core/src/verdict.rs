use serde::{Deserialize, Serialize};

/// Outcome of a single checker invocation.
///
/// An empty diagnostic means the check passed, or failed without anything
/// to add beyond the obtained and expected values the host already prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the asserted property holds.
    pub passed: bool,
    /// Explanation surfaced by the host when the check fails.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub diagnostic: String,
}

impl Verdict {
    /// A passing verdict.
    pub fn pass() -> Self {
        Self {
            passed: true,
            diagnostic: String::new(),
        }
    }

    /// A failing verdict with no diagnostic.
    pub fn fail() -> Self {
        Self {
            passed: false,
            diagnostic: String::new(),
        }
    }

    /// A failing verdict carrying a diagnostic.
    pub fn fail_with(diagnostic: impl Into<String>) -> Self {
        Self {
            passed: false,
            diagnostic: diagnostic.into(),
        }
    }

    /// Converts a bare boolean outcome.
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Self::pass()
        } else {
            Self::fail()
        }
    }

    /// Converts a fallible evaluation where `Err` carries the diagnostic.
    pub fn from_result(result: Result<bool, String>) -> Self {
        match result {
            Ok(passed) => Self::from_bool(passed),
            Err(diagnostic) => Self::fail_with(diagnostic),
        }
    }

    /// Splits the verdict into the `(passed, diagnostic)` pair hosts consume.
    pub fn into_parts(self) -> (bool, String) {
        (self.passed, self.diagnostic)
    }
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        Self::from_bool(passed)
    }
}

impl From<Verdict> for (bool, String) {
    fn from(verdict: Verdict) -> Self {
        verdict.into_parts()
    }
}
