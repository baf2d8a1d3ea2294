use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chk_core::errors::{CheckError, ErrorInfo};
use serde::{Deserialize, Serialize};

fn config_error(code: &str, err: impl ToString) -> CheckError {
    CheckError::Config(ErrorInfo::new(code, err.to_string()))
}

/// Settings applied when building a [`CheckerRegistry`](crate::CheckerRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Tolerance of the registered `TimeEquals` checker, in microseconds.
    #[serde(default = "RegistryConfig::default_time_equals_tolerance_us")]
    pub time_equals_tolerance_us: u64,
    /// Extra names mapped to existing checkers.
    #[serde(default = "RegistryConfig::default_aliases")]
    pub aliases: BTreeMap<String, String>,
    /// Checker names left out of the registry.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl RegistryConfig {
    fn default_time_equals_tolerance_us() -> u64 {
        1
    }

    fn default_aliases() -> BTreeMap<String, String> {
        [("CloseTo".to_string(), "EqualsWithTolerance".to_string())]
            .into_iter()
            .collect()
    }

    /// Parses a TOML document; missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, CheckError> {
        toml::from_str(text).map_err(|err| config_error("config-parse", err))
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, CheckError> {
        toml::to_string_pretty(self).map_err(|err| config_error("config-serialize", err))
    }

    /// `TimeEquals` tolerance in microseconds as a signed quantity.
    pub fn time_equals_tolerance(&self) -> Result<i64, CheckError> {
        i64::try_from(self.time_equals_tolerance_us).map_err(|_| {
            CheckError::Config(
                ErrorInfo::new("config-tolerance", "time_equals_tolerance_us is out of range")
                    .with_context("value", self.time_equals_tolerance_us.to_string()),
            )
        })
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            time_equals_tolerance_us: Self::default_time_equals_tolerance_us(),
            aliases: Self::default_aliases(),
            disabled: Vec::new(),
        }
    }
}

/// Loads a registry configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RegistryConfig, CheckError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        CheckError::Config(
            ErrorInfo::new("config-read", format!("failed to read config: {err}"))
                .with_context("path", path.display().to_string()),
        )
    })?;
    RegistryConfig::from_toml_str(&contents).map_err(|err| match err {
        CheckError::Config(info) => {
            CheckError::Config(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })
}
