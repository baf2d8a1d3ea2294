//! Canonical JSON helpers for descriptors, verdicts and host-supplied values.

use std::collections::BTreeMap;
use std::iter::FromIterator;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Map;

use crate::errors::{CheckError, ErrorInfo};
use crate::value::Value;

fn serde_error(code: &str, err: impl ToString) -> CheckError {
    CheckError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            serde_json::Value::Object(Map::from_iter(ordered))
        }
        serde_json::Value::Array(values) => {
            serde_json::Value::Array(values.into_iter().map(canonicalize).collect())
        }
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic key order.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, CheckError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-serialize", err))?;
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonicalize(value))
        .map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, CheckError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json-deserialize", err))
}

/// Decodes a JSON array into positional checker parameters.
pub fn params_from_json_slice(data: &[u8]) -> Result<Vec<Value>, CheckError> {
    let items: Vec<serde_json::Value> = from_json_slice(data).map_err(|err| {
        CheckError::Serde(
            ErrorInfo::new("json-params", err.info().message.clone())
                .with_hint("checker parameters must be a JSON array"),
        )
    })?;
    Ok(items.into_iter().map(Value::from).collect())
}
