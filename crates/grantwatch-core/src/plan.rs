use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::{Error as _, Unexpected};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read plan file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in plan file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub resource_changes: Vec<RawChangeRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawChangeRecord {
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub change: PlannedChange,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlannedChange {
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub before: Value,
    #[serde(default)]
    pub after: Value,
}

impl RawChangeRecord {
    pub fn actions(&self) -> &[String] {
        &self.change.actions
    }

    pub fn has_action(&self, verb: &str) -> bool {
        self.change.actions.iter().any(|action| action == verb)
    }
}

pub fn parse_plan(raw: &str) -> Result<PlanDocument, serde_json::Error> {
    parse_plan_slice(raw.as_bytes())
}

/// Parses plan bytes. The top-level value must be a JSON object.
pub fn parse_plan_slice(raw: &[u8]) -> Result<PlanDocument, serde_json::Error> {
    let value: Value = serde_json::from_slice(raw)?;
    if value.is_object() {
        return serde_json::from_value(value);
    }

    let unexpected = match &value {
        Value::Object(_) => Unexpected::Map,
        Value::Array(_) => Unexpected::Seq,
        Value::Null => Unexpected::Unit,
        Value::Bool(flag) => Unexpected::Bool(*flag),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(text) => Unexpected::Str(text),
    };
    Err(serde_json::Error::invalid_type(
        unexpected,
        &"a plan object with resource_changes",
    ))
}

pub fn load_plan(path: impl AsRef<Path>) -> Result<PlanDocument, PlanError> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => PlanError::NotFound {
            path: path.to_path_buf(),
        },
        _ => PlanError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_plan_slice(&raw).map_err(|source| PlanError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
