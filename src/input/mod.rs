use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod validate;

pub const FIELD_GENE: &str = "gene";
pub const FIELD_IMPACT: &str = "impact";
pub const FIELD_EFFECT: &str = "effect";
pub const FIELD_AF: &str = "af";
pub const FIELD_CLINICAL_SIGNIFICANCE: &str = "clinicalSignificance";
pub const FIELD_CONSERVATION: &str = "conservation";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantRecord {
    fields: Map<String, Value>,
}

impl VariantRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn gene(&self) -> Option<&str> {
        self.non_empty_str(FIELD_GENE)
    }

    pub fn impact(&self) -> Option<&str> {
        self.non_empty_str(FIELD_IMPACT)
            .or_else(|| self.non_empty_str(FIELD_EFFECT))
    }

    pub fn af(&self) -> Option<f64> {
        self.finite_number(FIELD_AF)
    }

    pub fn clinical_significance(&self) -> Option<&str> {
        self.non_empty_str(FIELD_CLINICAL_SIGNIFICANCE)
    }

    pub fn conservation(&self) -> Option<f64> {
        self.finite_number(FIELD_CONSERVATION)
    }

    fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    fn finite_number(&self, key: &str) -> Option<f64> {
        self.fields
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }
}

impl From<Map<String, Value>> for VariantRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_fields(fields)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn read_request_body(path: &Path) -> Result<Value, InputError> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| InputError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        buf
    } else {
        fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?
    };

    tracing::debug!(path = %path.display(), bytes = raw.len(), "read request body");

    serde_json::from_str(&raw).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
