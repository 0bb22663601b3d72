use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::features::FEATURE_DIM;

pub const LINEAR_MODEL_FILE: &str = "linear_model.json";
pub const DENSE_MODEL_DIR: &str = "dense_model";
pub const ONNX_MODEL_FILE: &str = "model.onnx";
pub const DEFAULT_MODEL_DIR: &str = "models";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub weights: [f64; FEATURE_DIM],
    pub bias: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt model file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    root: PathBuf,
}

impl ModelPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn linear_model(&self) -> PathBuf {
        self.root.join(LINEAR_MODEL_FILE)
    }

    pub fn dense_model_dir(&self) -> PathBuf {
        self.root.join(DENSE_MODEL_DIR)
    }

    pub fn onnx_model(&self) -> PathBuf {
        self.root.join(ONNX_MODEL_FILE)
    }
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_DIR)
    }
}

pub fn save_model(path: &Path, params: &ModelParameters) -> Result<(), ModelError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ModelError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    let json = serde_json::to_string_pretty(params).map_err(|e| ModelError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    fs::write(path, json).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "saved linear model");
    Ok(())
}

pub fn load_model(path: &Path) -> Result<Option<ModelParameters>, ModelError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ModelError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let params: ModelParameters =
        serde_json::from_str(&raw).map_err(|e| ModelError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !params.bias.is_finite() || params.weights.iter().any(|w| !w.is_finite()) {
        return Err(ModelError::Corrupt {
            path: path.to_path_buf(),
            reason: "non-finite parameter".to_string(),
        });
    }

    Ok(Some(params))
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/params.rs"]
mod tests;
