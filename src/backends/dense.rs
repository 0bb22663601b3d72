use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::backends::{BackendUnavailable, LoadedModel, ScoringBackend, ScoringError};
use crate::model::features::{FEATURE_DIM, FeatureVector};
use crate::model::linear::sigmoid;

const NAME: &str = "dense-network";
pub const DENSE_MODEL_FILE: &str = "model.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => x.tanh(),
        }
    }
}

// weights[out][in]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseNetwork {
    pub layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    pub fn validate(&self) -> Result<(), String> {
        if self.layers.is_empty() {
            return Err("network has no layers".to_string());
        }
        let mut width = FEATURE_DIM;
        for (idx, layer) in self.layers.iter().enumerate() {
            if layer.weights.is_empty() {
                return Err(format!("layer {idx} has no units"));
            }
            if layer.weights.len() != layer.bias.len() {
                return Err(format!(
                    "layer {idx} has {} weight rows but {} biases",
                    layer.weights.len(),
                    layer.bias.len()
                ));
            }
            if let Some(row) = layer.weights.iter().position(|r| r.len() != width) {
                return Err(format!(
                    "layer {idx} row {row} expects {} inputs, previous width is {width}",
                    layer.weights[row].len()
                ));
            }
            let finite = layer.weights.iter().flatten().all(|w| w.is_finite())
                && layer.bias.iter().all(|b| b.is_finite());
            if !finite {
                return Err(format!("layer {idx} has non-finite parameters"));
            }
            width = layer.bias.len();
        }
        Ok(())
    }

    pub fn forward(&self, x: &FeatureVector) -> f64 {
        let mut current: Vec<f64> = x.to_vec();
        for layer in &self.layers {
            current = layer
                .weights
                .iter()
                .zip(layer.bias.iter())
                .map(|(row, b)| {
                    let z = row.iter().zip(current.iter()).map(|(w, v)| w * v).sum::<f64>() + b;
                    layer.activation.apply(z)
                })
                .collect();
        }
        current.first().copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct DenseBackend {
    dir: PathBuf,
}

impl DenseBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ScoringBackend for DenseBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn try_load(&self) -> Result<Arc<dyn LoadedModel>, BackendUnavailable> {
        let path = self.dir.join(DENSE_MODEL_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(BackendUnavailable::new(
                    NAME,
                    format!("{} not found", path.display()),
                ));
            }
            Err(e) => return Err(BackendUnavailable::new(NAME, e.to_string())),
        };
        let network: DenseNetwork = serde_json::from_str(&raw)
            .map_err(|e| BackendUnavailable::new(NAME, format!("parse error: {e}")))?;
        network
            .validate()
            .map_err(|reason| BackendUnavailable::new(NAME, reason))?;

        tracing::info!(
            path = %path.display(),
            layers = network.layers.len(),
            "loaded dense network"
        );
        Ok(Arc::new(network))
    }
}

impl LoadedModel for DenseNetwork {
    fn score(&self, features: &[FeatureVector]) -> Result<Vec<f64>, ScoringError> {
        Ok(features.iter().map(|f| self.forward(f)).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/backends/dense.rs"]
mod tests;
