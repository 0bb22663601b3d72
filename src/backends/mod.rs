use std::sync::Arc;

use crate::model::features::FeatureVector;
use crate::model::params::ModelPaths;

pub mod dense;
pub mod heuristic;
pub mod linear;
pub mod onnx;

pub use dense::DenseBackend;
pub use heuristic::HeuristicBackend;
pub use linear::LinearBackend;
pub use onnx::OnnxBackend;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{backend} backend unavailable: {reason}")]
pub struct BackendUnavailable {
    pub backend: &'static str,
    pub reason: String,
}

impl BackendUnavailable {
    pub fn new(backend: &'static str, reason: impl Into<String>) -> Self {
        Self {
            backend,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("{backend} backend failed: {reason}")]
    Backend {
        backend: &'static str,
        reason: String,
    },
    #[error("{backend} backend returned {got} scores for {expected} variants")]
    LengthMismatch {
        backend: &'static str,
        expected: usize,
        got: usize,
    },
}

pub trait ScoringBackend: Send + Sync {
    fn name(&self) -> &'static str;
    fn try_load(&self) -> Result<Arc<dyn LoadedModel>, BackendUnavailable>;
}

pub trait LoadedModel: Send + Sync {
    fn score(&self, features: &[FeatureVector]) -> Result<Vec<f64>, ScoringError>;
}

pub fn default_chain(paths: &ModelPaths) -> Vec<Box<dyn ScoringBackend>> {
    vec![
        Box::new(DenseBackend::new(paths.dense_model_dir())),
        Box::new(OnnxBackend::new(paths.onnx_model())),
        Box::new(LinearBackend::new(paths.linear_model())),
        Box::new(HeuristicBackend),
    ]
}
