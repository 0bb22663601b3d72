use std::path::PathBuf;
use std::sync::Arc;

use crate::backends::{BackendUnavailable, LoadedModel, ScoringBackend, ScoringError};
use crate::model::features::FeatureVector;
use crate::model::linear::predict;
use crate::model::params::{ModelParameters, load_model};

const NAME: &str = "linear";

#[derive(Debug, Clone)]
pub struct LinearBackend {
    path: PathBuf,
}

impl LinearBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoringBackend for LinearBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn try_load(&self) -> Result<Arc<dyn LoadedModel>, BackendUnavailable> {
        match load_model(&self.path) {
            Ok(Some(params)) => {
                tracing::info!(path = %self.path.display(), "loaded linear model");
                Ok(Arc::new(params))
            }
            Ok(None) => Err(BackendUnavailable::new(
                NAME,
                format!("no trained model at {}", self.path.display()),
            )),
            Err(e) => {
                tracing::warn!(error = %e, "linear model present but unreadable");
                Err(BackendUnavailable::new(NAME, e.to_string()))
            }
        }
    }
}

impl LoadedModel for ModelParameters {
    fn score(&self, features: &[FeatureVector]) -> Result<Vec<f64>, ScoringError> {
        Ok(features.iter().map(|f| predict(self, f)).collect())
    }
}
