use std::sync::Arc;

use crate::backends::{BackendUnavailable, LoadedModel, ScoringBackend, ScoringError};
use crate::model::features::{FeatureVector, clamp_to};

pub const HEURISTIC_WEIGHTS: [f64; 4] = [0.2, 0.3, 0.4, 0.1];
pub const HEURISTIC_MIN: f64 = 0.001;
pub const HEURISTIC_MAX: f64 = 0.999;

pub fn heuristic_score(f: &FeatureVector) -> f64 {
    let raw: f64 = HEURISTIC_WEIGHTS
        .iter()
        .zip(f.iter())
        .map(|(w, v)| w * v)
        .sum();
    clamp_to(raw, HEURISTIC_MIN, HEURISTIC_MAX)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicBackend;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicModel;

impl ScoringBackend for HeuristicBackend {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn try_load(&self) -> Result<Arc<dyn LoadedModel>, BackendUnavailable> {
        Ok(Arc::new(HeuristicModel))
    }
}

impl LoadedModel for HeuristicModel {
    fn score(&self, features: &[FeatureVector]) -> Result<Vec<f64>, ScoringError> {
        Ok(features.iter().map(heuristic_score).collect())
    }
}
