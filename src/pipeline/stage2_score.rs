use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use crate::backends::{
    BackendUnavailable, HeuristicBackend, LoadedModel, ScoringBackend, ScoringError,
};
use crate::input::VariantRecord;
use crate::model::features::{FeatureVector, clip01};
use crate::model::scores::ScoredVariant;
use crate::pipeline::stage1_features::extract_all;

struct Tier {
    backend: Box<dyn ScoringBackend>,
    loaded: OnceLock<Arc<dyn LoadedModel>>,
}

#[derive(Clone)]
pub struct Resolved {
    pub backend: &'static str,
    pub model: Arc<dyn LoadedModel>,
}

// Loaded tiers are kept; failed tiers are retried on the next call.
pub struct Resolver {
    tiers: Vec<Tier>,
}

impl Resolver {
    pub fn new(backends: Vec<Box<dyn ScoringBackend>>) -> Self {
        let tiers = backends
            .into_iter()
            .map(|backend| Tier {
                backend,
                loaded: OnceLock::new(),
            })
            .collect();
        Self { tiers }
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.backend.name()).collect()
    }

    pub fn resolve(&self) -> Resolved {
        for tier in &self.tiers {
            let name = tier.backend.name();
            if let Some(model) = tier.loaded.get() {
                return Resolved {
                    backend: name,
                    model: Arc::clone(model),
                };
            }
            match load_tier(tier.backend.as_ref()) {
                Ok(model) => {
                    // Only a fully loaded model is ever memoized.
                    let model = Arc::clone(tier.loaded.get_or_init(|| model));
                    tracing::debug!(backend = name, "scoring backend selected");
                    return Resolved {
                        backend: name,
                        model,
                    };
                }
                Err(e) => {
                    tracing::debug!(backend = name, reason = %e.reason, "backend unavailable");
                }
            }
        }

        tracing::debug!("no configured backend loaded; using heuristic");
        Resolved {
            backend: HeuristicBackend.name(),
            model: Arc::new(crate::backends::heuristic::HeuristicModel),
        }
    }

    pub fn score_features(
        &self,
        features: &[FeatureVector],
    ) -> Result<(&'static str, Vec<f64>), ScoringError> {
        let resolved = self.resolve();
        let raw = resolved.model.score(features)?;
        if raw.len() != features.len() {
            return Err(ScoringError::LengthMismatch {
                backend: resolved.backend,
                expected: features.len(),
                got: raw.len(),
            });
        }
        let scores = raw.into_iter().map(sanitize_score).collect();
        Ok((resolved.backend, scores))
    }
}

fn load_tier(backend: &dyn ScoringBackend) -> Result<Arc<dyn LoadedModel>, BackendUnavailable> {
    match panic::catch_unwind(AssertUnwindSafe(|| backend.try_load())) {
        Ok(result) => result,
        Err(_) => Err(BackendUnavailable::new(
            backend.name(),
            "loader panicked",
        )),
    }
}

fn sanitize_score(raw: f64) -> f64 {
    if raw.is_finite() { clip01(raw) } else { 0.0 }
}

pub fn score_variants(
    resolver: &Resolver,
    variants: &[VariantRecord],
) -> Result<Vec<ScoredVariant>, ScoringError> {
    if variants.is_empty() {
        return Ok(Vec::new());
    }
    let features = extract_all(variants);
    let (backend, scores) = resolver.score_features(&features)?;
    tracing::debug!(backend, n_variants = variants.len(), "scored variants");
    Ok(variants
        .iter()
        .zip(scores)
        .map(|(v, s)| ScoredVariant::new(v, s))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;
