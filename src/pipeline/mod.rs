use std::collections::BTreeMap;

use serde::Serialize;

use crate::backends::{ScoringBackend, ScoringError, default_chain};
use crate::catalog::loader::load_catalog;
use crate::catalog::{Catalog, ClinicalTrial, TherapyCategory};
use crate::input::VariantRecord;
use crate::model::params::ModelPaths;
use crate::model::scores::ScoredVariant;

pub mod stage1_features;
pub mod stage2_score;
pub mod stage3_adjust;

use stage2_score::Resolver;
use stage3_adjust::{AdjustedSuggestion, adjust_suggestions};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionReport {
    pub categories: BTreeMap<TherapyCategory, Vec<AdjustedSuggestion>>,
    pub clinical_trials: Vec<ClinicalTrial>,
    pub enriched_variants: Vec<ScoredVariant>,
}

pub struct Pipeline {
    resolver: Resolver,
    catalog: Catalog,
}

impl Pipeline {
    pub fn new(paths: &ModelPaths) -> Self {
        Self::with_backends(default_chain(paths), load_catalog())
    }

    pub fn with_backends(backends: Vec<Box<dyn ScoringBackend>>, catalog: Catalog) -> Self {
        let resolver = Resolver::new(backends);
        tracing::debug!(tiers = ?resolver.tier_names(), "pipeline created");
        Self { resolver, catalog }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn score_variants(
        &self,
        variants: &[VariantRecord],
    ) -> Result<Vec<ScoredVariant>, ScoringError> {
        stage2_score::score_variants(&self.resolver, variants)
    }

    pub fn get_suggestions(
        &self,
        variants: &[VariantRecord],
    ) -> Result<SuggestionReport, ScoringError> {
        let enriched = self.score_variants(variants)?;
        let mut categories = BTreeMap::new();
        for &category in TherapyCategory::all() {
            let candidates = self.catalog.in_category(category);
            categories.insert(category, adjust_suggestions(&candidates, &enriched));
        }
        tracing::debug!(
            n_variants = variants.len(),
            n_categories = categories.len(),
            "built suggestion report"
        );
        Ok(SuggestionReport {
            categories,
            clinical_trials: self.catalog.trials.clone(),
            enriched_variants: enriched,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/tests.rs"]
mod tests;
