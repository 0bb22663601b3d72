use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::SuggestionCandidate;
use crate::model::features::{clamp_to, clip01};
use crate::model::scores::ScoredVariant;
use crate::model::thresholds::{AdjustmentProfile, ConfidenceLabel};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedSuggestion {
    #[serde(flatten)]
    pub candidate: SuggestionCandidate,
    pub confidence_score: f64,
    pub confidence: ConfidenceLabel,
    pub matched_variants: usize,
}

pub fn adjust_suggestions(
    candidates: &[SuggestionCandidate],
    scored: &[ScoredVariant],
) -> Vec<AdjustedSuggestion> {
    adjust_with_profile(candidates, scored, &AdjustmentProfile::default_v1())
}

pub fn adjust_with_profile(
    candidates: &[SuggestionCandidate],
    scored: &[ScoredVariant],
    profile: &AdjustmentProfile,
) -> Vec<AdjustedSuggestion> {
    candidates
        .iter()
        .map(|candidate| adjust_one(candidate, scored, profile))
        .collect()
}

fn adjust_one(
    candidate: &SuggestionCandidate,
    scored: &[ScoredVariant],
    profile: &AdjustmentProfile,
) -> AdjustedSuggestion {
    let targets: BTreeSet<String> = candidate
        .target_genes
        .iter()
        .map(|g| normalize_gene(g))
        .collect();

    let mut sum = 0.0f64;
    let mut matched = 0usize;
    if !targets.is_empty() {
        for variant in scored {
            let Some(gene) = variant.gene() else {
                continue;
            };
            if targets.contains(&normalize_gene(gene)) {
                sum += clip01(variant.pathogenicity_score);
                matched += 1;
            }
        }
    }
    let avg = if matched > 0 {
        sum / matched as f64
    } else {
        0.0
    };

    let base = candidate
        .base_confidence_score
        .filter(|b| b.is_finite())
        .unwrap_or(profile.default_base_confidence);
    let score = clamp_to(
        base + avg * profile.pathogenicity_weight,
        0.0,
        profile.max_confidence,
    );

    AdjustedSuggestion {
        candidate: candidate.clone(),
        confidence_score: score,
        confidence: profile.label(score),
        matched_variants: matched,
    }
}

fn normalize_gene(gene: &str) -> String {
    gene.trim().to_uppercase()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_adjust.rs"]
mod tests;
