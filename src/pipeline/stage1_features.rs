use crate::input::VariantRecord;
use crate::model::features::{FeatureVector, clip01};

pub const IMPACT_UNKNOWN: f64 = 0.5;
pub const AF_MISSING: f64 = 0.0;
pub const CS_UNKNOWN: f64 = 0.5;
pub const CONSERVATION_MISSING: f64 = 0.5;

const IMPACT_TABLE: &[(&str, f64)] = &[
    ("HIGH", 1.0),
    ("MODERATE", 0.7),
    ("LOW", 0.3),
    ("MODIFIER", 0.1),
];

pub fn extract_features(variant: &VariantRecord) -> FeatureVector {
    [
        impact_feature(variant.impact()),
        variant.af().map(clip01).unwrap_or(AF_MISSING),
        clinical_significance_feature(variant.clinical_significance()),
        variant
            .conservation()
            .map(clip01)
            .unwrap_or(CONSERVATION_MISSING),
    ]
}

pub fn extract_all(variants: &[VariantRecord]) -> Vec<FeatureVector> {
    variants.iter().map(extract_features).collect()
}

fn impact_feature(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return IMPACT_UNKNOWN;
    };
    let key = raw.trim();
    IMPACT_TABLE
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(key))
        .map(|&(_, v)| v)
        .unwrap_or(IMPACT_UNKNOWN)
}

fn clinical_significance_feature(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return CS_UNKNOWN;
    };
    let lower = raw.to_lowercase();
    if lower.contains("path") {
        1.0
    } else if lower.contains("benign") {
        0.0
    } else {
        CS_UNKNOWN
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_features.rs"]
mod tests;
