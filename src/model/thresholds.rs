use serde::Serialize;

#[derive(Debug, Clone)]
pub struct AdjustmentProfile {
    pub default_base_confidence: f64,
    pub pathogenicity_weight: f64,
    pub max_confidence: f64,
    pub high_above: f64,
    pub medium_above: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

impl AdjustmentProfile {
    pub fn default_v1() -> Self {
        Self {
            default_base_confidence: 0.4,
            pathogenicity_weight: 0.5,
            max_confidence: 0.99,
            high_above: 0.7,
            medium_above: 0.45,
        }
    }

    pub fn label(&self, score: f64) -> ConfidenceLabel {
        if score > self.high_above {
            ConfidenceLabel::High
        } else if score > self.medium_above {
            ConfidenceLabel::Medium
        } else {
            ConfidenceLabel::Low
        }
    }
}
