use serde::Serialize;

use crate::input::VariantRecord;
use crate::model::features::clip01;

pub const FIELD_PATHOGENICITY_SCORE: &str = "pathogenicityScore";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredVariant {
    #[serde(flatten)]
    pub record: VariantRecord,
    #[serde(rename = "pathogenicityScore")]
    pub pathogenicity_score: f64,
}

impl ScoredVariant {
    pub fn new(record: &VariantRecord, score: f64) -> Self {
        let mut fields = record.fields().clone();
        fields.remove(FIELD_PATHOGENICITY_SCORE);
        Self {
            record: VariantRecord::from_fields(fields),
            pathogenicity_score: clip01(score),
        }
    }

    pub fn gene(&self) -> Option<&str> {
        self.record.gene()
    }
}
