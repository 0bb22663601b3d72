use serde::Serialize;

pub mod defs;
pub mod loader;

pub use defs::TherapyCategory;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub pmid: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionCandidate {
    pub id: String,
    pub name: String,
    pub category: TherapyCategory,
    pub target_genes: Vec<String>,
    pub mechanism: String,
    pub clinical_phase: String,
    pub indications: Vec<String>,
    pub references: Vec<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_confidence_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicalTrial {
    pub id: String,
    pub title: String,
    pub phase: String,
    pub status: String,
    pub locations: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub candidates: Vec<SuggestionCandidate>,
    pub trials: Vec<ClinicalTrial>,
}

impl Catalog {
    pub fn in_category(&self, category: TherapyCategory) -> Vec<SuggestionCandidate> {
        self.candidates
            .iter()
            .filter(|c| c.category == category)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/catalog/tests.rs"]
mod tests;
