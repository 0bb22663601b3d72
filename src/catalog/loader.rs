use crate::catalog::defs::{CandidateDef, TrialDef, builtin_candidates, builtin_trials};
use crate::catalog::{Catalog, ClinicalTrial, Reference, SuggestionCandidate};

pub fn load_catalog() -> Catalog {
    Catalog {
        candidates: builtin_candidates().iter().map(map_candidate).collect(),
        trials: builtin_trials().iter().map(map_trial).collect(),
    }
}

fn map_candidate(def: &CandidateDef) -> SuggestionCandidate {
    SuggestionCandidate {
        id: def.id.to_string(),
        name: def.name.to_string(),
        category: def.category,
        target_genes: def.target_genes.iter().map(|g| g.to_string()).collect(),
        mechanism: def.mechanism.to_string(),
        clinical_phase: def.clinical_phase.to_string(),
        indications: def.indications.iter().map(|s| s.to_string()).collect(),
        references: def
            .references
            .iter()
            .map(|r| Reference {
                pmid: r.pmid.to_string(),
                title: r.title.to_string(),
            })
            .collect(),
        base_confidence_score: def.base_confidence,
    }
}

fn map_trial(def: &TrialDef) -> ClinicalTrial {
    ClinicalTrial {
        id: def.id.to_string(),
        title: def.title.to_string(),
        phase: def.phase.to_string(),
        status: def.status.to_string(),
        locations: def.locations.iter().map(|s| s.to_string()).collect(),
        url: def.url.to_string(),
    }
}
