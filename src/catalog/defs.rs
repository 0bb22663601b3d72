#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TherapyCategory {
    SmallMolecule,
    Biologic,
    GeneTherapy,
}

impl TherapyCategory {
    pub fn all() -> &'static [TherapyCategory] {
        &[
            TherapyCategory::SmallMolecule,
            TherapyCategory::Biologic,
            TherapyCategory::GeneTherapy,
        ]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReferenceDef {
    pub pmid: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct CandidateDef {
    pub id: &'static str,
    pub name: &'static str,
    pub category: TherapyCategory,
    pub target_genes: &'static [&'static str],
    pub mechanism: &'static str,
    pub clinical_phase: &'static str,
    pub indications: &'static [&'static str],
    pub references: &'static [ReferenceDef],
    pub base_confidence: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct TrialDef {
    pub id: &'static str,
    pub title: &'static str,
    pub phase: &'static str,
    pub status: &'static str,
    pub locations: &'static [&'static str],
    pub url: &'static str,
}

const PARP_TARGETS: &[&str] = &["BRCA1", "BRCA2"];
const HER2_TARGETS: &[&str] = &["ERBB2"];
const GENE_EDITING_TARGETS: &[&str] = &["BRCA1", "BRCA2", "TP53"];

const BUILTIN_CANDIDATES: &[CandidateDef] = &[
    CandidateDef {
        id: "SM001",
        name: "Olaparib",
        category: TherapyCategory::SmallMolecule,
        target_genes: PARP_TARGETS,
        mechanism: "PARP inhibition",
        clinical_phase: "Approved",
        indications: &["Breast cancer", "Ovarian cancer"],
        references: &[ReferenceDef {
            pmid: "24567426",
            title: "Olaparib in patients with recurrent high-grade serous ovarian carcinoma",
        }],
        base_confidence: Some(0.6),
    },
    CandidateDef {
        id: "SM002",
        name: "Talazoparib",
        category: TherapyCategory::SmallMolecule,
        target_genes: PARP_TARGETS,
        mechanism: "PARP inhibition",
        clinical_phase: "Approved",
        indications: &["Breast cancer"],
        references: &[ReferenceDef {
            pmid: "29863979",
            title: "Talazoparib in Patients with Advanced Breast Cancer and a Germline BRCA Mutation",
        }],
        base_confidence: Some(0.55),
    },
    CandidateDef {
        id: "BIO001",
        name: "Trastuzumab",
        category: TherapyCategory::Biologic,
        target_genes: HER2_TARGETS,
        mechanism: "HER2 inhibition",
        clinical_phase: "Approved",
        indications: &["Breast cancer", "Gastric cancer"],
        references: &[ReferenceDef {
            pmid: "11248153",
            title: "Use of chemotherapy plus a monoclonal antibody against HER2",
        }],
        base_confidence: Some(0.35),
    },
    CandidateDef {
        id: "GT001",
        name: "CRISPR-Cas9 gene editing",
        category: TherapyCategory::GeneTherapy,
        target_genes: GENE_EDITING_TARGETS,
        mechanism: "Gene correction",
        clinical_phase: "Phase I",
        indications: &["Various cancers"],
        references: &[ReferenceDef {
            pmid: "31802835",
            title: "CRISPR-Cas9 gene editing for cancer therapeutics",
        }],
        base_confidence: Some(0.25),
    },
];

const BUILTIN_TRIALS: &[TrialDef] = &[
    TrialDef {
        id: "NCT03367689",
        title: "A Study of Rucaparib in Patients With Various Solid Tumors With BRCA1, BRCA2, or PALB2 Mutations",
        phase: "Phase II",
        status: "Recruiting",
        locations: &["United States", "Canada", "United Kingdom"],
        url: "https://clinicaltrials.gov/ct2/show/NCT03367689",
    },
    TrialDef {
        id: "NCT04171700",
        title: "A Study of Olaparib Plus Pembrolizumab in Participants With Advanced Cancer",
        phase: "Phase I/II",
        status: "Recruiting",
        locations: &["United States", "Spain", "Korea"],
        url: "https://clinicaltrials.gov/ct2/show/NCT04171700",
    },
];

pub fn builtin_candidates() -> &'static [CandidateDef] {
    BUILTIN_CANDIDATES
}

pub fn builtin_trials() -> &'static [TrialDef] {
    BUILTIN_TRIALS
}
