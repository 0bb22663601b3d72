use proptest::prelude::*;
use serde_json::{Value, json};

use super::*;
use crate::strategies::arb_record;

fn record(value: Value) -> VariantRecord {
    match value {
        Value::Object(map) => VariantRecord::from_fields(map),
        _ => panic!("test record must be an object"),
    }
}

#[test]
fn test_extract_full_record() {
    let v = record(json!({
        "gene": "BRCA1",
        "impact": "HIGH",
        "af": 0.02,
        "clinicalSignificance": "Pathogenic",
        "conservation": 0.8
    }));
    assert_eq!(extract_features(&v), [1.0, 0.02, 1.0, 0.8]);
}

#[test]
fn test_extract_empty_record_uses_defaults() {
    let v = VariantRecord::new();
    assert_eq!(
        extract_features(&v),
        [IMPACT_UNKNOWN, AF_MISSING, CS_UNKNOWN, CONSERVATION_MISSING]
    );
    assert_eq!(extract_features(&v), [0.5, 0.0, 0.5, 0.5]);
}

#[test]
fn test_impact_levels_and_effect_alias() {
    let cases = [
        ("HIGH", 1.0),
        ("moderate", 0.7),
        (" Low ", 0.3),
        ("MODIFIER", 0.1),
        ("SEVERE", 0.5),
    ];
    for (label, want) in cases {
        let v = record(json!({ "impact": label }));
        assert_eq!(extract_features(&v)[0], want, "impact {label}");
    }

    let alias = record(json!({ "effect": "moderate" }));
    assert_eq!(extract_features(&alias)[0], 0.7);
}

#[test]
fn test_af_and_conservation_clamped() {
    let high = record(json!({ "af": 1.7, "conservation": -3.0 }));
    let f = extract_features(&high);
    assert_eq!(f[1], 1.0);
    assert_eq!(f[3], 0.0);

    let low = record(json!({ "af": -0.2, "conservation": 4 }));
    let f = extract_features(&low);
    assert_eq!(f[1], 0.0);
    assert_eq!(f[3], 1.0);
}

#[test]
fn test_wrong_types_fall_back() {
    let v = record(json!({
        "impact": 3,
        "af": "0.3",
        "clinicalSignificance": false,
        "conservation": null
    }));
    assert_eq!(extract_features(&v), [0.5, 0.0, 0.5, 0.5]);
}

#[test]
fn test_clinical_significance_substrings() {
    let cases = [
        ("Pathogenic", 1.0),
        ("Likely pathogenic", 1.0),
        ("benign", 0.0),
        ("Likely benign", 0.0),
        ("Uncertain significance", 0.5),
        ("", 0.5),
    ];
    for (label, want) in cases {
        let v = record(json!({ "clinicalSignificance": label }));
        assert_eq!(extract_features(&v)[2], want, "significance {label:?}");
    }
}

#[test]
fn test_extract_all_preserves_order() {
    let variants = vec![
        record(json!({ "impact": "LOW" })),
        record(json!({ "impact": "HIGH" })),
    ];
    let rows = extract_all(&variants);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], 0.3);
    assert_eq!(rows[1][0], 1.0);
}

proptest! {
    #[test]
    fn prop_features_always_in_unit_range(v in arb_record()) {
        let f = extract_features(&v);
        for x in f {
            prop_assert!(x.is_finite());
            prop_assert!((0.0..=1.0).contains(&x));
        }
    }
}
