use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;
use serde_json::json;

use super::*;
use crate::backends::heuristic::heuristic_score;
use crate::backends::{DenseBackend, LinearBackend, default_chain};
use crate::model::params::{ModelParameters, ModelPaths, save_model};
use crate::strategies::arb_record;

struct PanickingBackend;

impl ScoringBackend for PanickingBackend {
    fn name(&self) -> &'static str {
        "panics"
    }

    fn try_load(&self) -> Result<Arc<dyn LoadedModel>, BackendUnavailable> {
        panic!("loader blew up")
    }
}

struct FailingModel;

impl LoadedModel for FailingModel {
    fn score(&self, _features: &[FeatureVector]) -> Result<Vec<f64>, ScoringError> {
        Err(ScoringError::Backend {
            backend: "failing",
            reason: "inference error".to_string(),
        })
    }
}

struct FixedOutput(Vec<f64>);

impl LoadedModel for FixedOutput {
    fn score(&self, _features: &[FeatureVector]) -> Result<Vec<f64>, ScoringError> {
        Ok(self.0.clone())
    }
}

/// Hands out a fixed model and counts load attempts.
struct StubBackend {
    name: &'static str,
    model: Arc<dyn LoadedModel>,
    loads: Arc<AtomicUsize>,
}

impl ScoringBackend for StubBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn try_load(&self) -> Result<Arc<dyn LoadedModel>, BackendUnavailable> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.model))
    }
}

fn stub(name: &'static str, model: Arc<dyn LoadedModel>) -> (Box<dyn ScoringBackend>, Arc<AtomicUsize>) {
    let loads = Arc::new(AtomicUsize::new(0));
    let backend = StubBackend {
        name,
        model,
        loads: Arc::clone(&loads),
    };
    (Box::new(backend), loads)
}

fn sample_params() -> ModelParameters {
    ModelParameters {
        weights: [2.0, -1.0, 3.0, 0.5],
        bias: -2.0,
    }
}

fn sample_variants() -> Vec<VariantRecord> {
    vec![
        VariantRecord::new()
            .with("gene", json!("BRCA1"))
            .with("impact", json!("HIGH"))
            .with("af", json!(0.001))
            .with("clinicalSignificance", json!("Pathogenic"))
            .with("conservation", json!(0.9)),
        VariantRecord::new()
            .with("gene", json!("KRAS"))
            .with("impact", json!("LOW"))
            .with("clinicalSignificance", json!("Benign")),
        VariantRecord::new().with("note", json!("no scoring fields")),
    ]
}

fn write_dense_model(paths: &ModelPaths) {
    let dir = paths.dense_model_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let model = json!({
        "layers": [
            {"weights": [[0.0, 0.0, 0.0, 0.0]], "bias": [0.0], "activation": "sigmoid"}
        ]
    });
    std::fs::write(dir.join("model.json"), model.to_string()).unwrap();
}

#[test]
fn test_empty_model_dir_falls_back_to_heuristic() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = Resolver::new(default_chain(&ModelPaths::new(dir.path())));
    assert_eq!(
        resolver.tier_names(),
        vec!["dense-network", "onnx", "linear", "heuristic"]
    );
    let resolved = resolver.resolve();
    assert_eq!(resolved.backend, "heuristic");

    let features = extract_all(&sample_variants());
    let (backend, scores) = resolver.score_features(&features).unwrap();
    assert_eq!(backend, "heuristic");
    for (f, s) in features.iter().zip(&scores) {
        assert_eq!(*s, heuristic_score(f));
    }
}

#[test]
fn test_trained_linear_model_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ModelPaths::new(dir.path());
    save_model(&paths.linear_model(), &sample_params()).unwrap();

    let resolver = Resolver::new(default_chain(&paths));
    assert_eq!(resolver.resolve().backend, "linear");

    let features = extract_all(&sample_variants());
    let (_, scores) = resolver.score_features(&features).unwrap();
    for (f, s) in features.iter().zip(&scores) {
        assert!((s - crate::model::linear::predict(&sample_params(), f)).abs() < 1e-12);
    }
}

#[test]
fn test_dense_model_takes_priority_over_linear() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ModelPaths::new(dir.path());
    save_model(&paths.linear_model(), &sample_params()).unwrap();
    write_dense_model(&paths);

    let resolver = Resolver::new(default_chain(&paths));
    assert_eq!(resolver.resolve().backend, "dense-network");
    let (_, scores) = resolver
        .score_features(&extract_all(&sample_variants()))
        .unwrap();
    assert!(scores.iter().all(|s| (s - 0.5).abs() < 1e-12));
}

#[test]
fn test_corrupt_artifacts_fall_through() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ModelPaths::new(dir.path());
    std::fs::create_dir_all(paths.dense_model_dir()).unwrap();
    std::fs::write(paths.dense_model_dir().join("model.json"), "{ broken").unwrap();
    std::fs::write(paths.onnx_model(), b"not an onnx graph").unwrap();
    save_model(&paths.linear_model(), &sample_params()).unwrap();

    let resolver = Resolver::new(default_chain(&paths));
    assert_eq!(resolver.resolve().backend, "linear");
}

#[test]
fn test_panicking_loader_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ModelPaths::new(dir.path());
    save_model(&paths.linear_model(), &sample_params()).unwrap();

    let resolver = Resolver::new(vec![
        Box::new(PanickingBackend),
        Box::new(LinearBackend::new(paths.linear_model())),
    ]);
    assert_eq!(resolver.resolve().backend, "linear");
}

#[test]
fn test_no_tiers_still_scores() {
    let resolver = Resolver::new(Vec::new());
    let (backend, scores) = resolver.score_features(&[[1.0, 0.0, 1.0, 1.0]]).unwrap();
    assert_eq!(backend, "heuristic");
    assert_eq!(scores, vec![heuristic_score(&[1.0, 0.0, 1.0, 1.0])]);
}

#[test]
fn test_loaded_backend_error_is_not_masked() {
    let (failing, _) = stub("failing", Arc::new(FailingModel));
    let resolver = Resolver::new(vec![failing, Box::new(HeuristicBackend)]);
    let err = resolver.score_features(&[[0.5; 4]]).unwrap_err();
    assert!(matches!(err, ScoringError::Backend { backend: "failing", .. }));
}

#[test]
fn test_wrong_output_length_is_an_error() {
    let (short, _) = stub("short", Arc::new(FixedOutput(vec![0.3])));
    let resolver = Resolver::new(vec![short]);
    let err = resolver.score_features(&[[0.5; 4], [0.5; 4]]).unwrap_err();
    match err {
        ScoringError::LengthMismatch {
            backend,
            expected,
            got,
        } => {
            assert_eq!(backend, "short");
            assert_eq!(expected, 2);
            assert_eq!(got, 1);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_raw_outputs_are_sanitized() {
    let (wild, _) = stub(
        "wild",
        Arc::new(FixedOutput(vec![1.5, -0.25, f64::NAN, f64::INFINITY, 0.42])),
    );
    let resolver = Resolver::new(vec![wild]);
    let (_, scores) = resolver.score_features(&[[0.5; 4]; 5]).unwrap();
    assert_eq!(scores, vec![1.0, 0.0, 0.0, 0.0, 0.42]);
}

#[test]
fn test_loaded_tier_is_memoized() {
    let (counted, loads) = stub("counted", Arc::new(FixedOutput(vec![0.7])));
    let resolver = Resolver::new(vec![counted]);
    for _ in 0..3 {
        assert_eq!(resolver.resolve().backend, "counted");
    }
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_memoized_model_survives_file_removal() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ModelPaths::new(dir.path());
    save_model(&paths.linear_model(), &sample_params()).unwrap();

    let resolver = Resolver::new(default_chain(&paths));
    assert_eq!(resolver.resolve().backend, "linear");
    std::fs::remove_file(paths.linear_model()).unwrap();
    assert_eq!(resolver.resolve().backend, "linear");
}

#[test]
fn test_unavailable_tier_is_retried() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ModelPaths::new(dir.path());
    let resolver = Resolver::new(default_chain(&paths));
    assert_eq!(resolver.resolve().backend, "heuristic");

    write_dense_model(&paths);
    assert_eq!(resolver.resolve().backend, "dense-network");
}

#[test]
fn test_score_variants_attaches_scores_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = Resolver::new(vec![Box::new(DenseBackend::new(dir.path()))]);
    let variants = sample_variants();
    let first = score_variants(&resolver, &variants).unwrap();
    let second = score_variants(&resolver, &variants).unwrap();

    assert_eq!(first.len(), variants.len());
    assert_eq!(first, second);
    for (scored, original) in first.iter().zip(&variants) {
        assert!((0.0..=1.0).contains(&scored.pathogenicity_score));
        for (k, v) in original.fields() {
            assert_eq!(scored.record.get(k), Some(v));
        }
    }
    assert_eq!(first[0].gene(), Some("BRCA1"));
    assert!(first[0].pathogenicity_score > first[1].pathogenicity_score);
}

#[test]
fn test_score_variants_empty_input() {
    let (counted, loads) = stub("counted", Arc::new(FixedOutput(vec![])));
    let resolver = Resolver::new(vec![counted]);
    assert!(score_variants(&resolver, &[]).unwrap().is_empty());
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}

proptest! {
    #[test]
    fn prop_scores_cover_every_variant_in_unit_range(
        variants in prop::collection::vec(arb_record(), 0..24),
    ) {
        let resolver = Resolver::new(vec![Box::new(HeuristicBackend)]);
        let scored = score_variants(&resolver, &variants).unwrap();
        prop_assert_eq!(scored.len(), variants.len());
        for (out, original) in scored.iter().zip(&variants) {
            prop_assert!((0.0..=1.0).contains(&out.pathogenicity_score));
            prop_assert_eq!(out.gene(), original.gene());
        }
    }

    #[test]
    fn prop_linear_scores_stay_in_unit_range(
        variants in prop::collection::vec(arb_record(), 1..16),
        weights in prop::array::uniform4(-50.0f64..50.0),
        bias in -50.0f64..50.0,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let paths = ModelPaths::new(dir.path());
        save_model(&paths.linear_model(), &ModelParameters { weights, bias }).unwrap();
        let resolver = Resolver::new(default_chain(&paths));
        let scored = score_variants(&resolver, &variants).unwrap();
        prop_assert_eq!(scored.len(), variants.len());
        prop_assert!(scored.iter().all(|s| (0.0..=1.0).contains(&s.pathogenicity_score)));
    }
}
