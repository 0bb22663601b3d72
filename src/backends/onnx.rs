use std::path::PathBuf;
use std::sync::Arc;

use crate::backends::{BackendUnavailable, LoadedModel, ScoringBackend};

const NAME: &str = "onnx";

#[derive(Debug, Clone)]
pub struct OnnxBackend {
    path: PathBuf,
}

impl OnnxBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoringBackend for OnnxBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn try_load(&self) -> Result<Arc<dyn LoadedModel>, BackendUnavailable> {
        if !self.path.is_file() {
            return Err(BackendUnavailable::new(
                NAME,
                format!("{} not found", self.path.display()),
            ));
        }
        load_session(&self.path)
    }
}

#[cfg(not(feature = "onnx"))]
fn load_session(path: &std::path::Path) -> Result<Arc<dyn LoadedModel>, BackendUnavailable> {
    tracing::debug!(
        path = %path.display(),
        "ONNX model present but support was not compiled in"
    );
    Err(BackendUnavailable::new(
        NAME,
        "built without the `onnx` feature",
    ))
}

#[cfg(feature = "onnx")]
fn load_session(path: &std::path::Path) -> Result<Arc<dyn LoadedModel>, BackendUnavailable> {
    let model = runtime::OnnxModel::load(path).map_err(|reason| BackendUnavailable::new(NAME, reason))?;
    tracing::info!(path = %path.display(), "loaded ONNX model");
    Ok(Arc::new(model))
}

#[cfg(feature = "onnx")]
mod runtime {
    use std::path::Path;
    use std::sync::Mutex;

    use ort::session::Session;
    use ort::value::Tensor;

    use super::NAME;
    use crate::backends::{LoadedModel, ScoringError};
    use crate::model::features::{FEATURE_DIM, FeatureVector};

    // Session::run takes &mut self.
    pub struct OnnxModel {
        session: Mutex<Session>,
    }

    impl OnnxModel {
        pub fn load(path: &Path) -> Result<Self, String> {
            let session = Session::builder()
                .map_err(|e| e.to_string())?
                .with_intra_threads(1)
                .map_err(|e| e.to_string())?
                .commit_from_file(path)
                .map_err(|e| e.to_string())?;
            Ok(Self {
                session: Mutex::new(session),
            })
        }

        fn score_row(&self, row: &FeatureVector) -> Result<f64, String> {
            let data: Vec<f32> = row.iter().map(|&v| v as f32).collect();
            let tensor = Tensor::from_array((vec![1i64, FEATURE_DIM as i64], data))
                .map_err(|e| format!("tensor creation error: {e}"))?;
            let mut session = self
                .session
                .lock()
                .map_err(|e| format!("session lock poisoned: {e}"))?;
            let outputs = session
                .run(ort::inputs![tensor])
                .map_err(|e| e.to_string())?;
            let (_name, output) = outputs
                .iter()
                .next()
                .ok_or_else(|| "no output tensor".to_string())?;
            let (_shape, values) = output
                .try_extract_tensor::<f32>()
                .map_err(|e| format!("tensor extraction failed: {e}"))?;
            values
                .first()
                .map(|&v| v as f64)
                .ok_or_else(|| "empty output tensor".to_string())
        }
    }

    impl LoadedModel for OnnxModel {
        fn score(&self, features: &[FeatureVector]) -> Result<Vec<f64>, ScoringError> {
            features
                .iter()
                .map(|row| {
                    self.score_row(row)
                        .map_err(|reason| ScoringError::Backend {
                            backend: NAME,
                            reason,
                        })
                })
                .collect()
        }
    }
}
