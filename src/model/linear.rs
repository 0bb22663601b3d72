use rand::Rng;

use crate::model::features::{FEATURE_DIM, FeatureVector, clip01};
use crate::model::params::{ModelError, ModelParameters};

const LOG_EPS: f64 = 1e-9;
const LOSS_LOG_EVERY: usize = 500;
const INIT_WEIGHT_SCALE: f64 = 0.01;

#[derive(Debug, Clone, Copy)]
pub struct TrainOptions {
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 2000,
            learning_rate: 0.1,
        }
    }
}

pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

pub fn predict(params: &ModelParameters, x: &FeatureVector) -> f64 {
    let mut z = params.bias;
    for (w, v) in params.weights.iter().zip(x.iter()) {
        z += w * v;
    }
    clip01(sigmoid(z))
}

pub fn train<R: Rng>(
    x: &[FeatureVector],
    y: &[f64],
    opts: TrainOptions,
    rng: &mut R,
) -> Result<ModelParameters, ModelError> {
    if x.is_empty() {
        return Err(ModelError::InvalidInput(
            "training set is empty".to_string(),
        ));
    }
    if x.len() != y.len() {
        return Err(ModelError::InvalidInput(format!(
            "{} feature rows but {} labels",
            x.len(),
            y.len()
        )));
    }
    if let Some(idx) = y.iter().position(|&label| label != 0.0 && label != 1.0) {
        return Err(ModelError::InvalidInput(format!(
            "label at row {idx} is {}, expected 0 or 1",
            y[idx]
        )));
    }
    if !opts.learning_rate.is_finite() || opts.learning_rate <= 0.0 {
        return Err(ModelError::InvalidInput(format!(
            "learning rate must be positive, got {}",
            opts.learning_rate
        )));
    }
    if x.iter().flatten().any(|v| !v.is_finite()) {
        return Err(ModelError::InvalidInput(
            "feature matrix contains non-finite values".to_string(),
        ));
    }

    let mut weights = [0.0f64; FEATURE_DIM];
    for w in &mut weights {
        *w = rng.r#gen::<f64>() * INIT_WEIGHT_SCALE;
    }
    let mut bias = 0.0f64;
    let lr = opts.learning_rate;

    for epoch in 0..opts.epochs {
        let mut loss = 0.0f64;
        for (xi, &target) in x.iter().zip(y.iter()) {
            let mut z = bias;
            for j in 0..FEATURE_DIM {
                z += weights[j] * xi[j];
            }
            let p = sigmoid(z);
            let err = p - target;
            loss -= target * (p + LOG_EPS).ln() + (1.0 - target) * (1.0 - p + LOG_EPS).ln();
            for j in 0..FEATURE_DIM {
                weights[j] -= lr * err * xi[j];
            }
            bias -= lr * err;
        }
        if epoch % LOSS_LOG_EVERY == 0 {
            tracing::debug!(epoch, loss = loss / x.len() as f64, "training epoch");
        }
    }

    Ok(ModelParameters { weights, bias })
}

pub fn synthetic_dataset<R: Rng>(n: usize, rng: &mut R) -> (Vec<FeatureVector>, Vec<f64>) {
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for _ in 0..n {
        let impact = if rng.gen_bool(0.3) {
            1.0
        } else {
            rng.gen_range(0.0..0.8)
        };
        let af = if rng.gen_bool(0.6) {
            rng.gen_range(0.0..0.05)
        } else {
            rng.gen_range(0.0..0.5)
        };
        let cs = if rng.gen_bool(0.4) { 1.0 } else { 0.0 };
        let conservation = rng.r#gen::<f64>();
        let score = 0.4 * impact + 0.4 * cs + 0.1 * conservation + 0.1 * (1.0 - af);
        x.push([impact, af, cs, conservation]);
        y.push(if score > 0.6 { 1.0 } else { 0.0 });
    }
    (x, y)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/linear.rs"]
mod tests;
