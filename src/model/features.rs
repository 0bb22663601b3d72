pub const FEATURE_DIM: usize = 4;

pub const IDX_IMPACT: usize = 0;
pub const IDX_AF: usize = 1;
pub const IDX_CLINICAL_SIGNIFICANCE: usize = 2;
pub const IDX_CONSERVATION: usize = 3;

// [impact, af, clinical significance, conservation], each in [0, 1].
pub type FeatureVector = [f64; FEATURE_DIM];

pub fn clip01(x: f64) -> f64 {
    clamp_to(x, 0.0, 1.0)
}

pub fn clamp_to(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() || x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}
