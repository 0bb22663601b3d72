pub mod features;
pub mod linear;
pub mod params;
pub mod scores;
pub mod thresholds;
