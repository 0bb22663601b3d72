pub mod backends;
pub mod catalog;
pub mod guard;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod service;

#[cfg(test)]
#[path = "../tests/src_inline/strategies.rs"]
pub(crate) mod strategies;

pub use input::VariantRecord;
pub use model::features::FeatureVector;
pub use model::params::{ModelParameters, ModelPaths};
pub use model::scores::ScoredVariant;
pub use pipeline::Pipeline;
pub use service::{ApiResponse, Service};
