//! Domain layer: Core assessment types.
//!
//! Pure Rust types with no I/O. Category schemas, field bounds and the
//! label mapping live here.

mod category;
mod features;
mod field;
mod prediction;

pub use category::DiseaseCategory;
pub use features::{FeatureError, FeatureVector};
pub use field::{FieldSpec, Step};
pub use prediction::{Prediction, RiskLabel};
