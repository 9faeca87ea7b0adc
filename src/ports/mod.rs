//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the dispatcher and the model artifacts it runs.

mod classifier;
mod model_source;

pub use classifier::{Classifier, ModelError};
pub use model_source::ModelSource;
