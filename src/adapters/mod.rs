//! Adapters layer: Concrete implementations of ports.
//!
//! - `artifact`: JSON model artifacts with manifest/signature checks
//! - `sanitize`: measurement filtering for logs

pub mod artifact;
pub mod sanitize;

pub use artifact::{ArtifactClassifier, ArtifactStore};
