//! Classifier port: Trait for pre-trained binary models.
//!
//! This trait abstracts the model artifact format from the dispatcher.
//! The only capability the application relies on is `predict`.

use std::path::PathBuf;

use crate::domain::DiseaseCategory;

/// Error type for model loading and prediction.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed model artifact: {0}")]
    Parse(String),

    #[error("Unsupported artifact format version {0}")]
    UnsupportedFormat(u32),

    #[error("Artifact is for {found}, expected {expected}")]
    CategoryMismatch {
        expected: DiseaseCategory,
        found: DiseaseCategory,
    },

    #[error("Invalid model parameters: {0}")]
    InvalidParameters(String),

    #[error("Integrity check failed: {0}")]
    Integrity(String),

    #[error("Feature count mismatch: got {actual}, expected {expected}")]
    Arity { expected: usize, actual: usize },

    #[error("Feature {index} is not a finite number")]
    NonFinite { index: usize },
}

/// A loaded, immutable binary classifier.
///
/// Implementations must be safe to share read-only across the process
/// lifetime.
pub trait Classifier: Send + Sync {
    /// Feature names the model was trained on, in column order.
    fn feature_names(&self) -> &[String];

    /// Number of input columns.
    fn arity(&self) -> usize {
        self.feature_names().len()
    }

    /// Whether the model is a demo stand-in rather than a trained one.
    fn is_demo(&self) -> bool {
        false
    }

    /// Predict a class label for each row of the batch.
    ///
    /// # Errors
    /// Returns `ModelError::Arity` if a row has the wrong length and
    /// `ModelError::NonFinite` if a row contains NaN or infinity.
    fn predict(&self, batch: &[&[f64]]) -> Result<Vec<i64>, ModelError>;
}
