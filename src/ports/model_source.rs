//! Model source port: Where classifiers come from at startup.

use crate::domain::DiseaseCategory;

use super::{Classifier, ModelError};

/// Trait for loading one classifier per category.
///
/// Called once per category while the process starts; never afterwards.
pub trait ModelSource {
    /// Load the classifier for `category`.
    ///
    /// # Errors
    /// Returns error if the artifact is missing, corrupt or inconsistent.
    fn load(&self, category: DiseaseCategory) -> Result<Box<dyn Classifier>, ModelError>;
}
