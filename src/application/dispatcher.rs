//! Prediction dispatch: routes a feature vector to its category's model.
//!
//! Each submission is a one-row batch. The first returned label is mapped
//! to a [`RiskLabel`]; anything other than 0 or 1 is an error rather than
//! a guess.

use std::sync::Arc;

use crate::domain::{FeatureVector, Prediction, RiskLabel};
use crate::HealthScopeError;

use super::models::ModelSet;

/// Service for running one assessment per submission.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    models: Arc<ModelSet>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(models: Arc<ModelSet>) -> Self {
        Self { models }
    }

    #[must_use]
    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    /// Run the category's model on `features`.
    ///
    /// # Errors
    /// Returns error if the model rejects the row, returns nothing, or
    /// returns a label outside {0, 1}.
    pub fn dispatch(&self, features: &FeatureVector) -> Result<Prediction, HealthScopeError> {
        let category = features.category();
        let classifier = self.models.get(category);

        let labels = classifier.predict(&[features.values()])?;
        let class = *labels
            .first()
            .ok_or(HealthScopeError::EmptyPrediction(category))?;
        let label = RiskLabel::from_class(class)
            .ok_or(HealthScopeError::UnexpectedLabel { category, class })?;

        tracing::info!(category = %category, label = %label, "Assessment complete");
        Ok(Prediction::new(category, label).from_demo_model(classifier.is_demo()))
    }
}
