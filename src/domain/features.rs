//! Feature vectors handed from the input panel to the dispatcher.

use super::category::DiseaseCategory;

/// Error building a feature vector from panel input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    #[error("{category} expects {expected} values, got {actual}")]
    Arity {
        category: DiseaseCategory,
        expected: usize,
        actual: usize,
    },

    #[error("{field}: invalid number")]
    InvalidNumber { field: &'static str },
}

/// Ordered measurements for one category, in the model's column order.
///
/// Values are clamped into each field's declared bounds on construction.
/// The `Debug` output deliberately omits the values so vectors can be
/// passed to logging macros without leaking measurements.
#[derive(Clone, PartialEq)]
pub struct FeatureVector {
    category: DiseaseCategory,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build a vector from raw panel values.
    ///
    /// # Errors
    /// Returns [`FeatureError::Arity`] if the number of values does not match
    /// the category's field count.
    pub fn from_inputs(category: DiseaseCategory, inputs: &[f64]) -> Result<Self, FeatureError> {
        let fields = category.fields();
        if inputs.len() != fields.len() {
            return Err(FeatureError::Arity {
                category,
                expected: fields.len(),
                actual: inputs.len(),
            });
        }

        let values = fields
            .iter()
            .zip(inputs)
            .map(|(field, value)| field.clamp(*value))
            .collect();

        Ok(Self { category, values })
    }

    /// Vector with every field at its default (zero) value.
    #[must_use]
    pub fn defaults(category: DiseaseCategory) -> Self {
        Self {
            category,
            values: category.fields().iter().map(|f| f.default_value()).collect(),
        }
    }

    #[must_use]
    pub fn category(&self) -> DiseaseCategory {
        self.category
    }

    /// Values in model order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for FeatureVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureVector")
            .field("category", &self.category)
            .field("len", &self.values.len())
            .finish_non_exhaustive()
    }
}
