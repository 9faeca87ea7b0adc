//! Model registry: one loaded classifier per disease category.
//!
//! Every category is loaded before the UI starts. A missing or inconsistent
//! artifact is fatal; there is no lazy loading and no fallback model.

use std::sync::Arc;

use crate::domain::DiseaseCategory;
use crate::ports::{Classifier, ModelSource};
use crate::HealthScopeError;

/// The five loaded classifiers, read-only for the process lifetime.
#[derive(Clone)]
pub struct ModelSet {
    diabetes: Arc<dyn Classifier>,
    heart_disease: Arc<dyn Classifier>,
    parkinsons: Arc<dyn Classifier>,
    lung_cancer: Arc<dyn Classifier>,
    hypo_thyroid: Arc<dyn Classifier>,
}

impl std::fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("ModelSet");
        for category in DiseaseCategory::ALL {
            s.field(category.name(), &self.get(category).arity());
        }
        s.finish()
    }
}

impl ModelSet {
    /// Assemble a set from already-loaded classifiers.
    ///
    /// # Errors
    /// Returns `HealthScopeError::SchemaMismatch` if any classifier's
    /// feature names differ from its category's field keys.
    pub fn new(
        diabetes: Arc<dyn Classifier>,
        heart_disease: Arc<dyn Classifier>,
        parkinsons: Arc<dyn Classifier>,
        lung_cancer: Arc<dyn Classifier>,
        hypo_thyroid: Arc<dyn Classifier>,
    ) -> Result<Self, HealthScopeError> {
        let set = Self {
            diabetes,
            heart_disease,
            parkinsons,
            lung_cancer,
            hypo_thyroid,
        };
        for category in DiseaseCategory::ALL {
            check_schema(category, set.get(category).as_ref())?;
        }
        Ok(set)
    }

    /// Load all five classifiers from `source`.
    ///
    /// # Errors
    /// Returns `HealthScopeError::ModelLoad` for the first category that
    /// fails to load, or `SchemaMismatch` as in [`Self::new`].
    pub fn load<S: ModelSource + ?Sized>(source: &S) -> Result<Self, HealthScopeError> {
        let load = |category: DiseaseCategory| -> Result<Arc<dyn Classifier>, HealthScopeError> {
            source
                .load(category)
                .map(Arc::from)
                .map_err(|source| HealthScopeError::ModelLoad { category, source })
        };

        let set = Self::new(
            load(DiseaseCategory::Diabetes)?,
            load(DiseaseCategory::HeartDisease)?,
            load(DiseaseCategory::Parkinsons)?,
            load(DiseaseCategory::LungCancer)?,
            load(DiseaseCategory::HypoThyroid)?,
        )?;
        tracing::info!("All {} models loaded", DiseaseCategory::ALL.len());
        Ok(set)
    }

    /// The classifier bound to `category`.
    #[must_use]
    pub fn get(&self, category: DiseaseCategory) -> &Arc<dyn Classifier> {
        match category {
            DiseaseCategory::Diabetes => &self.diabetes,
            DiseaseCategory::HeartDisease => &self.heart_disease,
            DiseaseCategory::Parkinsons => &self.parkinsons,
            DiseaseCategory::LungCancer => &self.lung_cancer,
            DiseaseCategory::HypoThyroid => &self.hypo_thyroid,
        }
    }
}

fn check_schema(category: DiseaseCategory, classifier: &dyn Classifier) -> Result<(), HealthScopeError> {
    let declared = classifier.feature_names();
    if declared.len() != category.arity() {
        return Err(HealthScopeError::SchemaMismatch {
            category,
            detail: format!(
                "model declares {} features, form has {}",
                declared.len(),
                category.arity()
            ),
        });
    }

    for (position, (name, key)) in declared.iter().zip(category.feature_keys()).enumerate() {
        if name != key {
            return Err(HealthScopeError::SchemaMismatch {
                category,
                detail: format!("feature {position} is {name:?}, expected {key:?}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory classifiers for application and TUI tests.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::ModelSet;
    use crate::domain::DiseaseCategory;
    use crate::ports::{Classifier, ModelError};

    /// Returns a fixed label for every row and counts calls.
    pub struct FixedClassifier {
        names: Vec<String>,
        labels: Vec<i64>,
        pub calls: AtomicUsize,
    }

    impl FixedClassifier {
        pub fn for_category(category: DiseaseCategory, label: i64) -> Self {
            Self::with_output(category, vec![label])
        }

        /// `labels` is returned verbatim regardless of batch size.
        pub fn with_output(category: DiseaseCategory, labels: Vec<i64>) -> Self {
            Self {
                names: category.feature_keys().map(String::from).collect(),
                labels,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_names(names: &[&str], label: i64) -> Self {
            Self {
                names: names.iter().map(|n| n.to_string()).collect(),
                labels: vec![label],
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Classifier for FixedClassifier {
        fn feature_names(&self) -> &[String] {
            &self.names
        }

        fn predict(&self, batch: &[&[f64]]) -> Result<Vec<i64>, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            for row in batch {
                if row.len() != self.names.len() {
                    return Err(ModelError::Arity {
                        expected: self.names.len(),
                        actual: row.len(),
                    });
                }
            }
            Ok(self.labels.clone())
        }
    }

    /// Classifiers for all five categories, in `DiseaseCategory::ALL` order.
    pub fn fixed_classifiers(labels: [i64; 5]) -> Vec<Arc<FixedClassifier>> {
        DiseaseCategory::ALL
            .iter()
            .zip(labels)
            .map(|(category, label)| Arc::new(FixedClassifier::for_category(*category, label)))
            .collect()
    }

    pub fn model_set(classifiers: &[Arc<FixedClassifier>]) -> ModelSet {
        let c = |i: usize| -> Arc<dyn Classifier> { classifiers[i].clone() };
        ModelSet::new(c(0), c(1), c(2), c(3), c(4)).expect("schemas match")
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::adapters::artifact::{ArtifactStore, IntegrityPolicy};
    use crate::ports::ModelError;

    struct FailingSource(DiseaseCategory);

    impl ModelSource for FailingSource {
        fn load(&self, category: DiseaseCategory) -> Result<Box<dyn Classifier>, ModelError> {
            if category == self.0 {
                return Err(ModelError::Parse("truncated".into()));
            }
            Ok(Box::new(FixedClassifier::for_category(category, 0)))
        }
    }

    #[test]
    fn test_get_returns_bound_classifier() {
        let classifiers = fixed_classifiers([0, 1, 0, 1, 0]);
        let set = model_set(&classifiers);
        for category in DiseaseCategory::ALL {
            assert_eq!(set.get(category).arity(), category.arity());
        }
    }

    #[test]
    fn test_load_failure_names_category() {
        let err = ModelSet::load(&FailingSource(DiseaseCategory::Parkinsons)).expect_err("fatal");
        match err {
            HealthScopeError::ModelLoad { category, .. } => {
                assert_eq!(category, DiseaseCategory::Parkinsons);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_schema_mismatch_is_rejected() {
        let classifiers = fixed_classifiers([0; 5]);
        let c = |i: usize| -> Arc<dyn Classifier> { classifiers[i].clone() };

        let wrong_order: Arc<dyn Classifier> = Arc::new(FixedClassifier::with_names(
            &["sex", "age", "on_thyroxine", "tsh", "t3", "tt4"],
            0,
        ));
        let err = ModelSet::new(c(0), c(1), c(2), c(3), wrong_order).expect_err("mismatch");
        assert!(matches!(
            err,
            HealthScopeError::SchemaMismatch {
                category: DiseaseCategory::HypoThyroid,
                ..
            }
        ));

        let short: Arc<dyn Classifier> = Arc::new(FixedClassifier::with_names(&["glucose"], 0));
        let err = ModelSet::new(short, c(1), c(2), c(3), c(4)).expect_err("arity");
        assert!(err.to_string().contains("Diabetes"));
    }

    #[test]
    fn test_shipped_models_form_a_set() {
        let store = ArtifactStore::open(
            concat!(env!("CARGO_MANIFEST_DIR"), "/models"),
            &IntegrityPolicy::permissive(),
        )
        .expect("open models");
        let set = ModelSet::load(&store).expect("load all");
        assert_eq!(set.get(DiseaseCategory::Diabetes).arity(), 8);
        assert_eq!(set.get(DiseaseCategory::HeartDisease).arity(), 13);
        assert_eq!(set.get(DiseaseCategory::Parkinsons).arity(), 8);
        assert_eq!(set.get(DiseaseCategory::LungCancer).arity(), 6);
        assert_eq!(set.get(DiseaseCategory::HypoThyroid).arity(), 6);
    }
}
