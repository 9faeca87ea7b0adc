//! Artifact adapter: Implementation of `Classifier` over exported JSON models.
//!
//! Each category has one artifact file in the model directory. An artifact
//! declares its feature names (the column order it was trained on) and an
//! estimator:
//!
//! - `linear`: optional standard scaler, coefficients and intercept.
//!   Predicts 1 when the decision value is strictly positive, which covers
//!   both logistic regression and linear SVMs.
//! - `decision_tree`: flat node array. A split goes left when
//!   `x[feature] <= threshold`. Children always sit after their parent,
//!   so traversal terminates.
//!
//! An optional `provenance` block records where the parameters came from.
//! Artifacts marked `synthetic` load normally but are flagged as demo
//! models in the log and the result panel.
//!
//! # Security
//!
//! If the directory carries a `manifest.json`, every artifact is hashed and
//! compared against it before parsing. See [`manifest`].

pub mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::DiseaseCategory;
use crate::ports::{Classifier, ModelError, ModelSource};

pub use manifest::{sha256_hex, verifying_key_from_b64, IntegrityPolicy, Manifest};

/// Artifact format understood by this loader.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// On-disk model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub category: DiseaseCategory,
    pub feature_names: Vec<String>,
    pub estimator: Estimator,
    #[serde(default)]
    pub provenance: Provenance,
}

/// Where an artifact's parameters came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Parameters were written by hand, not fitted to data.
    #[serde(default)]
    pub synthetic: bool,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    Linear(LinearEstimator),
    DecisionTree(TreeEstimator),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearEstimator {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
}

/// `z = (x - mean) / scale`, applied column-wise before the linear term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEstimator {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: i64,
    },
}

impl Estimator {
    fn validate(&self, n_features: usize) -> Result<(), ModelError> {
        match self {
            Self::Linear(linear) => linear.validate(n_features),
            Self::DecisionTree(tree) => tree.validate(n_features),
        }
    }

    fn predict_row(&self, row: &[f64]) -> i64 {
        match self {
            Self::Linear(linear) => i64::from(linear.decision(row) > 0.0),
            Self::DecisionTree(tree) => tree.classify(row),
        }
    }
}

impl LinearEstimator {
    fn validate(&self, n: usize) -> Result<(), ModelError> {
        if self.coefficients.len() != n {
            return Err(ModelError::InvalidParameters(format!(
                "{} coefficients for {n} features",
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidParameters(
                "coefficients must be finite".into(),
            ));
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(ModelError::InvalidParameters(
                    "scaler lengths do not match feature count".into(),
                ));
            }
            if scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
                return Err(ModelError::InvalidParameters(
                    "scaler scale must be finite and non-zero".into(),
                ));
            }
        }
        Ok(())
    }

    fn decision(&self, row: &[f64]) -> f64 {
        let dot: f64 = match &self.scaler {
            Some(scaler) => row
                .iter()
                .zip(&scaler.mean)
                .zip(&scaler.scale)
                .zip(&self.coefficients)
                .map(|(((x, mean), scale), w)| w * (x - mean) / scale)
                .sum(),
            None => row.iter().zip(&self.coefficients).map(|(x, w)| w * x).sum(),
        };
        dot + self.intercept
    }
}

impl TreeEstimator {
    fn validate(&self, n: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::InvalidParameters("decision tree has no nodes".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } = node
            {
                if *feature >= n {
                    return Err(ModelError::InvalidParameters(format!(
                        "node {i} splits on feature {feature}, only {n} features"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(ModelError::InvalidParameters(format!(
                        "node {i} has a non-finite threshold"
                    )));
                }
                for child in [*left, *right] {
                    if child <= i || child >= self.nodes.len() {
                        return Err(ModelError::InvalidParameters(format!(
                            "node {i} has invalid child index {child}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn classify(&self, row: &[f64]) -> i64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// A validated artifact ready for prediction.
#[derive(Debug, Clone)]
pub struct ArtifactClassifier {
    category: DiseaseCategory,
    feature_names: Vec<String>,
    estimator: Estimator,
    provenance: Provenance,
}

impl ArtifactClassifier {
    /// Validate an artifact for `expected` category.
    ///
    /// # Errors
    /// Returns error if the format version, category or parameter shapes are wrong.
    pub fn from_artifact(
        expected: DiseaseCategory,
        artifact: ModelArtifact,
    ) -> Result<Self, ModelError> {
        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ModelError::UnsupportedFormat(artifact.format_version));
        }
        if artifact.category != expected {
            return Err(ModelError::CategoryMismatch {
                expected,
                found: artifact.category,
            });
        }
        if artifact.feature_names.is_empty() {
            return Err(ModelError::InvalidParameters("no feature names declared".into()));
        }
        artifact.estimator.validate(artifact.feature_names.len())?;

        Ok(Self {
            category: artifact.category,
            feature_names: artifact.feature_names,
            estimator: artifact.estimator,
            provenance: artifact.provenance,
        })
    }

    /// Parse and validate artifact JSON.
    ///
    /// # Errors
    /// Returns `ModelError::Parse` on malformed JSON, otherwise as [`Self::from_artifact`].
    pub fn from_slice(expected: DiseaseCategory, bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: ModelArtifact =
            serde_json::from_slice(bytes).map_err(|e| ModelError::Parse(e.to_string()))?;
        Self::from_artifact(expected, artifact)
    }

    #[must_use]
    pub fn category(&self) -> DiseaseCategory {
        self.category
    }

    #[must_use]
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

impl Classifier for ArtifactClassifier {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn is_demo(&self) -> bool {
        self.provenance.synthetic
    }

    fn predict(&self, batch: &[&[f64]]) -> Result<Vec<i64>, ModelError> {
        let n = self.feature_names.len();
        batch
            .iter()
            .map(|row| {
                if row.len() != n {
                    return Err(ModelError::Arity {
                        expected: n,
                        actual: row.len(),
                    });
                }
                if let Some(index) = row.iter().position(|x| !x.is_finite()) {
                    return Err(ModelError::NonFinite { index });
                }
                Ok(self.estimator.predict_row(row))
            })
            .collect()
    }
}

/// Model directory with its (optionally verified) manifest.
pub struct ArtifactStore {
    dir: PathBuf,
    manifest: Option<Manifest>,
}

impl ArtifactStore {
    /// Open a model directory, verifying its manifest according to `policy`.
    ///
    /// # Errors
    /// Returns error if the directory is missing or the manifest fails verification.
    pub fn open(dir: impl AsRef<Path>, policy: &IntegrityPolicy) -> Result<Self, ModelError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ModelError::Io {
                path: dir.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "model directory not found",
                ),
            });
        }

        let manifest = manifest::load_manifest(dir, policy)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            manifest,
        })
    }

    /// Whether artifacts are checked against a manifest.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.manifest.is_some()
    }

    /// Load and validate the artifact for `category`.
    ///
    /// # Errors
    /// Returns error if the file is unreadable, fails the manifest check, or is invalid.
    pub fn load_artifact(&self, category: DiseaseCategory) -> Result<ArtifactClassifier, ModelError> {
        let file = category.artifact_file();
        let path = self.dir.join(file);
        let bytes = fs::read(&path).map_err(|source| ModelError::Io {
            path: path.clone(),
            source,
        })?;

        if let Some(manifest) = &self.manifest {
            manifest.verify_file(file, &bytes)?;
        }

        let classifier = ArtifactClassifier::from_slice(category, &bytes)?;
        if classifier.provenance.synthetic {
            tracing::warn!(
                category = %category,
                source = classifier.provenance.source.as_deref().unwrap_or("unknown"),
                "Model artifact has synthetic parameters; predictions are for demonstration only"
            );
        }
        tracing::info!(
            category = %category,
            features = classifier.arity(),
            verified = self.manifest.is_some(),
            "Loaded model artifact {:?}",
            path
        );
        Ok(classifier)
    }
}

impl ModelSource for ArtifactStore {
    fn load(&self, category: DiseaseCategory) -> Result<Box<dyn Classifier>, ModelError> {
        Ok(Box::new(self.load_artifact(category)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn linear_artifact() -> ModelArtifact {
        ModelArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            category: DiseaseCategory::LungCancer,
            feature_names: vec!["a".into(), "b".into()],
            estimator: Estimator::Linear(LinearEstimator {
                coefficients: vec![1.0, -2.0],
                intercept: 0.5,
                scaler: Some(StandardScaler {
                    mean: vec![1.0, 0.0],
                    scale: vec![2.0, 1.0],
                }),
            }),
            provenance: Provenance::default(),
        }
    }

    fn tree_artifact() -> ModelArtifact {
        ModelArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            category: DiseaseCategory::HypoThyroid,
            feature_names: vec!["tsh".into()],
            estimator: Estimator::DecisionTree(TreeEstimator {
                nodes: vec![
                    TreeNode::Split {
                        feature: 0,
                        threshold: 6.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { class: 0 },
                    TreeNode::Leaf { class: 1 },
                ],
            }),
            provenance: Provenance::default(),
        }
    }

    #[test]
    fn test_linear_decision() {
        let model = ArtifactClassifier::from_artifact(DiseaseCategory::LungCancer, linear_artifact())
            .expect("valid");
        // z = [(3-1)/2, 0] -> 1*1 + 0 + 0.5 > 0
        // z = [(1-1)/2, 1] -> 0 - 2 + 0.5 < 0
        let labels = model
            .predict(&[&[3.0, 0.0], &[1.0, 1.0]])
            .expect("predict");
        assert_eq!(labels, vec![1, 0]);
    }

    #[test]
    fn test_tree_split_goes_left_on_equal() {
        let model = ArtifactClassifier::from_artifact(DiseaseCategory::HypoThyroid, tree_artifact())
            .expect("valid");
        assert_eq!(model.predict(&[&[6.0]]).expect("predict"), vec![0]);
        assert_eq!(model.predict(&[&[6.1]]).expect("predict"), vec![1]);
    }

    #[test]
    fn test_predict_rejects_wrong_arity_and_nan() {
        let model = ArtifactClassifier::from_artifact(DiseaseCategory::LungCancer, linear_artifact())
            .expect("valid");
        assert!(matches!(
            model.predict(&[&[1.0]]),
            Err(ModelError::Arity {
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            model.predict(&[&[1.0, f64::NAN]]),
            Err(ModelError::NonFinite { index: 1 })
        ));
    }

    #[test]
    fn test_invalid_artifacts_rejected() {
        let mut wrong_version = linear_artifact();
        wrong_version.format_version = 2;
        assert!(matches!(
            ArtifactClassifier::from_artifact(DiseaseCategory::LungCancer, wrong_version),
            Err(ModelError::UnsupportedFormat(2))
        ));

        assert!(matches!(
            ArtifactClassifier::from_artifact(DiseaseCategory::Diabetes, linear_artifact()),
            Err(ModelError::CategoryMismatch { .. })
        ));

        let mut short = linear_artifact();
        if let Estimator::Linear(linear) = &mut short.estimator {
            linear.coefficients.pop();
        }
        assert!(matches!(
            ArtifactClassifier::from_artifact(DiseaseCategory::LungCancer, short),
            Err(ModelError::InvalidParameters(_))
        ));

        let mut cyclic = tree_artifact();
        if let Estimator::DecisionTree(tree) = &mut cyclic.estimator {
            tree.nodes[0] = TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 2,
            };
        }
        assert!(matches!(
            ArtifactClassifier::from_artifact(DiseaseCategory::HypoThyroid, cyclic),
            Err(ModelError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_provenance_defaults_to_trained() {
        let mut json = serde_json::to_value(tree_artifact()).expect("serialize");
        json.as_object_mut().expect("object").remove("provenance");
        let bytes = serde_json::to_vec(&json).expect("bytes");
        let model = ArtifactClassifier::from_slice(DiseaseCategory::HypoThyroid, &bytes)
            .expect("provenance is optional");
        assert!(!model.is_demo());

        let mut synthetic = tree_artifact();
        synthetic.provenance = Provenance {
            synthetic: true,
            source: Some("hand-written".into()),
        };
        let model = ArtifactClassifier::from_artifact(DiseaseCategory::HypoThyroid, synthetic)
            .expect("valid");
        assert!(model.is_demo());
        assert_eq!(model.provenance().source.as_deref(), Some("hand-written"));
    }

    #[test]
    fn test_tree_node_json_shape() {
        let json = r#"{"kind":"decision_tree","nodes":[
            {"feature":0,"threshold":1.5,"left":1,"right":2},
            {"class":0},
            {"class":1}
        ]}"#;
        let estimator: Estimator = serde_json::from_str(json).expect("parse");
        match estimator {
            Estimator::DecisionTree(tree) => {
                assert_eq!(tree.nodes.len(), 3);
                assert!(matches!(tree.nodes[2], TreeNode::Leaf { class: 1 }));
            }
            Estimator::Linear(_) => panic!("expected tree"),
        }
    }

    #[test]
    fn test_shipped_models_load() {
        let store = ArtifactStore::open("models", &IntegrityPolicy::permissive())
            .expect("models dir should open");
        assert!(store.is_verified(), "shipped models carry a manifest");
        for category in DiseaseCategory::ALL {
            let model = store.load_artifact(category).expect("artifact should load");
            assert_eq!(model.category(), category);
            assert!(model.is_demo(), "{category} ships as a demo artifact");
            assert_eq!(model.arity(), category.arity(), "{category}");
        }
    }

    #[test]
    fn test_store_rejects_corrupted_artifact() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        let file = DiseaseCategory::LungCancer.artifact_file();

        let bytes = serde_json::to_vec(&linear_artifact()).expect("serialize");
        std::fs::write(dir.join(file), &bytes).expect("write");
        let manifest = Manifest::for_files(dir, [file], None).expect("manifest");
        std::fs::write(
            dir.join(manifest::MANIFEST_FILE),
            manifest.to_bytes().expect("bytes"),
        )
        .expect("write manifest");

        let store = ArtifactStore::open(dir, &IntegrityPolicy::permissive()).expect("open");
        assert!(store.is_verified());
        store
            .load_artifact(DiseaseCategory::LungCancer)
            .expect("intact artifact loads");

        // Flip the intercept after the manifest was written.
        let mut tampered = linear_artifact();
        if let Estimator::Linear(linear) = &mut tampered.estimator {
            linear.intercept = 100.0;
        }
        std::fs::write(dir.join(file), serde_json::to_vec(&tampered).expect("serialize"))
            .expect("rewrite");

        let err = store
            .load_artifact(DiseaseCategory::LungCancer)
            .expect_err("must fail");
        assert!(matches!(err, ModelError::Integrity(_)));
    }

    #[test]
    fn test_store_missing_directory() {
        let err = ArtifactStore::open("does/not/exist", &IntegrityPolicy::permissive())
            .err()
            .expect("must fail");
        assert!(matches!(err, ModelError::Io { .. }));
    }
}
