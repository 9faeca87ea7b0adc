//! Disease categories and their fixed input schemas.
//!
//! Every category owns an ordered field list. The order is the column order
//! the corresponding model was trained on and must never be rearranged
//! without re-exporting the artifact.

use serde::{Deserialize, Serialize};

use super::field::FieldSpec;

/// The five supported assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseCategory {
    Diabetes,
    HeartDisease,
    Parkinsons,
    LungCancer,
    HypoThyroid,
}

const DIABETES_FIELDS: [FieldSpec; 8] = [
    FieldSpec::integer("pregnancies", "Pregnancies", 0.0, 20.0),
    FieldSpec::integer("glucose", "Glucose (mg/dL)", 0.0, 300.0),
    FieldSpec::integer("blood_pressure", "Blood Pressure (mmHg)", 0.0, 200.0),
    FieldSpec::integer("skin_thickness", "Skin Thickness (mm)", 0.0, 100.0),
    FieldSpec::integer("insulin", "Insulin Level (μU/ml)", 0.0, 1000.0),
    FieldSpec::fraction("bmi", "Body Mass Index (BMI)", 0.0, 100.0, 0.1),
    FieldSpec::fraction("pedigree_function", "Diabetes Pedigree Function", 0.0, 3.0, 0.01)
        .advanced(),
    FieldSpec::integer("age", "Age (Years)", 0.0, 120.0).advanced(),
];

const HEART_DISEASE_FIELDS: [FieldSpec; 13] = [
    FieldSpec::integer("age", "Age (Years)", 0.0, 120.0),
    FieldSpec::integer("sex", "Sex (1=M, 0=F)", 0.0, 1.0),
    FieldSpec::integer("cp", "Chest Pain Type", 0.0, 3.0),
    FieldSpec::integer("trestbps", "Resting BP (mmHg)", 0.0, 300.0),
    FieldSpec::integer("chol", "Cholesterol (mg/dl)", 0.0, 600.0),
    FieldSpec::integer("fbs", "Fasting Sugar >120", 0.0, 1.0),
    FieldSpec::integer("restecg", "Resting ECG", 0.0, 2.0),
    FieldSpec::integer("thalach", "Max Heart Rate", 0.0, 250.0),
    FieldSpec::integer("exang", "Exercise Angina", 0.0, 1.0),
    FieldSpec::fraction("oldpeak", "ST Depression", 0.0, 10.0, 0.1),
    FieldSpec::integer("slope", "Slope", 0.0, 2.0),
    FieldSpec::integer("ca", "Fluoroscopy Vessels", 0.0, 3.0),
    FieldSpec::integer("thal", "Thalassemia", 0.0, 3.0),
];

const PARKINSONS_FIELDS: [FieldSpec; 8] = [
    FieldSpec::fraction("mdvp_fo", "MDVP:Fo(Hz)", 0.0, 3000.0, 0.1),
    FieldSpec::fraction("mdvp_fhi", "MDVP:Fhi(Hz)", 0.0, 3000.0, 0.1),
    FieldSpec::fraction("mdvp_flo", "MDVP:Flo(Hz)", 0.0, 3000.0, 0.1),
    FieldSpec::fraction("jitter_percent", "MDVP:Jitter(%)", 0.0, 1.0, 0.001),
    FieldSpec::fraction("jitter_abs", "MDVP:Jitter(Abs)", 0.0, 0.1, 0.0001),
    FieldSpec::fraction("rap", "MDVP:RAP", 0.0, 0.2, 0.001),
    FieldSpec::fraction("ppq", "MDVP:PPQ", 0.0, 0.2, 0.001),
    FieldSpec::fraction("ddp", "Jitter:DDP", 0.0, 0.5, 0.001),
];

const LUNG_CANCER_FIELDS: [FieldSpec; 6] = [
    FieldSpec::integer("gender", "Gender (1=M, 0=F)", 0.0, 1.0),
    FieldSpec::integer("age", "Age (Years)", 0.0, 120.0),
    FieldSpec::integer("smoking", "Smoking (1=Yes)", 0.0, 1.0),
    FieldSpec::integer("yellow_fingers", "Yellow Fingers", 0.0, 1.0),
    FieldSpec::integer("anxiety", "Anxiety (1=Yes)", 0.0, 1.0),
    FieldSpec::integer("peer_pressure", "Peer Pressure", 0.0, 1.0),
];

const HYPO_THYROID_FIELDS: [FieldSpec; 6] = [
    FieldSpec::integer("age", "Age (Years)", 0.0, 120.0),
    FieldSpec::integer("sex", "Sex (1=M, 0=F)", 0.0, 1.0),
    FieldSpec::integer("on_thyroxine", "On Thyroxine", 0.0, 1.0),
    FieldSpec::fraction("tsh", "TSH Level", 0.0, 100.0, 0.1),
    FieldSpec::fraction("t3", "T3 Level", 0.0, 10.0, 0.01),
    FieldSpec::fraction("tt4", "TT4 Level", 0.0, 500.0, 0.1),
];

impl DiseaseCategory {
    /// All categories in sidebar order.
    pub const ALL: [Self; 5] = [
        Self::Diabetes,
        Self::HeartDisease,
        Self::Parkinsons,
        Self::LungCancer,
        Self::HypoThyroid,
    ];

    /// Sidebar label.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::HeartDisease => "Heart Disease",
            Self::Parkinsons => "Parkinsons",
            Self::LungCancer => "Lung Cancer",
            Self::HypoThyroid => "Hypo-Thyroid",
        }
    }

    /// Heading shown above the form.
    #[must_use]
    pub fn section_header(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes Risk Assessment",
            Self::HeartDisease => "Heart Disease Risk Assessment",
            Self::Parkinsons => "Parkinson's Disease Assessment",
            Self::LungCancer => "Lung Cancer Risk Assessment",
            Self::HypoThyroid => "Thyroid Function Assessment",
        }
    }

    /// File name of the model artifact inside the model directory.
    #[must_use]
    pub fn artifact_file(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes_model.json",
            Self::HeartDisease => "heart_disease_model.json",
            Self::Parkinsons => "parkinsons_model.json",
            Self::LungCancer => "lungs_disease_model.json",
            Self::HypoThyroid => "thyroid_model.json",
        }
    }

    /// Ordered input fields. The order is the model's feature order.
    #[must_use]
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::Diabetes => &DIABETES_FIELDS,
            Self::HeartDisease => &HEART_DISEASE_FIELDS,
            Self::Parkinsons => &PARKINSONS_FIELDS,
            Self::LungCancer => &LUNG_CANCER_FIELDS,
            Self::HypoThyroid => &HYPO_THYROID_FIELDS,
        }
    }

    /// Number of features the category's model expects.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.fields().len()
    }

    /// Feature names in model order.
    pub fn feature_keys(&self) -> impl Iterator<Item = &'static str> {
        self.fields().iter().map(|f| f.key)
    }

    /// Label of the submit action.
    #[must_use]
    pub fn action_label(&self) -> &'static str {
        match self {
            Self::Diabetes => "Analyze Diabetes Risk",
            Self::HeartDisease => "Analyze Heart Disease Risk",
            Self::Parkinsons => "Analyze Parkinson's Risk",
            Self::LungCancer => "Analyze Lung Cancer Risk",
            Self::HypoThyroid => "Analyze Thyroid Function",
        }
    }

    /// Status line shown while the model runs.
    #[must_use]
    pub fn progress_message(&self) -> &'static str {
        match self {
            Self::Diabetes => "Analyzing health parameters...",
            Self::HeartDisease => "Evaluating cardiovascular health...",
            Self::Parkinsons => "Analyzing voice parameters...",
            Self::LungCancer => "Evaluating respiratory health markers...",
            Self::HypoThyroid => "Evaluating thyroid parameters...",
        }
    }

    /// Headline for a positive (class 1) prediction.
    #[must_use]
    pub fn high_risk_message(&self) -> &'static str {
        match self {
            Self::Diabetes => "High Diabetes Risk Detected",
            Self::HeartDisease => "High Heart Disease Risk Detected",
            Self::Parkinsons => "Parkinson's Disease Likely",
            Self::LungCancer => "High Lung Cancer Risk Detected",
            Self::HypoThyroid => "Hypo-Thyroid Condition Detected",
        }
    }

    /// Headline for a negative (class 0) prediction.
    #[must_use]
    pub fn low_risk_message(&self) -> &'static str {
        match self {
            Self::Diabetes => "Low Diabetes Risk",
            Self::HeartDisease => "Low Heart Disease Risk",
            Self::Parkinsons => "Low Parkinson's Risk",
            Self::LungCancer => "Low Lung Cancer Risk",
            Self::HypoThyroid => "Normal Thyroid Function",
        }
    }

    /// Static advice shown under every result of this category.
    #[must_use]
    pub fn disclaimer(&self) -> &'static str {
        match self {
            Self::Diabetes => "Always consult with a healthcare professional for detailed analysis.",
            Self::HeartDisease => {
                "Regular cardiac checkups are recommended for maintaining heart health."
            }
            Self::Parkinsons => {
                "Neurological consultations recommended for comprehensive assessment."
            }
            Self::LungCancer => "Recommended to consult a pulmonologist for detailed screening.",
            Self::HypoThyroid => {
                "Endocrine system evaluation recommended for comprehensive analysis."
            }
        }
    }

    /// Representative values for manual testing of the form.
    #[must_use]
    pub fn sample_values(&self) -> &'static [f64] {
        match self {
            Self::Diabetes => &[6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.63, 50.0],
            Self::HeartDisease => &[
                55.0, 1.0, 2.0, 140.0, 250.0, 0.0, 1.0, 150.0, 0.0, 1.5, 1.0, 0.0, 2.0,
            ],
            Self::Parkinsons => &[119.9, 157.3, 75.0, 0.008, 0.0001, 0.004, 0.006, 0.011],
            Self::LungCancer => &[1.0, 69.0, 1.0, 1.0, 1.0, 0.0],
            Self::HypoThyroid => &[41.0, 0.0, 0.0, 1.3, 2.5, 125.0],
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Diabetes => 0,
            Self::HeartDisease => 1,
            Self::Parkinsons => 2,
            Self::LungCancer => 3,
            Self::HypoThyroid => 4,
        }
    }

    /// Next category in sidebar order, wrapping around.
    #[must_use]
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous category in sidebar order, wrapping around.
    #[must_use]
    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for DiseaseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
