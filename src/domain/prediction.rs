//! Prediction result types.
//!
//! Represents the mapped output of a binary classifier for one submission.

use super::category::DiseaseCategory;

/// Binary risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLabel {
    /// Model output 0
    Low,
    /// Model output 1
    High,
}

impl RiskLabel {
    /// Map a raw class label. Only 0 and 1 are meaningful.
    #[must_use]
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Self::Low),
            1 => Some(Self::High),
            _ => None,
        }
    }

    /// Whether the result should be rendered with the warning style.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::High)
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (76, 175, 80),  // #4CAF50
            Self::High => (255, 75, 75), // #FF4B4B
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Outcome of one assessment. Lives only as long as the result panel shows it.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub category: DiseaseCategory,
    pub label: RiskLabel,
    pub assessed_at: chrono::DateTime<chrono::Utc>,
    /// The model that produced this label is a demo artifact, not a
    /// clinically trained one.
    pub demo_model: bool,
}

impl Prediction {
    #[must_use]
    pub fn new(category: DiseaseCategory, label: RiskLabel) -> Self {
        Self {
            category,
            label,
            assessed_at: chrono::Utc::now(),
            demo_model: false,
        }
    }

    /// Mark the prediction as coming from a demo model.
    #[must_use]
    pub fn from_demo_model(mut self, demo: bool) -> Self {
        self.demo_model = demo;
        self
    }

    /// Assessment time as shown in the result panel.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.assessed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }

    /// Category-specific headline for the label.
    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self.label {
            RiskLabel::High => self.category.high_risk_message(),
            RiskLabel::Low => self.category.low_risk_message(),
        }
    }

    /// Static advice shown below the headline.
    #[must_use]
    pub fn disclaimer(&self) -> &'static str {
        self.category.disclaimer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_class() {
        assert_eq!(RiskLabel::from_class(0), Some(RiskLabel::Low));
        assert_eq!(RiskLabel::from_class(1), Some(RiskLabel::High));
        assert_eq!(RiskLabel::from_class(2), None);
        assert_eq!(RiskLabel::from_class(-1), None);
    }

    #[test]
    fn test_headline_per_label() {
        let high = Prediction::new(DiseaseCategory::HypoThyroid, RiskLabel::High);
        assert_eq!(high.headline(), "Hypo-Thyroid Condition Detected");
        assert!(high.label.is_warning());

        let low = Prediction::new(DiseaseCategory::HypoThyroid, RiskLabel::Low);
        assert_eq!(low.headline(), "Normal Thyroid Function");
        assert!(!low.label.is_warning());
        assert_eq!(
            low.disclaimer(),
            "Endocrine system evaluation recommended for comprehensive analysis."
        );
        assert!(!low.demo_model);
        assert!(low.from_demo_model(true).demo_model);
    }

    #[test]
    fn test_timestamp_format() {
        let mut prediction = Prediction::new(DiseaseCategory::Diabetes, RiskLabel::Low);
        prediction.assessed_at = chrono::DateTime::from_timestamp(1_791_331_200, 0).expect("valid");
        assert_eq!(prediction.timestamp(), "2026-10-07 00:00:00 UTC");
    }
}
