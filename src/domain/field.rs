//! Numeric input field declarations.
//!
//! A field carries its label, optional bounds and step granularity. Bounds
//! are enforced by clamping, never by rejecting a value.

/// Step granularity of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Whole numbers only, stepped by 1.
    Integer,
    /// Decimal values stepped by the given increment (a power of ten).
    Fraction(f64),
}

impl Step {
    /// Amount added or removed by a single step.
    #[must_use]
    pub fn increment(&self) -> f64 {
        match self {
            Self::Integer => 1.0,
            Self::Fraction(step) => *step,
        }
    }

    /// Number of decimal places needed to display a value of this granularity.
    #[must_use]
    pub fn decimals(&self) -> usize {
        match self {
            Self::Integer => 0,
            Self::Fraction(step) => (-step.log10()).round().max(0.0) as usize,
        }
    }

    /// Whether a decimal point may be typed into the field.
    #[must_use]
    pub fn allows_fraction(&self) -> bool {
        matches!(self, Self::Fraction(_))
    }
}

/// Declaration of a single numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Stable feature name, matching the model artifact schema.
    pub key: &'static str,
    /// Label shown above the input.
    pub label: &'static str,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Step,
    /// Grouped under "Advanced Parameters" in the form.
    pub advanced: bool,
}

impl FieldSpec {
    /// Integer field bounded to `[min, max]`.
    #[must_use]
    pub const fn integer(key: &'static str, label: &'static str, min: f64, max: f64) -> Self {
        Self {
            key,
            label,
            min: Some(min),
            max: Some(max),
            step: Step::Integer,
            advanced: false,
        }
    }

    /// Fractional field bounded to `[min, max]` with the given step.
    #[must_use]
    pub const fn fraction(
        key: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        step: f64,
    ) -> Self {
        Self {
            key,
            label,
            min: Some(min),
            max: Some(max),
            step: Step::Fraction(step),
            advanced: false,
        }
    }

    /// Mark the field as an advanced parameter.
    #[must_use]
    pub const fn advanced(self) -> Self {
        Self {
            advanced: true,
            ..self
        }
    }

    /// Clamp a value into the declared bounds.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(min) = self.min {
            if v < min {
                v = min;
            }
        }
        if let Some(max) = self.max {
            if v > max {
                v = max;
            }
        }
        v
    }

    /// Whether the value already lies within the declared bounds.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// Value used when the input is left empty.
    #[must_use]
    pub fn default_value(&self) -> f64 {
        self.clamp(0.0)
    }

    /// Format a value with the precision implied by the step.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.step.decimals(), value)
    }

    /// Placeholder text describing the accepted range.
    #[must_use]
    pub fn hint(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("{} – {}", self.format(min), self.format(max)),
            (Some(min), None) => format!(">= {}", self.format(min)),
            (None, Some(max)) => format!("<= {}", self.format(max)),
            (None, None) => "any value".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_age_bounds() {
        let age = FieldSpec::integer("age", "Age (Years)", 0.0, 120.0);
        assert_eq!(age.clamp(150.0), 120.0);
        assert_eq!(age.clamp(-3.0), 0.0);
        assert_eq!(age.clamp(42.0), 42.0);
        assert!(age.contains(120.0));
        assert!(!age.contains(120.5));
    }

    #[test]
    fn test_step_decimals() {
        assert_eq!(Step::Integer.decimals(), 0);
        assert_eq!(Step::Fraction(0.1).decimals(), 1);
        assert_eq!(Step::Fraction(0.01).decimals(), 2);
        assert_eq!(Step::Fraction(0.0001).decimals(), 4);
    }

    #[test]
    fn test_format_and_hint() {
        let bmi = FieldSpec::fraction("bmi", "Body Mass Index (BMI)", 0.0, 100.0, 0.1);
        assert_eq!(bmi.format(23.456), "23.5");
        assert_eq!(bmi.hint(), "0.0 – 100.0");
        assert_eq!(bmi.default_value(), 0.0);
    }
}
