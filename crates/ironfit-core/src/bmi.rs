//! Body Mass Index: `weight(kg) / height(m)^2`, rounded to two decimals.

use serde::{Deserialize, Serialize};

/// Compute BMI. Returns `None` when either input is missing or zero.
pub fn compute_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg.filter(|w| *w != 0.0 && w.is_finite())?;
    let height = height_cm.filter(|h| *h != 0.0 && h.is_finite())?;
    let height_m = height / 100.0;
    Some((weight / (height_m * height_m) * 100.0).round() / 100.0)
}

/// Thresholds are exclusive upper bounds: 18.5 is Normal, 25 Overweight,
/// 30 Obese.
pub fn categorize_bmi(bmi: Option<f64>) -> BmiCategory {
    match bmi {
        None => BmiCategory::Unknown,
        Some(b) if b.is_nan() => BmiCategory::Unknown,
        Some(b) if b < 18.5 => BmiCategory::Underweight,
        Some(b) if b < 25.0 => BmiCategory::Normal,
        Some(b) if b < 30.0 => BmiCategory::Overweight,
        Some(_) => BmiCategory::Obese,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
    Unknown,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_bmi_rounds_to_two_decimals() {
        assert_eq!(compute_bmi(Some(80.0), Some(175.0)), Some(26.12));
        assert_eq!(compute_bmi(Some(79.5), Some(175.0)), Some(25.96));
    }

    #[test]
    fn test_compute_bmi_missing_inputs() {
        assert_eq!(compute_bmi(None, Some(175.0)), None);
        assert_eq!(compute_bmi(Some(80.0), None), None);
        assert_eq!(compute_bmi(Some(0.0), Some(175.0)), None);
        assert_eq!(compute_bmi(Some(80.0), Some(0.0)), None);
    }

    #[test]
    fn test_category_boundaries_are_exclusive() {
        assert_eq!(categorize_bmi(Some(18.49)), BmiCategory::Underweight);
        assert_eq!(categorize_bmi(Some(18.5)), BmiCategory::Normal);
        assert_eq!(categorize_bmi(Some(24.99)), BmiCategory::Normal);
        assert_eq!(categorize_bmi(Some(25.0)), BmiCategory::Overweight);
        assert_eq!(categorize_bmi(Some(29.99)), BmiCategory::Overweight);
        assert_eq!(categorize_bmi(Some(30.0)), BmiCategory::Obese);
        assert_eq!(categorize_bmi(Some(45.0)), BmiCategory::Obese);
    }

    #[test]
    fn test_null_bmi_is_unknown() {
        assert_eq!(categorize_bmi(None), BmiCategory::Unknown);
        assert_eq!(categorize_bmi(compute_bmi(None, Some(175.0))), BmiCategory::Unknown);
    }

    #[test]
    fn test_labels() {
        assert_eq!(BmiCategory::Normal.to_string(), "Normal weight");
        assert_eq!(BmiCategory::Unknown.label(), "Unknown");
    }
}
