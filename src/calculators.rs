use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CalculatorError {
    #[error("Invalid weight: {0} kg")]
    InvalidWeight(f64),

    #[error("Invalid height: {0} m")]
    InvalidHeight(f64),
}

/// BMI rounded to one decimal, with its WHO category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiReading {
    pub bmi: String,
    pub category: String,
}

/// WHO adult categories, checked in order against the unrounded value.
const BMI_CATEGORIES: &[(f64, &str)] = &[
    (18.5, "Underweight"),
    (25.0, "Normal weight"),
    (30.0, "Overweight"),
];
const BMI_TOP_CATEGORY: &str = "Obese";

pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> Result<BmiReading, CalculatorError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(CalculatorError::InvalidWeight(weight_kg));
    }
    if !height_m.is_finite() || height_m <= 0.0 {
        return Err(CalculatorError::InvalidHeight(height_m));
    }

    let bmi = weight_kg / (height_m * height_m);
    let category = BMI_CATEGORIES
        .iter()
        .find(|(upper, _)| bmi < *upper)
        .map_or(BMI_TOP_CATEGORY, |(_, label)| *label);

    Ok(BmiReading {
        bmi: format!("{bmi:.1}"),
        category: category.to_string(),
    })
}

static PAIN_SCALE: [&str; 11] = [
    "No pain",
    "Minimal pain",
    "Mild pain",
    "Uncomfortable",
    "Moderate pain",
    "Moderately severe",
    "Severe pain",
    "Very severe",
    "Intense pain",
    "Excruciating",
    "Unbearable pain",
];

/// Label for a 0-10 pain rating. Out-of-range levels get a sentinel, not an error.
pub fn describe_pain_level(level: i32) -> &'static str {
    usize::try_from(level)
        .ok()
        .and_then(|i| PAIN_SCALE.get(i))
        .copied()
        .unwrap_or("Invalid pain level")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(weight: f64, height: f64) -> BmiReading {
        calculate_bmi(weight, height).unwrap()
    }

    #[test]
    fn bmi_normal_weight() {
        assert_eq!(
            reading(70.0, 1.75),
            BmiReading {
                bmi: "22.9".into(),
                category: "Normal weight".into()
            }
        );
        let lighter = reading(50.0, 1.60);
        assert_eq!(lighter.bmi, "19.5");
        assert_eq!(lighter.category, "Normal weight");
    }

    #[test]
    fn bmi_obese() {
        assert_eq!(reading(120.0, 1.70).category, "Obese");
    }

    #[test]
    fn bmi_category_boundaries() {
        // 18.5 exactly is no longer underweight.
        assert_eq!(reading(18.5, 1.0).category, "Normal weight");
        assert_eq!(reading(18.4, 1.0).category, "Underweight");
        assert_eq!(reading(25.0, 1.0).category, "Overweight");
        assert_eq!(reading(29.9, 1.0).category, "Overweight");
        assert_eq!(reading(30.0, 1.0).category, "Obese");
    }

    #[test]
    fn bmi_rejects_bad_measurements() {
        assert_eq!(calculate_bmi(0.0, 1.75), Err(CalculatorError::InvalidWeight(0.0)));
        assert_eq!(calculate_bmi(70.0, -1.0), Err(CalculatorError::InvalidHeight(-1.0)));
        assert!(matches!(
            calculate_bmi(f64::NAN, 1.75),
            Err(CalculatorError::InvalidWeight(_))
        ));
        assert!(matches!(
            calculate_bmi(70.0, f64::INFINITY),
            Err(CalculatorError::InvalidHeight(_))
        ));
    }

    #[test]
    fn pain_scale_labels() {
        assert_eq!(describe_pain_level(0), "No pain");
        assert_eq!(describe_pain_level(3), "Uncomfortable");
        assert_eq!(describe_pain_level(10), "Unbearable pain");
    }

    #[test]
    fn pain_scale_out_of_range() {
        assert_eq!(describe_pain_level(15), "Invalid pain level");
        assert_eq!(describe_pain_level(11), "Invalid pain level");
        assert_eq!(describe_pain_level(-1), "Invalid pain level");
    }
}
