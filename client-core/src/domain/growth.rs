//! Growth-log computation: input validation, BMI, status band, and the
//! signed delta strings shown on the child card.

use chrono::NaiveDate;
use shared::{BmiStatus, Child, GrowthSnapshot};
use thiserror::Error;

/// Raw text from the growth form, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthInput {
    pub height: String,
    pub weight: String,
}

impl GrowthInput {
    pub fn new(height: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            height: height.into(),
            weight: weight.into(),
        }
    }

    /// Validate both fields. Nothing downstream runs unless both parse
    /// to positive numbers.
    pub fn parse(&self) -> Result<Measurement, GrowthInputError> {
        let height_cm = self
            .height
            .trim()
            .parse::<f64>()
            .map_err(|_| GrowthInputError::InvalidHeight(self.height.clone()))?;
        let weight_kg = self
            .weight
            .trim()
            .parse::<f64>()
            .map_err(|_| GrowthInputError::InvalidWeight(self.weight.clone()))?;
        if !height_cm.is_finite() || height_cm <= 0.0 {
            return Err(GrowthInputError::NonPositiveHeight);
        }
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(GrowthInputError::NonPositiveWeight);
        }
        Ok(Measurement {
            height_cm,
            weight_kg,
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GrowthInputError {
    #[error("height is not a number: {0:?}")]
    InvalidHeight(String),
    #[error("weight is not a number: {0:?}")]
    InvalidWeight(String),
    #[error("height must be greater than zero")]
    NonPositiveHeight,
    #[error("weight must be greater than zero")]
    NonPositiveWeight,
}

/// A validated height/weight pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub height_cm: f64,
    pub weight_kg: f64,
}

impl Measurement {
    /// BMI = kg / m², rounded half-up to one decimal.
    pub fn bmi(&self) -> f64 {
        let meters = self.height_cm / 100.0;
        round_one_decimal(self.weight_kg / (meters * meters))
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Delta against the previous value. When no usable previous value
/// exists (absent or zero), the full new value is reported instead.
fn delta_against(new: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(prev) if prev > 0.0 => new - prev,
        _ => new,
    }
}

/// One decimal, leading `+` for positive values, unit suffix.
fn format_delta(value: f64, unit: &str) -> String {
    if value > 0.0 {
        format!("+{:.1} {}", value, unit)
    } else {
        format!("{:.1} {}", value, unit)
    }
}

/// Checkup date in the display format the child card uses.
pub fn format_checkup_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Compute the full derived snapshot for a growth log, diffed against
/// the child's prior measurements. Pure: the caller decides when (and
/// whether) to apply it.
pub fn compute_snapshot(child: &Child, measurement: Measurement, today: NaiveDate) -> GrowthSnapshot {
    let bmi = measurement.bmi();
    GrowthSnapshot {
        height: measurement.height_cm,
        weight: measurement.weight_kg,
        bmi,
        bmi_status: BmiStatus::from_bmi(bmi),
        height_change: format_delta(delta_against(measurement.height_cm, child.height), "cm"),
        weight_change: format_delta(delta_against(measurement.weight_kg, child.weight), "kg"),
        last_checkup: format_checkup_date(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_without_history() -> Child {
        Child {
            id: 1,
            name: "Amaya".to_string(),
            age: "6m".to_string(),
            gender: "Female".to_string(),
            avatar: "A".to_string(),
            color: "#E94B7D".to_string(),
            height: None,
            weight: None,
            bmi: None,
            bmi_status: None,
            development_score: None,
            last_checkup: None,
            height_change: None,
            weight_change: None,
        }
    }

    fn child_with_history(height: f64, weight: f64) -> Child {
        let mut child = child_without_history();
        child.height = Some(height);
        child.weight = Some(weight);
        child
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 25).unwrap()
    }

    #[test]
    fn test_input_validation_rejects_non_numbers() {
        assert!(matches!(
            GrowthInput::new("tall", "12.5").parse(),
            Err(GrowthInputError::InvalidHeight(_))
        ));
        assert!(matches!(
            GrowthInput::new("89", "").parse(),
            Err(GrowthInputError::InvalidWeight(_))
        ));
    }

    #[test]
    fn test_input_validation_rejects_non_positive_values() {
        assert_eq!(
            GrowthInput::new("0", "12.5").parse(),
            Err(GrowthInputError::NonPositiveHeight)
        );
        assert_eq!(
            GrowthInput::new("89", "-1").parse(),
            Err(GrowthInputError::NonPositiveWeight)
        );
        assert_eq!(
            GrowthInput::new("inf", "12.5").parse(),
            Err(GrowthInputError::NonPositiveHeight)
        );
    }

    #[test]
    fn test_bmi_formula_and_rounding() {
        // 12.5 / 0.89^2 = 15.7808... -> 15.8
        let m = GrowthInput::new("89", "12.5").parse().unwrap();
        assert_eq!(m.bmi(), 15.8);
        // half-up on the first decimal: 20.0 / 1.0^2 = 20.0; 16.25 rounds up
        let exact = Measurement {
            height_cm: 100.0,
            weight_kg: 16.25,
        };
        assert_eq!(exact.bmi(), 16.3);
    }

    #[test]
    fn test_first_log_reports_full_values_as_deltas() {
        let child = child_without_history();
        let m = GrowthInput::new("89", "12.5").parse().unwrap();
        let snapshot = compute_snapshot(&child, m, date());
        assert_eq!(snapshot.bmi, 15.8);
        assert_eq!(snapshot.bmi_status, BmiStatus::Underweight);
        assert_eq!(snapshot.height_change, "+89.0 cm");
        assert_eq!(snapshot.weight_change, "+12.5 kg");
        assert_eq!(snapshot.last_checkup, "July 25, 2025");
    }

    #[test]
    fn test_second_log_diffs_against_previous() {
        let child = child_with_history(89.0, 12.5);
        let m = GrowthInput::new("91", "13.0").parse().unwrap();
        let snapshot = compute_snapshot(&child, m, date());
        assert_eq!(snapshot.height_change, "+2.0 cm");
        assert_eq!(snapshot.weight_change, "+0.5 kg");
        // 13.0 / 0.91^2 = 15.6985... -> 15.7
        assert_eq!(snapshot.bmi, 15.7);
    }

    #[test]
    fn test_negative_and_zero_deltas_format_without_plus() {
        let child = child_with_history(90.0, 13.0);
        let m = GrowthInput::new("89", "13.0").parse().unwrap();
        let snapshot = compute_snapshot(&child, m, date());
        assert_eq!(snapshot.height_change, "-1.0 cm");
        assert_eq!(snapshot.weight_change, "0.0 kg");
    }

    #[test]
    fn test_status_follows_band_table() {
        let m = Measurement {
            height_cm: 100.0,
            weight_kg: 16.0,
        };
        let snapshot = compute_snapshot(&child_without_history(), m, date());
        assert_eq!(snapshot.bmi, 16.0);
        assert_eq!(snapshot.bmi_status, BmiStatus::Normal);

        let m = Measurement {
            height_cm: 100.0,
            weight_kg: 30.0,
        };
        assert_eq!(BmiStatus::from_bmi(m.bmi()), BmiStatus::Obese);
    }
}
