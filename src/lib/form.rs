use serde_derive::Serialize;

use super::*;

/// The two genders the prediction service encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// The six customer attributes as entered in the form.
///
/// Numeric fields are kept as raw text buffers so the input controls can bind
/// to them directly; coercion happens once, at submission.
#[derive(Debug, Clone)]
pub struct FormState {
    pub country: String,
    pub gender: Gender,
    pub age: String,
    pub annual_salary: String,
    pub credit_card_debt: String,
    pub net_worth: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            country: "India".to_string(),
            gender: Gender::Male,
            age: "45".to_string(),
            annual_salary: "500000".to_string(),
            credit_card_debt: "5000".to_string(),
            net_worth: "300000".to_string(),
        }
    }
}

impl FormState {
    /// Coerce the raw buffers into the wire payload.
    ///
    /// Values that fail to parse become NaN and are forwarded anyway; the
    /// service is the sole validator. Age is truncated toward zero so it
    /// serializes as an integer.
    pub fn request(&self) -> PredictionRequest {
        PredictionRequest {
            country: self.country.clone(),
            gender: self.gender,
            age: parse_number(&self.age).trunc(),
            annual_salary: parse_number(&self.annual_salary),
            credit_card_debt: parse_number(&self.credit_card_debt),
            net_worth: parse_number(&self.net_worth),
        }
    }
}

fn parse_number(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

#[test]
fn test_last_write_wins_per_field() {
    let mut form = FormState::default();
    form.age = "30".to_string();
    form.age = "31".to_string();
    form.country = "Germany".to_string();
    assert_eq!(form.age, "31");
    assert_eq!(form.country, "Germany");
    assert_eq!(form.annual_salary, "500000");
}

#[test]
fn test_coercion() {
    let mut form = FormState::default();
    form.age = " 45.9 ".to_string();
    form.annual_salary = "125000.25".to_string();
    let request = form.request();
    assert_eq!(request.age, 45.0);
    assert_eq!(request.annual_salary, 125000.25);
}

#[test]
fn test_malformed_numbers_become_nan() {
    let mut form = FormState::default();
    form.age = "abc".to_string();
    form.net_worth = String::new();
    let request = form.request();
    assert!(request.age.is_nan());
    assert!(request.net_worth.is_nan());
    assert!(!request.annual_salary.is_nan());
}
