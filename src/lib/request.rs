use serde::Serializer;
use serde_derive::{Deserialize, Serialize};

use super::*;

/// The JSON body sent to the prediction endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub country: String,
    pub gender: Gender,
    #[serde(serialize_with = "serialize_age")]
    pub age: f64,
    pub annual_salary: f64,
    pub credit_card_debt: f64,
    pub net_worth: f64,
}

/// The part of the response body the client consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub predicted_car_purchase_amount: f64,
}

/// The service takes age as an integer. A value that never parsed is NaN and
/// goes out as null, like the monetary fields.
fn serialize_age<S>(age: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if age.is_finite() {
        serializer.serialize_i64(*age as i64)
    } else {
        serializer.serialize_none()
    }
}

#[test]
fn test_request_wire_format() {
    let request = PredictionRequest {
        country: "India".to_string(),
        gender: Gender::Female,
        age: 45.0,
        annual_salary: 500000.0,
        credit_card_debt: 5000.0,
        net_worth: 300000.0,
    };
    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains(r#""country":"India""#));
    assert!(json.contains(r#""gender":"Female""#));
    assert!(json.contains(r#""age":45"#));
    assert!(json.contains(r#""net_worth":300000.0"#));
}

#[test]
fn test_nan_serializes_as_null() {
    let request = PredictionRequest {
        country: "India".to_string(),
        gender: Gender::Male,
        age: f64::NAN,
        annual_salary: f64::NAN,
        credit_card_debt: 0.0,
        net_worth: 0.0,
    };
    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains(r#""age":null"#));
    assert!(json.contains(r#""annual_salary":null"#));
}

#[test]
fn test_response_parses_with_extra_fields() {
    let body = r#"{"predicted_car_purchase_amount": 25000.5, "model_version": "1.0.0"}"#;
    let response: PredictionResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.predicted_car_purchase_amount, 25000.5);
}
