use std::str::FromStr;

use sea_orm::prelude::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollResponse {
    #[schema(example = "Successfully enrolled in Mathematics")]
    pub message: String,

    #[schema(example = "Mathematics")]
    pub subject: String,

    #[schema(example = "Juan Dela Cruz")]
    pub student: String,

    /// Always null right after enrolling.
    #[schema(value_type = Option<f64>)]
    pub grade: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RemoveStudentResponse {
    #[schema(example = "Removed Juan Dela Cruz from Mathematics")]
    pub message: String,
}

/// The grade may arrive as a JSON number or a numeric string.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateGradeRequest {
    #[schema(value_type = Option<f64>, example = 92.5)]
    pub grade: Option<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateGradeResponse {
    #[schema(example = "Updated grade of Juan Dela Cruz in Mathematics to 92.5")]
    pub message: String,

    #[schema(example = "Juan Dela Cruz")]
    pub student: String,

    #[schema(example = "Mathematics")]
    pub subject: String,

    #[schema(value_type = f64, example = 92.5)]
    pub grade: Decimal,
}

/// Coerces the request body's grade into a decimal within [0, 100].
/// Numbers and numeric strings are accepted; anything else is a 400
/// without touching stored state.
pub fn parse_grade_value(raw: Option<&Value>) -> Result<Decimal, ApiError> {
    let value = match raw {
        Some(Value::Null) | None => {
            return Err(ApiError::bad_request("Grade value is required"));
        }
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(number) => Decimal::from_str(&number.to_string())
            .or_else(|_| Decimal::from_scientific(&number.to_string())),
        Value::String(text) => Decimal::from_str(text.trim()),
        _ => return Err(ApiError::bad_request("Grade must be a number")),
    };

    let grade = parsed.map_err(|_| ApiError::bad_request("Grade must be a number"))?;

    if !crate::entities::grade::grade_within_bounds(grade) {
        return Err(ApiError::bad_request("Grade must be between 0 and 100"));
    }

    Ok(grade)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(
            parse_grade_value(Some(&json!(85.5))).unwrap(),
            Decimal::from_str("85.5").unwrap()
        );
        assert_eq!(
            parse_grade_value(Some(&json!("85.5"))).unwrap(),
            Decimal::from_str("85.5").unwrap()
        );
        assert_eq!(
            parse_grade_value(Some(&json!(" 70 "))).unwrap(),
            Decimal::from(70)
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(parse_grade_value(Some(&json!(0))).unwrap(), Decimal::ZERO);
        assert_eq!(
            parse_grade_value(Some(&json!(100))).unwrap(),
            Decimal::from(100)
        );

        let low = parse_grade_value(Some(&json!(-0.01))).unwrap_err();
        assert_eq!(low.status, StatusCode::BAD_REQUEST);
        let high = parse_grade_value(Some(&json!(100.01))).unwrap_err();
        assert_eq!(high.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rejects_missing_and_null() {
        let missing = parse_grade_value(None).unwrap_err();
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);
        assert_eq!(missing.message, "Grade value is required");

        let null = parse_grade_value(Some(&Value::Null)).unwrap_err();
        assert_eq!(null.message, "Grade value is required");
    }

    #[test]
    fn rejects_non_numeric_input() {
        let text = parse_grade_value(Some(&json!("abc"))).unwrap_err();
        assert_eq!(text.status, StatusCode::BAD_REQUEST);
        assert_eq!(text.message, "Grade must be a number");

        let array = parse_grade_value(Some(&json!([90]))).unwrap_err();
        assert_eq!(array.message, "Grade must be a number");

        let boolean = parse_grade_value(Some(&json!(true))).unwrap_err();
        assert_eq!(boolean.message, "Grade must be a number");
    }
}
