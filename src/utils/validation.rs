use axum::{http::StatusCode, Json};
use regex::Regex;
use serde_json::json;
use std::{borrow::Cow, sync::OnceLock};
use validator::{ValidationError, ValidationErrors};

pub fn into_response(errors: ValidationErrors) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({"errors": errors})))
}

fn phone_number_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("Invalid phone number regex"))
}

pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    match phone_number_regex().is_match(phone_number) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_PHONE_NUMBER").with_message(Cow::from(
            "Phone number must contain 7 to 15 digits, optionally prefixed with +",
        ))),
    }
}

fn time_of_day_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("Invalid time regex"))
}

pub fn validate_time_of_day(time: &str) -> Result<(), ValidationError> {
    match time_of_day_regex().is_match(time) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_TIME").with_message(Cow::from(
            "Time must be in 24 hour format (e.g: 08:00)",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_local_and_international_numbers() {
        assert!(validate_phone_number("+919876543210").is_ok());
        assert!(validate_phone_number("08012345678").is_ok());
    }

    #[test]
    fn rejects_non_numeric_phone_numbers() {
        assert!(validate_phone_number("call me").is_err());
        assert!(validate_phone_number("+12").is_err());
        assert!(validate_phone_number("").is_err());
    }

    #[test]
    fn accepts_24_hour_times() {
        assert!(validate_time_of_day("08:00").is_ok());
        assert!(validate_time_of_day("23:59").is_ok());
    }

    #[test]
    fn rejects_out_of_range_or_loose_times() {
        assert!(validate_time_of_day("24:00").is_err());
        assert!(validate_time_of_day("8:00").is_err());
        assert!(validate_time_of_day("08:60").is_err());
        assert!(validate_time_of_day("8am").is_err());
    }
}
