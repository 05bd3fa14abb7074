use bigdecimal::BigDecimal;
use std::{borrow::Cow, str::FromStr};
use validator::ValidationError;

pub fn parse(value: &str) -> Option<BigDecimal> {
    BigDecimal::from_str(value.trim())
        .ok()
        .filter(|price| *price >= BigDecimal::from(0))
}

pub fn validate_price(value: &str) -> Result<(), ValidationError> {
    match parse(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("INVALID_PRICE")
            .with_message(Cow::from("Price must be a non-negative number"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_prices_parse_exactly() {
        assert_eq!(parse("249.50"), BigDecimal::from_str("249.5").ok());
        assert_eq!(parse(" 10 "), Some(BigDecimal::from(10)));
        assert_eq!(parse("0"), Some(BigDecimal::from(0)));
    }

    #[test]
    fn negative_or_garbage_prices_are_rejected() {
        assert_eq!(parse("-1"), None);
        assert_eq!(parse("ten"), None);
        assert_eq!(parse(""), None);
        assert!(validate_price("-0.01").is_err());
    }
}
