use bigdecimal::{BigDecimal, Zero};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ServiceError;

/// Optional `+` with a 1-3 digit country code, then 3-3-4 digits with
/// optional `-`, `.` or space separators, e.g. "+1 555-123-4567".
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+\d{1,3}[-.\s]?)?\d{3}[-.\s]?\d{3}[-.\s]?\d{4}$").unwrap());

pub fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("name cannot be empty".into()));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ServiceError> {
    if !PHONE_RE.is_match(phone) {
        return Err(ServiceError::Validation(format!(
            "invalid phone number format: '{phone}'"
        )));
    }
    Ok(())
}

pub fn validate_price(price: &BigDecimal) -> Result<(), ServiceError> {
    if *price <= BigDecimal::zero() {
        return Err(ServiceError::Validation("price must be positive".into()));
    }
    Ok(())
}

pub fn validate_stock(stock: i32) -> Result<(), ServiceError> {
    if stock < 0 {
        return Err(ServiceError::Validation("stock cannot be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn accepts_dashed_phone() {
        assert!(validate_phone("555-123-4567").is_ok());
    }

    #[test]
    fn accepts_country_code_variants() {
        assert!(validate_phone("+15551234567").is_ok());
        assert!(validate_phone("+1 555-123-4567").is_ok());
        assert!(validate_phone("+44 555.123.4567").is_ok());
        assert!(validate_phone("5551234567").is_ok());
    }

    #[test]
    fn rejects_garbage_phone() {
        assert!(validate_phone("abc").is_err());
        assert!(validate_phone("555-123").is_err());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("555-123-4567x").is_err());
    }

    #[test]
    fn rejects_long_country_code() {
        assert!(validate_phone("+1234 555-123-4567").is_err());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("Alice").is_ok());
    }

    #[test]
    fn non_positive_price_rejected() {
        assert!(validate_price(&BigDecimal::from(0)).is_err());
        assert!(validate_price(&BigDecimal::from(-5)).is_err());
        assert!(validate_price(&BigDecimal::from_str("9.99").unwrap()).is_ok());
    }

    #[test]
    fn negative_stock_rejected() {
        assert!(validate_stock(-1).is_err());
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(10).is_ok());
    }
}
