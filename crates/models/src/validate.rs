//! Field-level checks shared by the entities.

use rust_decimal::Decimal;

use crate::errors::ModelError;

/// Trimmed value of a required text field.
pub fn required(field: &str, value: &str) -> Result<String, ModelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Required text field bounded by the column width.
pub fn bounded(field: &str, value: &str, max_len: usize) -> Result<String, ModelError> {
    let v = required(field, value)?;
    if v.chars().count() > max_len {
        return Err(ModelError::Validation(format!("{field} must be at most {max_len} characters")));
    }
    Ok(v)
}

/// Monetary amount: non-negative with at most two fractional digits.
pub fn money(field: &str, value: Decimal) -> Result<Decimal, ModelError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ModelError::Validation(format!("{field} must not be negative")));
    }
    let normalized = value.normalize();
    if normalized.scale() > 2 {
        return Err(ModelError::Validation(format!("{field} must have at most two decimal places")));
    }
    if normalized > Decimal::new(9_999_999_999_99, 2) {
        return Err(ModelError::Validation(format!("{field} is too large")));
    }
    let mut cents = if normalized.is_zero() { Decimal::ZERO } else { normalized };
    cents.rescale(2);
    Ok(cents)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("driverName", "  Aline ").unwrap(), "Aline");
        assert!(matches!(required("driverName", "   "), Err(ModelError::Validation(_))));
    }

    #[test]
    fn bounded_counts_chars() {
        assert!(bounded("plateNumber", "RAA111A", 20).is_ok());
        assert!(bounded("plateNumber", &"X".repeat(21), 20).is_err());
    }

    #[test]
    fn money_accepts_two_places_and_zero() {
        assert_eq!(money("packagePrice", Decimal::from_str("5000.50").unwrap()).unwrap(), Decimal::from_str("5000.5").unwrap());
        assert!(money("amountPaid", Decimal::ZERO).is_ok());
        assert!(money("amountPaid", Decimal::from_str("-0.00").unwrap()).is_ok());
    }

    #[test]
    fn money_is_stored_with_two_places() {
        let v = money("packagePrice", Decimal::from(5000)).unwrap();
        assert_eq!(v.to_string(), "5000.00");
    }

    #[test]
    fn money_rejects_negative_and_fine_fractions() {
        assert!(money("amountPaid", Decimal::from_str("-1").unwrap()).is_err());
        assert!(money("amountPaid", Decimal::from_str("10.005").unwrap()).is_err());
        // trailing zeros beyond two places are still exact cents
        assert!(money("amountPaid", Decimal::from_str("10.500").unwrap()).is_ok());
    }
}
