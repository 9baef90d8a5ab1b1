// Validation utilities module
// Provides custom validation functions for domain-specific rules

use rust_decimal::Decimal;
use validator::ValidationError;

/// Largest order total accepted, matching the `orders.total_amount` column check
pub const MAX_ORDER_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Validates that a monetary amount is zero or positive
pub fn validate_non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        let mut error = ValidationError::new("amount_must_be_non_negative");
        error.message = Some("Total amount must not be negative".into());
        Err(error)
    } else {
        Ok(())
    }
}

/// Validates that an amount does not exceed `MAX_ORDER_AMOUNT`
pub fn validate_amount_within_limit(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount > MAX_ORDER_AMOUNT {
        let mut error = ValidationError::new("amount_exceeds_limit");
        error.message = Some(format!("Total amount must not exceed {}", MAX_ORDER_AMOUNT).into());
        Err(error)
    } else {
        Ok(())
    }
}

/// Validates an order total: non-negative and within `MAX_ORDER_AMOUNT`
pub fn validate_order_amount(amount: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative_amount(amount)?;
    validate_amount_within_limit(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_accepts_zero_and_positive() {
        assert!(validate_non_negative_amount(&dec!(0)).is_ok());
        assert!(validate_non_negative_amount(&dec!(0.01)).is_ok());
        assert!(validate_non_negative_amount(&dec!(1000)).is_ok());
    }

    #[test]
    fn test_rejects_negative() {
        let err = validate_non_negative_amount(&dec!(-0.01)).unwrap_err();
        assert_eq!(err.code, "amount_must_be_non_negative");
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert!(validate_amount_within_limit(&MAX_ORDER_AMOUNT).is_ok());
        assert!(validate_amount_within_limit(&dec!(0)).is_ok());
    }

    #[test]
    fn test_rejects_amount_over_limit() {
        let err = validate_amount_within_limit(&(MAX_ORDER_AMOUNT + dec!(0.01))).unwrap_err();
        assert_eq!(err.code, "amount_exceeds_limit");

        let huge = validate_amount_within_limit(&Decimal::MAX).unwrap_err();
        assert_eq!(huge.code, "amount_exceeds_limit");
    }

    #[test]
    fn test_order_amount_checks_both_bounds() {
        assert!(validate_order_amount(&dec!(1000)).is_ok());
        assert_eq!(
            validate_order_amount(&dec!(-1)).unwrap_err().code,
            "amount_must_be_non_negative"
        );
        assert_eq!(
            validate_order_amount(&dec!(1000000000.01)).unwrap_err().code,
            "amount_exceeds_limit"
        );
    }
}
