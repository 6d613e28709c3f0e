//! Discounts
//!
//! Minor-unit arithmetic shared by the weight-tier and accessory bulk calculators.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Scaling a unit price by a quantity overflowed the minor-unit range.
    #[error("line total overflowed: {unit_minor} x {quantity}")]
    LineOverflow {
        /// Unit price in minor units
        unit_minor: i64,
        /// Quantity the unit price was scaled by
        quantity: Decimal,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A line total before and after a percentage discount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountedLine<'a> {
    /// Unit price multiplied by quantity
    pub raw: Money<'a, Currency>,

    /// Amount taken off `raw`
    pub discount: Money<'a, Currency>,

    /// `raw` less `discount`
    pub total: Money<'a, Currency>,
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// # Errors
///
/// Returns an error if:
/// - The percentage calculation overflows or cannot be safely represented (`DiscountError::PercentConversion`).
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage crate doesn't actually expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Multiply a unit price in minor units by a (possibly fractional) quantity,
/// rounding half away from zero to whole minor units.
///
/// # Errors
///
/// Returns [`DiscountError::LineOverflow`] if the product does not fit in an `i64`.
pub fn scale_minor(unit_minor: i64, quantity: Decimal) -> Result<i64, DiscountError> {
    let overflow = || DiscountError::LineOverflow {
        unit_minor,
        quantity,
    };

    Decimal::from_i64(unit_minor)
        .ok_or_else(overflow)?
        .checked_mul(quantity)
        .ok_or_else(overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(overflow)
}

/// Price `quantity` units of `unit_price` and take `percent` off the result.
///
/// # Errors
///
/// Returns a [`DiscountError`] if any intermediate amount overflows.
pub fn discount_line<'a>(
    unit_price: &Money<'a, Currency>,
    quantity: Decimal,
    percent: &Percentage,
) -> Result<DiscountedLine<'a>, DiscountError> {
    let currency = unit_price.currency();
    let raw_minor = scale_minor(unit_price.to_minor_units(), quantity)?;
    let discount_minor = percent_of_minor(percent, raw_minor)?;
    let total_minor = raw_minor
        .checked_sub(discount_minor)
        .ok_or(DiscountError::PercentConversion)?;

    Ok(DiscountedLine {
        raw: Money::from_minor(raw_minor, currency),
        discount: Money::from_minor(discount_minor, currency),
        total: Money::from_minor(total_minor, currency),
    })
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use decimal_percentage::Percentage;
    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn percent_of_minor_checked_mul_overflow_returns_error() -> TestResult {
        let percent = Percentage::try_from("100000000000000000000")?;
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        let percent = Percentage::from(Decimal::new(375, 3));

        // 0.375 * 1234 = 462.75
        assert_eq!(percent_of_minor(&percent, 1234)?, 463);
        // 0.375 * 1236 = 463.5
        assert_eq!(percent_of_minor(&percent, 1236)?, 464);

        Ok(())
    }

    #[test]
    fn scale_minor_handles_fractional_quantities() -> TestResult {
        // 14.00 * 2.5 = 35.00
        assert_eq!(scale_minor(1400, Decimal::new(25, 1))?, 3500);
        // 0.50 * 0.333 = 0.1665
        assert_eq!(scale_minor(50, Decimal::new(333, 3))?, 17);

        Ok(())
    }

    #[test]
    fn scale_minor_overflow_returns_error() {
        let result = scale_minor(i64::MAX, Decimal::from(2));

        assert!(matches!(result, Err(DiscountError::LineOverflow { .. })));
    }

    #[test]
    fn discount_line_splits_raw_discount_and_total() -> TestResult {
        let price = Money::from_minor(1400, EUR);
        let line = discount_line(&price, Decimal::from(25), &Percentage::from(Decimal::new(375, 3)))?;

        assert_eq!(line.raw, Money::from_minor(35_000, EUR));
        assert_eq!(line.discount, Money::from_minor(13_125, EUR));
        assert_eq!(line.total, Money::from_minor(21_875, EUR));

        Ok(())
    }
}
