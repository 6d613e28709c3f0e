//! Accessory bulk pricing

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tracing::warn;

use crate::discounts::discount_line;

/// Quantity from which the bulk discount applies.
pub const ACCESSORY_BULK_THRESHOLD: Decimal = Decimal::TEN;

/// Bulk discount fraction.
pub const ACCESSORY_BULK_DISCOUNT: Decimal = Decimal::from_parts(33, 0, 0, false, 2);

/// Label shown when the bulk discount applies.
pub const ACCESSORY_BULK_LABEL: &str = "-33%";

/// The price of a quantity of an accessory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessoryQuote<'a> {
    raw_total: Money<'a, Currency>,
    final_total: Money<'a, Currency>,
    discount: Decimal,
}

impl<'a> AccessoryQuote<'a> {
    /// An all-zero quote in the given currency.
    pub fn zero(currency: &'a Currency) -> Self {
        AccessoryQuote {
            raw_total: Money::from_minor(0, currency),
            final_total: Money::from_minor(0, currency),
            discount: Decimal::ZERO,
        }
    }

    /// Unit price multiplied by quantity.
    pub fn raw_total(&self) -> Money<'a, Currency> {
        self.raw_total
    }

    /// Price after any bulk discount.
    pub fn final_total(&self) -> Money<'a, Currency> {
        self.final_total
    }

    /// Amount saved by the bulk discount.
    pub fn savings(&self) -> Money<'a, Currency> {
        Money::from_minor(
            self.raw_total
                .to_minor_units()
                .saturating_sub(self.final_total.to_minor_units()),
            self.raw_total.currency(),
        )
    }

    /// Discount as a fraction: `0.33` or zero.
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// `Some("-33%")` when the bulk discount applies. There is no label for "no discount".
    pub fn discount_label(&self) -> Option<&'static str> {
        (self.discount > Decimal::ZERO).then_some(ACCESSORY_BULK_LABEL)
    }
}

/// Price `quantity` units of an accessory sold at `unit_price` each.
pub fn accessory_price_for<'a>(
    unit_price: &Money<'a, Currency>,
    quantity: impl Into<Decimal>,
) -> AccessoryQuote<'a> {
    let quantity = quantity.into();

    if quantity <= Decimal::ZERO {
        return AccessoryQuote::zero(unit_price.currency());
    }

    let discount = if quantity >= ACCESSORY_BULK_THRESHOLD {
        ACCESSORY_BULK_DISCOUNT
    } else {
        Decimal::ZERO
    };

    match discount_line(unit_price, quantity, &Percentage::from(discount)) {
        Ok(line) => AccessoryQuote {
            raw_total: line.raw,
            final_total: line.total,
            discount,
        },
        Err(err) => {
            warn!(%err, %quantity, "accessory price overflowed; quoting zero");

            AccessoryQuote::zero(unit_price.currency())
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;

    use super::*;

    fn lighter<'a>() -> Money<'a, Currency> {
        Money::from_minor(300, EUR)
    }

    #[test]
    fn below_threshold_has_no_discount_or_label() {
        let quote = accessory_price_for(&lighter(), 9u32);

        assert_eq!(quote.raw_total(), Money::from_minor(2700, EUR));
        assert_eq!(quote.final_total(), Money::from_minor(2700, EUR));
        assert_eq!(quote.discount(), Decimal::ZERO);
        assert_eq!(quote.discount_label(), None);
    }

    #[test]
    fn threshold_applies_bulk_discount() {
        let quote = accessory_price_for(&lighter(), 10u32);

        assert_eq!(quote.raw_total(), Money::from_minor(3000, EUR));
        assert_eq!(quote.final_total(), Money::from_minor(2010, EUR));
        assert_eq!(quote.savings(), Money::from_minor(990, EUR));
        assert_eq!(quote.discount(), Decimal::new(33, 2));
        assert_eq!(quote.discount_label(), Some("-33%"));
    }

    #[test]
    fn fractional_quantity_uses_the_same_threshold() {
        let quote = accessory_price_for(&lighter(), Decimal::new(999, 2));

        assert_eq!(quote.discount_label(), None);
        assert_eq!(quote.raw_total(), Money::from_minor(2997, EUR));
    }

    #[test]
    fn non_positive_quantities_quote_zero() {
        assert_eq!(accessory_price_for(&lighter(), 0u32), AccessoryQuote::zero(EUR));
        assert_eq!(
            accessory_price_for(&lighter(), Decimal::from(-4)),
            AccessoryQuote::zero(EUR)
        );
    }
}
