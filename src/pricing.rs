//! Pricing
//!
//! Weight-tiered pricing for flowers and resins, and bulk pricing for accessories.
//! Every function here is total: invalid weights or quantities price at zero
//! instead of failing.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tracing::warn;

use crate::{discounts::discount_line, weights::Grams};

pub mod accessories;
pub mod tiers;

pub use accessories::{AccessoryQuote, accessory_price_for};
pub use tiers::{NO_DISCOUNT, WEIGHT_TIERS, WeightTier, discount_label, tier_for};

/// Quick-pick weights offered next to every product.
pub const PRESET_WEIGHTS: [Grams; 5] = [
    Grams::new(Decimal::from_parts(25, 0, 0, false, 1)),
    Grams::whole(10),
    Grams::whole(25),
    Grams::whole(50),
    Grams::whole(100),
];

/// The price of a weight of product after its tier discount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightQuote<'a> {
    raw_total: Money<'a, Currency>,
    final_total: Money<'a, Currency>,
    savings: Money<'a, Currency>,
    tier: &'static WeightTier,
}

impl<'a> WeightQuote<'a> {
    /// An all-zero quote in the given currency.
    pub fn zero(currency: &'a Currency) -> Self {
        WeightQuote {
            raw_total: Money::from_minor(0, currency),
            final_total: Money::from_minor(0, currency),
            savings: Money::from_minor(0, currency),
            tier: &NO_DISCOUNT,
        }
    }

    /// Unit price multiplied by weight.
    pub fn raw_total(&self) -> Money<'a, Currency> {
        self.raw_total
    }

    /// Price after the tier discount.
    pub fn final_total(&self) -> Money<'a, Currency> {
        self.final_total
    }

    /// `raw_total - final_total`.
    pub fn savings(&self) -> Money<'a, Currency> {
        self.savings
    }

    /// The tier the weight fell into.
    pub fn tier(&self) -> &'static WeightTier {
        self.tier
    }

    /// Discount as a fraction, e.g. `0.375`.
    pub fn discount(&self) -> Decimal {
        self.tier.discount()
    }

    /// Discount as a percentage.
    pub fn discount_percentage(&self) -> Percentage {
        self.tier.percentage()
    }

    /// Display label of the discount, e.g. `"-37.5%"`.
    pub fn discount_label(&self) -> &'static str {
        self.tier.label()
    }
}

/// Price `weight` grams of a product sold at `unit_price` per gram.
///
/// Zero and negative weights (and `NaN`, which [`Grams::from_f64`] maps to zero)
/// produce [`WeightQuote::zero`].
pub fn price_for<'a>(unit_price: &Money<'a, Currency>, weight: Grams) -> WeightQuote<'a> {
    if !weight.is_positive() {
        return WeightQuote::zero(unit_price.currency());
    }

    let tier = tier_for(weight);

    match discount_line(unit_price, weight.value(), &tier.percentage()) {
        Ok(line) => WeightQuote {
            raw_total: line.raw,
            final_total: line.total,
            savings: line.discount,
            tier,
        },
        Err(err) => {
            warn!(%err, %weight, "weight price overflowed; quoting zero");

            WeightQuote::zero(unit_price.currency())
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;

    use super::*;

    fn og_kush<'a>() -> Money<'a, Currency> {
        Money::from_minor(1400, EUR)
    }

    #[test]
    fn prices_weight_in_its_tier() {
        let quote = price_for(&og_kush(), Grams::whole(25));

        assert_eq!(quote.raw_total(), Money::from_minor(35_000, EUR));
        assert_eq!(quote.final_total(), Money::from_minor(21_875, EUR));
        assert_eq!(quote.savings(), Money::from_minor(13_125, EUR));
        assert_eq!(quote.discount(), Decimal::new(375, 3));
        assert_eq!(quote.discount_label(), "-37.5%");
    }

    #[test]
    fn small_weights_have_no_discount() {
        let quote = price_for(&og_kush(), Grams::new(Decimal::new(25, 1)));

        assert_eq!(quote.raw_total(), Money::from_minor(3500, EUR));
        assert_eq!(quote.final_total(), quote.raw_total());
        assert_eq!(quote.savings(), Money::from_minor(0, EUR));
        assert_eq!(quote.discount_label(), "0%");
    }

    #[test]
    fn invalid_weights_quote_zero() {
        for weight in [Grams::ZERO, Grams::whole(-5), Grams::from_f64(f64::NAN)] {
            let quote = price_for(&og_kush(), weight);

            assert_eq!(quote, WeightQuote::zero(EUR), "weight {weight}");
            assert_eq!(quote.discount(), Decimal::ZERO, "weight {weight}");
        }
    }

    #[test]
    fn overflowing_weight_quotes_zero() {
        let quote = price_for(&Money::from_minor(i64::MAX, EUR), Grams::whole(1_000));

        assert_eq!(quote, WeightQuote::zero(EUR));
    }

    #[test]
    fn preset_weights_are_ascending() {
        assert!(PRESET_WEIGHTS.windows(2).all(|pair| matches!(pair, [a, b] if a < b)));
        assert_eq!(PRESET_WEIGHTS.first(), Some(&Grams::new(Decimal::new(25, 1))));
    }
}
