//! Weight tiers
//!
//! Five contiguous discount brackets keyed on gram weight. A tier covers
//! `[min, next.min)`; the `max` bounds are the figures shown to customers.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::weights::Grams;

/// A discount bracket by weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightTier {
    min: Grams,
    max: Option<Grams>,
    discount: Decimal,
    label: &'static str,
}

impl WeightTier {
    const fn new(min: Grams, max: Option<Grams>, discount: Decimal, label: &'static str) -> Self {
        WeightTier {
            min,
            max,
            discount,
            label,
        }
    }

    /// Lowest weight in the tier.
    pub fn min(&self) -> Grams {
        self.min
    }

    /// Highest advertised weight in the tier, `None` for the open-ended top tier.
    pub fn max(&self) -> Option<Grams> {
        self.max
    }

    /// Discount as a fraction.
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Discount as a percentage.
    pub fn percentage(&self) -> Percentage {
        Percentage::from(self.discount)
    }

    /// Display label, e.g. `"-25%"`.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// The base tier: below 10g, no discount.
pub const NO_DISCOUNT: WeightTier = WeightTier::new(
    Grams::ZERO,
    Some(Grams::new(Decimal::from_parts(999, 0, 0, false, 2))),
    Decimal::ZERO,
    "0%",
);

/// All tiers, in ascending order of weight.
pub static WEIGHT_TIERS: [WeightTier; 5] = [
    NO_DISCOUNT,
    WeightTier::new(
        Grams::whole(10),
        Some(Grams::new(Decimal::from_parts(2499, 0, 0, false, 2))),
        Decimal::from_parts(25, 0, 0, false, 2),
        "-25%",
    ),
    WeightTier::new(
        Grams::whole(25),
        Some(Grams::new(Decimal::from_parts(4999, 0, 0, false, 2))),
        Decimal::from_parts(375, 0, 0, false, 3),
        "-37.5%",
    ),
    WeightTier::new(
        Grams::whole(50),
        Some(Grams::new(Decimal::from_parts(9999, 0, 0, false, 2))),
        Decimal::from_parts(458, 0, 0, false, 3),
        "-45.8%",
    ),
    WeightTier::new(
        Grams::whole(100),
        None,
        Decimal::from_parts(625, 0, 0, false, 3),
        "-62.5%",
    ),
];

/// Find the tier a weight falls into.
///
/// Negative weights fall into [`NO_DISCOUNT`].
pub fn tier_for(weight: Grams) -> &'static WeightTier {
    WEIGHT_TIERS
        .iter()
        .rev()
        .find(|tier| tier.min <= weight)
        .unwrap_or(&NO_DISCOUNT)
}

/// Display label of the discount applied at `weight`.
pub fn discount_label(weight: Grams) -> &'static str {
    tier_for(weight).label()
}
