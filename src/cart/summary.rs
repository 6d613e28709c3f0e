//! Cart Summary

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::lines::{AccessoryLineQuote, FlowerLineQuote},
    promotions::{GiftBundle, SampleStatus, gifts_for},
    weights::Grams,
};

/// Totals derived from the cart contents. Recomputed after every mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSummary<'a> {
    item_count: usize,
    flower_weight: Grams,
    subtotal: Money<'a, Currency>,
    total: Money<'a, Currency>,
    savings: Money<'a, Currency>,
    gifts: Option<GiftBundle>,
    samples: SampleStatus,
}

impl<'a> CartSummary<'a> {
    /// Summary of an empty cart.
    pub fn empty(currency: &'a Currency) -> Self {
        CartSummary {
            item_count: 0,
            flower_weight: Grams::ZERO,
            subtotal: Money::from_minor(0, currency),
            total: Money::from_minor(0, currency),
            savings: Money::from_minor(0, currency),
            gifts: None,
            samples: SampleStatus::default(),
        }
    }

    /// Summarise priced lines.
    ///
    /// Only resolved lines reach this point, so lines whose catalog entry is gone
    /// contribute nothing. Samples count as line items but are free.
    pub(crate) fn compute(
        currency: &'a Currency,
        flowers: &[FlowerLineQuote<'a>],
        accessories: &[AccessoryLineQuote<'a>],
        sample_count: usize,
    ) -> Self {
        let flower_weight: Grams = flowers.iter().map(|line| line.weight).sum();

        let subtotal = flowers
            .iter()
            .map(|line| line.quote.raw_total().to_minor_units())
            .chain(
                accessories
                    .iter()
                    .map(|line| line.quote.raw_total().to_minor_units()),
            )
            .fold(0_i64, i64::saturating_add);

        let total = flowers
            .iter()
            .map(|line| line.quote.final_total().to_minor_units())
            .chain(
                accessories
                    .iter()
                    .map(|line| line.quote.final_total().to_minor_units()),
            )
            .fold(0_i64, i64::saturating_add);

        CartSummary {
            item_count: flowers.len() + accessories.len() + sample_count,
            flower_weight,
            subtotal: Money::from_minor(subtotal, currency),
            total: Money::from_minor(total, currency),
            savings: Money::from_minor(subtotal.saturating_sub(total), currency),
            gifts: gifts_for(flower_weight),
            samples: SampleStatus::new(flower_weight, sample_count),
        }
    }

    /// Number of distinct line items across flowers, accessories and samples.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Total weight of the flower lines. Samples are not counted.
    pub fn flower_weight(&self) -> Grams {
        self.flower_weight
    }

    /// Sum of line prices before discounts.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Sum of line prices after discounts.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// `subtotal - total`.
    pub fn savings(&self) -> Money<'a, Currency> {
        self.savings
    }

    /// Gifts earned by the flower weight.
    pub fn gifts(&self) -> Option<&GiftBundle> {
        self.gifts.as_ref()
    }

    /// Sample allowance and usage.
    pub fn samples(&self) -> SampleStatus {
        self.samples
    }

    /// Whether the cart holds no line items.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;

    use super::*;

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = CartSummary::empty(EUR);

        assert!(summary.is_empty());
        assert_eq!(summary.total(), Money::from_minor(0, EUR));
        assert_eq!(summary.flower_weight(), Grams::ZERO);
        assert_eq!(summary.gifts(), None);
        assert_eq!(summary.samples().allowance(), 0);
    }

    #[test]
    fn samples_alone_count_as_items_but_cost_nothing() {
        let summary = CartSummary::compute(EUR, &[], &[], 2);

        assert_eq!(summary.item_count(), 2);
        assert_eq!(summary.total(), Money::from_minor(0, EUR));
        assert_eq!(summary.samples().chosen(), 2);
        assert_eq!(summary.samples().remaining(), 0);
    }
}
