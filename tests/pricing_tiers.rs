//! Integration tests for weight tiers, accessory bulk pricing, gifts and samples

use rust_decimal::Decimal;
use rusty_money::{Money, iso::EUR};
use testresult::TestResult;

use comptoir::{
    catalog::Catalog,
    pricing::{PRESET_WEIGHTS, WEIGHT_TIERS, accessory_price_for, discount_label, price_for},
    promotions::{GiftItem, GiftTier, gifts_for, sample_allowance},
    weights::Grams,
};

fn grams(value: &str) -> Result<Grams, comptoir::weights::GramsParseError> {
    value.parse()
}

#[test]
fn tier_boundaries_are_exact() -> TestResult {
    let unit = Money::from_minor(1400, EUR);

    let expected = [
        ("9.99", Decimal::ZERO),
        ("10.00", Decimal::new(25, 2)),
        ("24.99", Decimal::new(25, 2)),
        ("25.00", Decimal::new(375, 3)),
        ("49.99", Decimal::new(375, 3)),
        ("50.00", Decimal::new(458, 3)),
        ("99.99", Decimal::new(458, 3)),
        ("100.00", Decimal::new(625, 3)),
    ];

    for (weight, discount) in expected {
        let quote = price_for(&unit, grams(weight)?);

        assert_eq!(quote.discount(), discount, "discount at {weight}g");
    }

    Ok(())
}

#[test]
fn values_between_advertised_tier_bounds_use_lower_tier() -> TestResult {
    assert_eq!(discount_label(grams("9.995")?), "0%");
    assert_eq!(discount_label(grams("24.995")?), "-25%");
    assert_eq!(discount_label(grams("99.999")?), "-45.8%");

    Ok(())
}

#[test]
fn tiers_are_contiguous_and_ascending() {
    assert_eq!(WEIGHT_TIERS.first().map(|tier| tier.min()), Some(Grams::ZERO));
    assert_eq!(WEIGHT_TIERS.last().and_then(|tier| tier.max()), None);

    for pair in WEIGHT_TIERS.windows(2) {
        if let [lower, upper] = pair {
            assert!(lower.min() < upper.min(), "tiers must ascend");
            assert!(lower.discount() < upper.discount(), "discounts must grow");
        }
    }
}

#[test]
fn final_total_is_monotonic_within_tiers() -> TestResult {
    let catalog = Catalog::builtin()?;

    for (_, product) in catalog.products() {
        let mut previous: Option<(i64, Decimal)> = None;

        // 0.5g steps up to 150g
        for half_grams in 1..=300_i64 {
            let weight = Grams::new(Decimal::new(half_grams * 5, 1));
            let quote = price_for(&product.price, weight);
            let total = quote.final_total().to_minor_units();

            if let Some((previous_total, previous_discount)) = previous {
                if previous_discount == quote.discount() {
                    assert!(
                        total >= previous_total,
                        "{} at {weight}: {total} < {previous_total}",
                        product.id
                    );
                }
            }

            previous = Some((total, quote.discount()));
        }
    }

    Ok(())
}

#[test]
fn per_gram_price_never_increases_across_tiers() -> TestResult {
    let unit = Money::from_minor(1400, EUR);
    let mut previous_per_gram: Option<Decimal> = None;

    for tier in &WEIGHT_TIERS {
        let weight = if tier.min().is_positive() {
            tier.min()
        } else {
            Grams::ONE
        };

        let quote = price_for(&unit, weight);
        let per_gram = Decimal::from(quote.final_total().to_minor_units()) / weight.value();

        if let Some(previous) = previous_per_gram {
            assert!(per_gram <= previous, "{weight}: {per_gram} > {previous}");
        }

        previous_per_gram = Some(per_gram);
    }

    Ok(())
}

#[test]
fn invalid_weights_quote_zero() {
    let unit = Money::from_minor(1400, EUR);
    let zero = Money::from_minor(0, EUR);

    for weight in [Grams::ZERO, Grams::whole(-5), Grams::from_f64(f64::NAN)] {
        let quote = price_for(&unit, weight);

        assert_eq!(quote.raw_total(), zero);
        assert_eq!(quote.final_total(), zero);
        assert_eq!(quote.savings(), zero);
        assert_eq!(quote.discount(), Decimal::ZERO);
    }
}

#[test]
fn preset_weights_price_on_their_tier() -> TestResult {
    let catalog = Catalog::builtin()?;
    let (_, og_kush) = catalog.product_by_id("og-kush").ok_or("og-kush missing")?;

    let totals: Vec<i64> = PRESET_WEIGHTS
        .iter()
        .map(|&weight| price_for(&og_kush.price, weight).final_total().to_minor_units())
        .collect();

    // 2.5g: 35.00; 10g: 105.00; 25g: 218.75; 50g: 379.40; 100g: 525.00
    assert_eq!(totals, [3500, 10_500, 21_875, 37_940, 52_500]);

    Ok(())
}

#[test]
fn accessory_bulk_threshold() {
    let lighter = Money::from_minor(300, EUR);

    let nine = accessory_price_for(&lighter, 9);
    assert_eq!(nine.discount(), Decimal::ZERO);
    assert_eq!(nine.discount_label(), None);
    assert_eq!(nine.final_total(), Money::from_minor(2700, EUR));

    let ten = accessory_price_for(&lighter, 10);
    assert_eq!(ten.discount(), Decimal::new(33, 2));
    assert_eq!(ten.discount_label(), Some("-33%"));
    assert_eq!(ten.final_total(), Money::from_minor(2010, EUR));

    let fractional = accessory_price_for(&lighter, Decimal::new(999, 2));
    assert_eq!(fractional.discount(), Decimal::ZERO);

    for quantity in [Decimal::ZERO, Decimal::from(-3)] {
        let quote = accessory_price_for(&lighter, quantity);

        assert_eq!(quote.final_total(), Money::from_minor(0, EUR));
        assert_eq!(quote.discount_label(), None);
    }
}

#[test]
fn gifts_scale_linearly_with_packs() -> TestResult {
    assert_eq!(gifts_for(grams("9.99")?), None);

    let two_packs = gifts_for(Grams::whole(25)).ok_or("no gifts at 25g")?;
    assert_eq!(two_packs.pack_count(), 2);
    assert_eq!(two_packs.tier(), GiftTier::Pack);

    for item in GiftItem::ALL {
        assert_eq!(two_packs.contents().quantity(item), 2, "{item:?}");
    }

    let kit = gifts_for(Grams::whole(105)).ok_or("no gifts at 105g")?;
    assert_eq!(kit.pack_count(), 10);
    assert_eq!(kit.tier(), GiftTier::Kit);
    assert_eq!(kit.contents().quantity(GiftItem::Lighter), 10);
    assert_eq!(kit.label(), "Kit Revendeur HSB (10 Packs)");

    Ok(())
}

#[test]
fn sample_allowance_is_one_per_twelve_grams() {
    assert_eq!(sample_allowance(Grams::ZERO), 0);
    assert_eq!(sample_allowance(Grams::whole(11)), 0);
    assert_eq!(sample_allowance(Grams::whole(12)), 1);
    assert_eq!(sample_allowance(Grams::whole(24)), 2);
    assert_eq!(sample_allowance(Grams::whole(-24)), 0);
}
