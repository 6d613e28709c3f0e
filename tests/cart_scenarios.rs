//! Integration tests for the cart: totals, sample enforcement, persistence and observers

use std::fs;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::EUR};
use testresult::TestResult;

use comptoir::{
    cart::{
        ACCESSORIES_KEY, Cart, CartChange, CartObserver, CartSummary, FLOWERS_KEY, SAMPLES_KEY,
    },
    catalog::Catalog,
    products::ProductKey,
    promotions::GiftTier,
    storage::{FileStore, KeyValueStore, MemoryStore},
    weights::Grams,
};

#[derive(Debug, Default)]
struct Recorder {
    changes: Vec<CartChange>,
    totals: Vec<i64>,
    evicted: Vec<ProductKey>,
}

impl CartObserver for Recorder {
    fn on_change(&mut self, change: &CartChange, summary: &CartSummary<'_>) {
        self.changes.push(*change);
        self.totals.push(summary.total().to_minor_units());
    }

    fn on_samples_evicted(&mut self, evicted: &[ProductKey]) {
        self.evicted.extend_from_slice(evicted);
    }
}

fn product(catalog: &Catalog<'_>, id: &str) -> Result<ProductKey, String> {
    catalog.product_key(id).ok_or(format!("{id} missing"))
}

#[test]
fn og_kush_and_lighters_end_to_end() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mut cart = Cart::restore(&catalog, MemoryStore::new());
    let og_kush = product(&catalog, "og-kush")?;
    let lighter = catalog.accessory_key("briquet-hsb").ok_or("briquet-hsb missing")?;

    cart.add_flower(og_kush, Grams::whole(25))?;
    cart.add_accessory(lighter, 10)?;

    let flowers: Vec<_> = cart.flower_quotes().collect();
    let [flower] = flowers.as_slice() else {
        return Err("expected one flower line".into());
    };

    assert_eq!(flower.quote.raw_total(), Money::from_minor(35_000, EUR));
    assert_eq!(flower.quote.discount(), Decimal::new(375, 3));
    assert_eq!(flower.quote.final_total(), Money::from_minor(21_875, EUR));
    assert_eq!(flower.quote.savings(), Money::from_minor(13_125, EUR));

    let accessories: Vec<_> = cart.accessory_quotes().collect();
    let [accessory] = accessories.as_slice() else {
        return Err("expected one accessory line".into());
    };

    assert_eq!(accessory.quote.raw_total(), Money::from_minor(3_000, EUR));
    assert_eq!(accessory.quote.discount_label(), Some("-33%"));
    assert_eq!(accessory.quote.final_total(), Money::from_minor(2_010, EUR));

    let summary = cart.summary();
    let gifts = summary.gifts().ok_or("no gifts at 25g")?;

    assert_eq!(summary.total(), Money::from_minor(23_885, EUR));
    assert_eq!(summary.subtotal(), Money::from_minor(38_000, EUR));
    assert_eq!(summary.savings(), Money::from_minor(14_115, EUR));
    assert_eq!(summary.item_count(), 2);
    assert_eq!(summary.flower_weight(), Grams::whole(25));
    assert_eq!(gifts.pack_count(), 2);
    assert_eq!(gifts.tier(), GiftTier::Pack);
    assert_eq!(summary.samples().allowance(), 2);

    Ok(())
}

#[test]
fn samples_are_trimmed_when_weight_drops() -> TestResult {
    let catalog = Catalog::builtin()?;
    let store = MemoryStore::new();
    let mut cart = Cart::restore_with_observer(&catalog, store.clone(), Recorder::default());
    let og_kush = product(&catalog, "og-kush")?;
    let gelato = product(&catalog, "gelato")?;
    let amnesia = product(&catalog, "amnesia-haze")?;

    cart.add_flower(og_kush, Grams::whole(24))?;
    cart.add_sample(gelato)?;
    cart.add_sample(amnesia)?;

    assert_eq!(cart.sample_status().remaining(), 0);

    cart.update_flower_weight(og_kush, Grams::whole(10))?;

    assert!(cart.samples().is_empty());
    assert_eq!(cart.summary().samples().chosen(), 0);
    assert_eq!(cart.summary().samples().allowance(), 0);
    assert_eq!(cart.observer().evicted, [gelato, amnesia]);
    assert_eq!(store.get(SAMPLES_KEY)?.as_deref(), Some("[]"));

    Ok(())
}

#[test]
fn eviction_drops_the_most_recent_samples_first() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mut cart = Cart::restore_with_observer(&catalog, MemoryStore::new(), Recorder::default());
    let og_kush = product(&catalog, "og-kush")?;
    let gelato = product(&catalog, "gelato")?;
    let amnesia = product(&catalog, "amnesia-haze")?;

    cart.add_flower(og_kush, Grams::whole(24))?;
    cart.add_sample(gelato)?;
    cart.add_sample(amnesia)?;
    cart.update_flower_weight(og_kush, Grams::whole(12))?;

    assert_eq!(cart.samples().len(), 1);
    assert_eq!(cart.samples().first().map(|s| s.product), Some(gelato));
    assert_eq!(cart.observer().evicted, [amnesia]);

    Ok(())
}

#[test]
fn removing_the_last_flower_drops_every_sample() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mut cart = Cart::restore(&catalog, MemoryStore::new());
    let og_kush = product(&catalog, "og-kush")?;

    cart.add_flower(og_kush, Grams::whole(36))?;
    cart.add_sample(product(&catalog, "gelato")?)?;

    assert!(cart.remove_flower(og_kush));
    assert!(cart.samples().is_empty());
    assert!(cart.summary().is_empty());

    Ok(())
}

#[test]
fn adding_the_same_product_twice_accumulates() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mut cart = Cart::restore(&catalog, MemoryStore::new());
    let og_kush = product(&catalog, "og-kush")?;

    cart.add_flower(og_kush, Grams::whole(5))?;
    cart.add_flower(og_kush, Grams::whole(3))?;

    assert_eq!(cart.flowers().len(), 1);
    assert_eq!(cart.summary().flower_weight(), Grams::whole(8));
    assert_eq!(cart.summary().item_count(), 1);

    Ok(())
}

#[test]
fn observer_sees_every_mutation_after_totals_update() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mut recorder = Recorder::default();
    let og_kush = product(&catalog, "og-kush")?;

    {
        let mut cart = Cart::restore_with_observer(&catalog, MemoryStore::new(), &mut recorder);

        cart.add_flower(og_kush, Grams::whole(10))?;
        cart.update_flower_weight(og_kush, Grams::whole(2))?;

        assert!(cart.add_flower(og_kush, Grams::ZERO).is_err());

        cart.clear();
    }

    assert_eq!(
        recorder.changes,
        [
            CartChange::FlowerAdded {
                product: og_kush,
                weight: Grams::whole(10),
            },
            CartChange::FlowerWeightUpdated {
                product: og_kush,
                weight: Grams::whole(2),
            },
            CartChange::Cleared,
        ]
    );
    assert_eq!(recorder.totals, [10_500, 2_800, 0]);

    Ok(())
}

#[test]
fn file_store_round_trip() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = Catalog::builtin()?;
    let og_kush = product(&catalog, "og-kush")?;
    let gelato = product(&catalog, "gelato")?;
    let pouch = catalog.accessory_key("pochon-moyen").ok_or("pochon-moyen missing")?;

    {
        let mut cart = Cart::restore(&catalog, FileStore::new(dir.path()));

        cart.add_flower(og_kush, Grams::new(Decimal::new(125, 1)))?;
        cart.add_accessory(pouch, 2)?;
        cart.add_sample(gelato)?;
    }

    let flowers = fs::read_to_string(dir.path().join(format!("{FLOWERS_KEY}.json")))?;
    assert_eq!(flowers, r#"[{"product":"og-kush","weight":"12.5"}]"#);

    let restored = Cart::restore(&catalog, FileStore::new(dir.path()));

    assert_eq!(restored.summary().flower_weight(), Grams::new(Decimal::new(125, 1)));
    assert_eq!(restored.accessories().first().map(|line| line.quantity), Some(2));
    assert_eq!(restored.samples().first().map(|line| line.product), Some(gelato));
    assert!(!restored.is_open());

    Ok(())
}

#[test]
fn corrupt_storage_restores_an_empty_usable_cart() -> TestResult {
    let catalog = Catalog::builtin()?;
    let store = MemoryStore::new();

    store.set(FLOWERS_KEY, "not json at all")?;
    store.set(ACCESSORIES_KEY, "[{\"accessory\":")?;
    store.set(SAMPLES_KEY, "null")?;

    let mut cart = Cart::restore(&catalog, store.clone());

    assert!(cart.is_empty());
    assert_eq!(cart.summary().total(), Money::from_minor(0, EUR));

    cart.add_flower(product(&catalog, "og-kush")?, Grams::whole(1))?;

    assert_eq!(
        store.get(FLOWERS_KEY)?.as_deref(),
        Some(r#"[{"product":"og-kush","weight":"1"}]"#)
    );
    assert_eq!(store.get(ACCESSORIES_KEY)?.as_deref(), Some("[{\"accessory\":"));

    Ok(())
}

#[test]
fn restore_trims_samples_over_the_stored_allowance() -> TestResult {
    let catalog = Catalog::builtin()?;
    let store = MemoryStore::new();

    store.set(FLOWERS_KEY, r#"[{"product":"og-kush","weight":"12"}]"#)?;
    store.set(
        SAMPLES_KEY,
        r#"[{"product":"gelato","weight":"1"},{"product":"amnesia-haze","weight":"1"}]"#,
    )?;

    let cart = Cart::restore(&catalog, store.clone());

    assert_eq!(cart.samples().len(), 1);
    assert_eq!(
        store.get(SAMPLES_KEY)?.as_deref(),
        Some(r#"[{"product":"gelato","weight":"1"}]"#)
    );

    Ok(())
}
