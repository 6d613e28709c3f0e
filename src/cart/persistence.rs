//! Cart persistence
//!
//! Each collection is stored as a JSON array under its own key. Records refer to
//! catalog entries by id so that stored carts survive catalog reloads.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

use crate::{
    cart::lines::{AccessoryLine, FlowerLine, SampleLine},
    catalog::Catalog,
    promotions::samples::SAMPLE_WEIGHT,
    storage::KeyValueStore,
    weights::Grams,
};

/// Key of the flower collection.
pub const FLOWERS_KEY: &str = "cart";

/// Key of the accessory collection.
pub const ACCESSORIES_KEY: &str = "cart-accessories";

/// Key of the sample collection.
pub const SAMPLES_KEY: &str = "cart-samples";

/// Stored flower line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerRecord {
    /// Product id
    pub product: String,

    /// Weight in grams
    pub weight: Grams,
}

/// Stored accessory line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryRecord {
    /// Accessory id
    pub accessory: String,

    /// Units
    pub quantity: u32,
}

/// Stored sample line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Product id
    pub product: String,

    /// Always one gram
    #[serde(default = "sample_weight")]
    pub weight: Grams,
}

fn sample_weight() -> Grams {
    SAMPLE_WEIGHT
}

/// Collections touched by a mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Dirty {
    pub flowers: bool,
    pub accessories: bool,
    pub samples: bool,
}

impl Dirty {
    pub const FLOWERS: Dirty = Dirty {
        flowers: true,
        accessories: false,
        samples: false,
    };

    pub const ACCESSORIES: Dirty = Dirty {
        flowers: false,
        accessories: true,
        samples: false,
    };

    pub const SAMPLES: Dirty = Dirty {
        flowers: false,
        accessories: false,
        samples: true,
    };

    pub const ALL: Dirty = Dirty {
        flowers: true,
        accessories: true,
        samples: true,
    };
}

/// Read the records stored under `key`.
///
/// A missing key, a read failure or a value that is not a JSON array yields an
/// empty collection. Entries that do not match the record shape are skipped.
fn read_records<S: KeyValueStore, T: DeserializeOwned>(store: &S, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(%err, key, "failed to read stored cart; starting empty");

            return Vec::new();
        }
    };

    let entries = match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(%err, key, "stored cart is not a JSON array; starting empty");

            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(%err, key, "skipping malformed cart record");

                None
            }
        })
        .collect()
}

/// Write `records` under `key`. Failures are logged and skipped.
fn write_records<S: KeyValueStore, T: Serialize>(store: &S, key: &str, records: &[T]) {
    let json = match serde_json::to_string(records) {
        Ok(json) => json,
        Err(err) => {
            warn!(%err, key, "failed to serialise cart; write skipped");

            return;
        }
    };

    if let Err(err) = store.set(key, &json) {
        warn!(%err, key, "failed to persist cart; write skipped");
    }
}

/// Restore flower lines, dropping unknown products, non-positive weights and
/// repeated products.
pub(crate) fn load_flowers<S: KeyValueStore>(store: &S, catalog: &Catalog<'_>) -> Vec<FlowerLine> {
    let mut seen = FxHashSet::default();

    read_records::<_, FlowerRecord>(store, FLOWERS_KEY)
        .into_iter()
        .filter_map(|record| {
            let Some(product) = catalog.product_key(&record.product) else {
                warn!(id = %record.product, "dropping stored line for unknown product");

                return None;
            };

            if !record.weight.is_positive() || !seen.insert(product) {
                warn!(id = %record.product, weight = %record.weight, "dropping invalid stored line");

                return None;
            }

            Some(FlowerLine {
                product,
                weight: record.weight,
            })
        })
        .collect()
}

/// Restore accessory lines, dropping unknown accessories, zero quantities and
/// repeated accessories.
pub(crate) fn load_accessories<S: KeyValueStore>(
    store: &S,
    catalog: &Catalog<'_>,
) -> Vec<AccessoryLine> {
    let mut seen = FxHashSet::default();

    read_records::<_, AccessoryRecord>(store, ACCESSORIES_KEY)
        .into_iter()
        .filter_map(|record| {
            let Some(accessory) = catalog.accessory_key(&record.accessory) else {
                warn!(id = %record.accessory, "dropping stored line for unknown accessory");

                return None;
            };

            if record.quantity == 0 || !seen.insert(accessory) {
                warn!(id = %record.accessory, quantity = record.quantity, "dropping invalid stored line");

                return None;
            }

            Some(AccessoryLine {
                accessory,
                quantity: record.quantity,
            })
        })
        .collect()
}

/// Restore samples, dropping unknown products, non-flowers and repeats.
pub(crate) fn load_samples<S: KeyValueStore>(store: &S, catalog: &Catalog<'_>) -> Vec<SampleLine> {
    let mut seen = FxHashSet::default();

    read_records::<_, SampleRecord>(store, SAMPLES_KEY)
        .into_iter()
        .filter_map(|record| {
            let Some((product, entry)) = catalog.product_by_id(&record.product) else {
                warn!(id = %record.product, "dropping stored sample for unknown product");

                return None;
            };

            if !entry.is_flower() || !seen.insert(product) {
                warn!(id = %record.product, "dropping invalid stored sample");

                return None;
            }

            Some(SampleLine { product })
        })
        .collect()
}

/// Persist the collections flagged in `dirty`. Lines whose catalog entry is
/// missing are not written.
pub(crate) fn save<S: KeyValueStore>(
    store: &S,
    catalog: &Catalog<'_>,
    dirty: Dirty,
    flowers: &[FlowerLine],
    accessories: &[AccessoryLine],
    samples: &[SampleLine],
) {
    if dirty.flowers {
        let records: Vec<_> = flowers
            .iter()
            .filter_map(|line| {
                catalog.product(line.product).map(|product| FlowerRecord {
                    product: product.id.clone(),
                    weight: line.weight,
                })
            })
            .collect();

        write_records(store, FLOWERS_KEY, &records);
    }

    if dirty.accessories {
        let records: Vec<_> = accessories
            .iter()
            .filter_map(|line| {
                catalog
                    .accessory(line.accessory)
                    .map(|accessory| AccessoryRecord {
                        accessory: accessory.id.clone(),
                        quantity: line.quantity,
                    })
            })
            .collect();

        write_records(store, ACCESSORIES_KEY, &records);
    }

    if dirty.samples {
        let records: Vec<_> = samples
            .iter()
            .filter_map(|line| {
                catalog.product(line.product).map(|product| SampleRecord {
                    product: product.id.clone(),
                    weight: line.weight(),
                })
            })
            .collect();

        write_records(store, SAMPLES_KEY, &records);
    }
}
