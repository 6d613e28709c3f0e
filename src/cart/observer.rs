//! Cart Observer

use crate::{
    accessories::AccessoryKey, cart::summary::CartSummary, products::ProductKey, weights::Grams,
};

/// A successful cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// Weight added to a product line, creating it if needed
    FlowerAdded {
        /// Product key
        product: ProductKey,
        /// Weight added
        weight: Grams,
    },

    /// Product line removed
    FlowerRemoved {
        /// Product key
        product: ProductKey,
    },

    /// Product line weight overwritten
    FlowerWeightUpdated {
        /// Product key
        product: ProductKey,
        /// New weight
        weight: Grams,
    },

    /// Units added to an accessory line, creating it if needed
    AccessoryAdded {
        /// Accessory key
        accessory: AccessoryKey,
        /// Units added
        quantity: u32,
    },

    /// Accessory line removed
    AccessoryRemoved {
        /// Accessory key
        accessory: AccessoryKey,
    },

    /// Accessory line quantity overwritten
    AccessoryQuantityUpdated {
        /// Accessory key
        accessory: AccessoryKey,
        /// New quantity
        quantity: u32,
    },

    /// Sample chosen
    SampleAdded {
        /// Product key
        product: ProductKey,
    },

    /// Sample removed
    SampleRemoved {
        /// Product key
        product: ProductKey,
    },

    /// Every collection emptied
    Cleared,
}

/// Observer notified after each cart mutation, once derived totals are current.
///
/// When no observer is provided the cart uses [`NoopObserver`].
pub trait CartObserver {
    /// Called after a mutation has been applied, persisted and summarised.
    fn on_change(&mut self, change: &CartChange, summary: &CartSummary<'_>);

    /// Called when samples were dropped because the allowance shrank.
    ///
    /// Runs before [`CartObserver::on_change`] for the same mutation.
    fn on_samples_evicted(&mut self, _evicted: &[ProductKey]) {}
}

/// No-op observer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn on_change(&mut self, _change: &CartChange, _summary: &CartSummary<'_>) {}
}

impl<O: CartObserver + ?Sized> CartObserver for &mut O {
    fn on_change(&mut self, change: &CartChange, summary: &CartSummary<'_>) {
        (**self).on_change(change, summary);
    }

    fn on_samples_evicted(&mut self, evicted: &[ProductKey]) {
        (**self).on_samples_evicted(evicted);
    }
}
