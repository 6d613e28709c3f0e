//! Cart
//!
//! The cart aggregate: flower, accessory and sample lines, the totals derived from
//! them, and their persistence. Every successful mutation trims samples to the
//! allowance, persists the collections it touched, recomputes the summary and
//! then notifies the observer, in that order.

use thiserror::Error;
use tracing::debug;

use crate::{
    accessories::AccessoryKey,
    catalog::Catalog,
    products::ProductKey,
    promotions::{SampleStatus, evict_excess_samples, sample_allowance},
    storage::KeyValueStore,
    weights::Grams,
};

pub mod lines;
pub mod observer;
pub mod persistence;
pub mod summary;

pub use lines::{AccessoryLine, AccessoryLineQuote, FlowerLine, FlowerLineQuote, SampleLine};
pub use observer::{CartChange, CartObserver, NoopObserver};
pub use persistence::{ACCESSORIES_KEY, FLOWERS_KEY, SAMPLES_KEY};
pub use summary::CartSummary;

use persistence::Dirty;

/// Rejected cart mutations. A rejected mutation leaves the cart untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product key is not in the catalog
    #[error("unknown product")]
    UnknownProduct(ProductKey),

    /// The accessory key is not in the catalog
    #[error("unknown accessory")]
    UnknownAccessory(AccessoryKey),

    /// A weight added to the cart must be positive
    #[error("weight must be positive, got {0}")]
    InvalidWeight(Grams),

    /// A quantity added to the cart must be positive
    #[error("quantity must be positive")]
    InvalidQuantity,

    /// The line to update is not in the cart
    #[error("item is not in the cart")]
    NotInCart,

    /// Every earned sample has already been chosen
    #[error("no samples left: {allowance} earned, all chosen")]
    SampleAllowanceExhausted {
        /// Samples earned by the current flower weight
        allowance: usize,
    },

    /// The product already has a sample in the cart
    #[error("a sample of this product is already in the cart")]
    DuplicateSample(ProductKey),

    /// Only flowers can be sampled
    #[error("samples can only be chosen among flowers")]
    SampleNotFlower(ProductKey),
}

/// Shopping cart backed by a key/value store.
#[derive(Debug)]
pub struct Cart<'a, S: KeyValueStore, O: CartObserver = NoopObserver> {
    catalog: &'a Catalog<'a>,
    store: S,
    observer: O,

    flowers: Vec<FlowerLine>,
    accessories: Vec<AccessoryLine>,
    samples: Vec<SampleLine>,

    summary: CartSummary<'a>,
    open: bool,
}

impl<'a, S: KeyValueStore> Cart<'a, S> {
    /// Restore the cart saved in `store`, or start an empty one.
    pub fn restore(catalog: &'a Catalog<'a>, store: S) -> Self {
        Self::restore_with_observer(catalog, store, NoopObserver)
    }
}

impl<'a, S: KeyValueStore, O: CartObserver> Cart<'a, S, O> {
    /// Restore the cart saved in `store` and report later mutations to `observer`.
    ///
    /// Missing or unreadable collections restore empty. Samples beyond the allowance
    /// of the restored flowers are trimmed and the trimmed list is saved back.
    pub fn restore_with_observer(catalog: &'a Catalog<'a>, store: S, observer: O) -> Self {
        let flowers = persistence::load_flowers(&store, catalog);
        let accessories = persistence::load_accessories(&store, catalog);
        let samples = persistence::load_samples(&store, catalog);

        let mut cart = Cart {
            catalog,
            store,
            observer,
            flowers,
            accessories,
            samples,
            summary: CartSummary::empty(catalog.currency()),
            open: false,
        };

        if !cart.enforce_sample_allowance().is_empty() {
            cart.persist(Dirty::SAMPLES);
        }

        cart.recompute();

        debug!(
            flowers = cart.flowers.len(),
            accessories = cart.accessories.len(),
            samples = cart.samples.len(),
            "restored cart"
        );

        cart
    }

    /// Catalog the cart refers to.
    pub fn catalog(&self) -> &'a Catalog<'a> {
        self.catalog
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Observer receiving mutation events.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Flower lines in insertion order.
    pub fn flowers(&self) -> &[FlowerLine] {
        &self.flowers
    }

    /// Accessory lines in insertion order.
    pub fn accessories(&self) -> &[AccessoryLine] {
        &self.accessories
    }

    /// Sample lines in the order they were chosen.
    pub fn samples(&self) -> &[SampleLine] {
        &self.samples
    }

    /// Totals as of the last mutation.
    pub fn summary(&self) -> &CartSummary<'a> {
        &self.summary
    }

    /// Sample allowance and usage.
    pub fn sample_status(&self) -> SampleStatus {
        self.summary.samples()
    }

    /// Whether the cart panel is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show or hide the cart panel.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Whether the cart holds no line items.
    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty() && self.accessories.is_empty() && self.samples.is_empty()
    }

    /// Flower lines priced at their tier. Lines whose product is missing from the
    /// catalog are skipped.
    pub fn flower_quotes(&self) -> impl Iterator<Item = FlowerLineQuote<'a>> + '_ {
        let catalog = self.catalog;

        self.flowers.iter().filter_map(move |line| {
            catalog
                .product(line.product)
                .map(|product| FlowerLineQuote::new(line.product, product, line.weight))
        })
    }

    /// Accessory lines priced with the bulk discount. Lines whose accessory is
    /// missing from the catalog are skipped.
    pub fn accessory_quotes(&self) -> impl Iterator<Item = AccessoryLineQuote<'a>> + '_ {
        let catalog = self.catalog;

        self.accessories.iter().filter_map(move |line| {
            catalog.accessory(line.accessory).map(|accessory| {
                AccessoryLineQuote::new(line.accessory, accessory, line.quantity)
            })
        })
    }

    /// Add `weight` of a product, on top of any weight already in the cart.
    /// Opens the cart panel.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownProduct`] for keys outside the catalog and
    /// [`CartError::InvalidWeight`] for non-positive weights.
    pub fn add_flower(&mut self, product: ProductKey, weight: Grams) -> Result<(), CartError> {
        if self.catalog.product(product).is_none() {
            return Err(CartError::UnknownProduct(product));
        }

        if !weight.is_positive() {
            return Err(CartError::InvalidWeight(weight));
        }

        match self.flowers.iter_mut().find(|line| line.product == product) {
            Some(line) => line.weight += weight,
            None => self.flowers.push(FlowerLine { product, weight }),
        }

        self.open = true;
        self.commit(Dirty::FLOWERS, CartChange::FlowerAdded { product, weight });

        Ok(())
    }

    /// Remove a product line. Returns whether a line was removed.
    pub fn remove_flower(&mut self, product: ProductKey) -> bool {
        let before = self.flowers.len();

        self.flowers.retain(|line| line.product != product);

        if self.flowers.len() == before {
            return false;
        }

        self.commit(Dirty::FLOWERS, CartChange::FlowerRemoved { product });

        true
    }

    /// Overwrite the weight of a product line. A non-positive weight removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if the product has no line and `weight` is
    /// positive. A non-positive weight behaves like [`Cart::remove_flower`].
    pub fn update_flower_weight(
        &mut self,
        product: ProductKey,
        weight: Grams,
    ) -> Result<(), CartError> {
        if !weight.is_positive() {
            self.remove_flower(product);

            return Ok(());
        }

        let line = self
            .flowers
            .iter_mut()
            .find(|line| line.product == product)
            .ok_or(CartError::NotInCart)?;

        line.weight = weight;

        self.commit(
            Dirty::FLOWERS,
            CartChange::FlowerWeightUpdated { product, weight },
        );

        Ok(())
    }

    /// Add units of an accessory, on top of any already in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownAccessory`] for keys outside the catalog and
    /// [`CartError::InvalidQuantity`] for a zero quantity.
    pub fn add_accessory(
        &mut self,
        accessory: AccessoryKey,
        quantity: u32,
    ) -> Result<(), CartError> {
        if self.catalog.accessory(accessory).is_none() {
            return Err(CartError::UnknownAccessory(accessory));
        }

        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        match self
            .accessories
            .iter_mut()
            .find(|line| line.accessory == accessory)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.accessories.push(AccessoryLine {
                accessory,
                quantity,
            }),
        }

        self.commit(
            Dirty::ACCESSORIES,
            CartChange::AccessoryAdded {
                accessory,
                quantity,
            },
        );

        Ok(())
    }

    /// Remove an accessory line. Returns whether a line was removed.
    pub fn remove_accessory(&mut self, accessory: AccessoryKey) -> bool {
        let before = self.accessories.len();

        self.accessories.retain(|line| line.accessory != accessory);

        if self.accessories.len() == before {
            return false;
        }

        self.commit(Dirty::ACCESSORIES, CartChange::AccessoryRemoved { accessory });

        true
    }

    /// Overwrite the quantity of an accessory line. Zero removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if the accessory has no line and `quantity`
    /// is non-zero. Zero behaves like [`Cart::remove_accessory`].
    pub fn update_accessory_quantity(
        &mut self,
        accessory: AccessoryKey,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove_accessory(accessory);

            return Ok(());
        }

        let line = self
            .accessories
            .iter_mut()
            .find(|line| line.accessory == accessory)
            .ok_or(CartError::NotInCart)?;

        line.quantity = quantity;

        self.commit(
            Dirty::ACCESSORIES,
            CartChange::AccessoryQuantityUpdated {
                accessory,
                quantity,
            },
        );

        Ok(())
    }

    /// Choose a free sample of a flower.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownProduct`] for keys outside the catalog,
    /// [`CartError::SampleNotFlower`] for resins, [`CartError::DuplicateSample`]
    /// if the product is already sampled and
    /// [`CartError::SampleAllowanceExhausted`] once every earned sample is chosen.
    pub fn add_sample(&mut self, product: ProductKey) -> Result<(), CartError> {
        let entry = self
            .catalog
            .product(product)
            .ok_or(CartError::UnknownProduct(product))?;

        if !entry.is_flower() {
            return Err(CartError::SampleNotFlower(product));
        }

        if self.samples.iter().any(|line| line.product == product) {
            return Err(CartError::DuplicateSample(product));
        }

        let status = self.sample_status();

        if !status.can_add() {
            return Err(CartError::SampleAllowanceExhausted {
                allowance: status.allowance(),
            });
        }

        self.samples.push(SampleLine { product });
        self.commit(Dirty::SAMPLES, CartChange::SampleAdded { product });

        Ok(())
    }

    /// Remove a sample. Returns whether a sample was removed.
    pub fn remove_sample(&mut self, product: ProductKey) -> bool {
        let before = self.samples.len();

        self.samples.retain(|line| line.product != product);

        if self.samples.len() == before {
            return false;
        }

        self.commit(Dirty::SAMPLES, CartChange::SampleRemoved { product });

        true
    }

    /// Empty all three collections.
    pub fn clear(&mut self) {
        self.flowers.clear();
        self.accessories.clear();
        self.samples.clear();

        self.commit(Dirty::ALL, CartChange::Cleared);
    }

    fn flower_weight(&self) -> Grams {
        self.flower_quotes().map(|line| line.weight).sum()
    }

    fn enforce_sample_allowance(&mut self) -> Vec<ProductKey> {
        let allowance = sample_allowance(self.flower_weight());

        evict_excess_samples(&mut self.samples, allowance)
            .into_iter()
            .map(|line| line.product)
            .collect()
    }

    fn persist(&self, dirty: Dirty) {
        persistence::save(
            &self.store,
            self.catalog,
            dirty,
            &self.flowers,
            &self.accessories,
            &self.samples,
        );
    }

    fn recompute(&mut self) {
        let flowers: Vec<_> = self.flower_quotes().collect();
        let accessories: Vec<_> = self.accessory_quotes().collect();

        self.summary = CartSummary::compute(
            self.catalog.currency(),
            &flowers,
            &accessories,
            self.samples.len(),
        );
    }

    fn commit(&mut self, mut dirty: Dirty, change: CartChange) {
        let evicted = self.enforce_sample_allowance();

        if !evicted.is_empty() {
            dirty.samples = true;
        }

        self.persist(dirty);
        self.recompute();

        debug!(?change, total = %self.summary.total(), "cart updated");

        if !evicted.is_empty() {
            self.observer.on_samples_evicted(&evicted);
        }

        self.observer.on_change(&change, &self.summary);
    }
}
