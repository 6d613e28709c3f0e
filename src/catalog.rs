//! Catalog
//!
//! The static product and accessory catalog. The built-in catalog is compiled into
//! the binary from `fixtures/catalog.yml`; other catalogs can be loaded from YAML
//! in the same format.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    accessories::{Accessory, AccessoryKey},
    catalog::fixtures::{CatalogFixture, parse_currency, parse_price},
    products::{Product, ProductCategory, ProductKey, TerpeneProfile},
};

pub mod fixtures;
pub mod search;

pub use search::{CatalogQuery, SortOrder};

const BUILTIN_CATALOG: &str = include_str!("../fixtures/catalog.yml");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between the catalog and an entry
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Two accessories share an id
    #[error("Duplicate accessory id: {0}")]
    DuplicateAccessory(String),

    /// A featured id does not name a product
    #[error("Featured product not found: {0}")]
    UnknownFeatured(String),

    /// A terpene intensity is above 100
    #[error("Terpene intensity {value} out of range for product {product}")]
    TerpeneOutOfRange {
        /// Product id
        product: String,
        /// Offending intensity
        value: u8,
    },
}

/// Products and accessories, keyed for fast lookup and kept in catalog order.
#[derive(Debug)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    product_order: Vec<ProductKey>,
    product_keys: FxHashMap<String, ProductKey>,

    accessories: SlotMap<AccessoryKey, Accessory<'a>>,
    accessory_order: Vec<AccessoryKey>,
    accessory_keys: FxHashMap<String, AccessoryKey>,

    featured: SmallVec<[ProductKey; 4]>,

    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// The catalog compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the embedded fixture is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, a price or currency is invalid,
    /// ids are duplicated, or a featured id is unknown.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;
        let currency = parse_currency(&fixture.currency)?;

        let mut catalog = Catalog {
            products: SlotMap::with_key(),
            product_order: Vec::with_capacity(fixture.products.len()),
            product_keys: FxHashMap::default(),
            accessories: SlotMap::with_key(),
            accessory_order: Vec::with_capacity(fixture.accessories.len()),
            accessory_keys: FxHashMap::default(),
            featured: SmallVec::new(),
            currency,
        };

        for product_fixture in fixture.products {
            let price = catalog.price_in_currency(&product_fixture.price)?;

            validate_terpenes(&product_fixture.id, &product_fixture.terpenes)?;

            if catalog.product_keys.contains_key(&product_fixture.id) {
                return Err(CatalogError::DuplicateProduct(product_fixture.id));
            }

            let product = product_fixture.into_product(price);
            let id = product.id.clone();
            let key = catalog.products.insert(product);

            catalog.product_order.push(key);
            catalog.product_keys.insert(id, key);
        }

        for accessory_fixture in fixture.accessories {
            let price = catalog.price_in_currency(&accessory_fixture.price)?;

            if catalog.accessory_keys.contains_key(&accessory_fixture.id) {
                return Err(CatalogError::DuplicateAccessory(accessory_fixture.id));
            }

            let accessory = accessory_fixture.into_accessory(price);
            let id = accessory.id.clone();
            let key = catalog.accessories.insert(accessory);

            catalog.accessory_order.push(key);
            catalog.accessory_keys.insert(id, key);
        }

        for id in fixture.featured {
            let key = catalog
                .product_keys
                .get(&id)
                .copied()
                .ok_or(CatalogError::UnknownFeatured(id))?;

            catalog.featured.push(key);
        }

        Ok(catalog)
    }

    fn price_in_currency(&self, price: &str) -> Result<Money<'a, Currency>, CatalogError> {
        let (minor_units, currency) = parse_price(price)?;

        if currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                self.currency.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            ));
        }

        Ok(Money::from_minor(minor_units, currency))
    }

    /// Currency every price in the catalog is expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Get a product by key.
    pub fn product(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Get a product by its catalog id.
    pub fn product_by_id(&self, id: &str) -> Option<(ProductKey, &Product<'a>)> {
        let key = *self.product_keys.get(id)?;

        self.products.get(key).map(|product| (key, product))
    }

    /// Key of the product with the given id.
    pub fn product_key(&self, id: &str) -> Option<ProductKey> {
        self.product_keys.get(id).copied()
    }

    /// Iterate over products in catalog order.
    pub fn products(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.product_order
            .iter()
            .filter_map(|&key| self.products.get(key).map(|product| (key, product)))
    }

    /// Iterate over products of one category in catalog order.
    pub fn products_in(
        &self,
        category: ProductCategory,
    ) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.products()
            .filter(move |(_, product)| product.category == category)
    }

    /// Number of products.
    pub fn product_count(&self) -> usize {
        self.product_order.len()
    }

    /// Products highlighted on the landing page.
    pub fn featured(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.featured
            .iter()
            .filter_map(|&key| self.products.get(key).map(|product| (key, product)))
    }

    /// Get an accessory by key.
    pub fn accessory(&self, key: AccessoryKey) -> Option<&Accessory<'a>> {
        self.accessories.get(key)
    }

    /// Get an accessory by its catalog id.
    pub fn accessory_by_id(&self, id: &str) -> Option<(AccessoryKey, &Accessory<'a>)> {
        let key = *self.accessory_keys.get(id)?;

        self.accessories.get(key).map(|accessory| (key, accessory))
    }

    /// Key of the accessory with the given id.
    pub fn accessory_key(&self, id: &str) -> Option<AccessoryKey> {
        self.accessory_keys.get(id).copied()
    }

    /// Iterate over accessories in catalog order.
    pub fn accessories(&self) -> impl Iterator<Item = (AccessoryKey, &Accessory<'a>)> {
        self.accessory_order
            .iter()
            .filter_map(|&key| self.accessories.get(key).map(|accessory| (key, accessory)))
    }
}

fn validate_terpenes(product: &str, terpenes: &TerpeneProfile) -> Result<(), CatalogError> {
    match terpenes
        .intensities()
        .into_iter()
        .find(|value| *value > TerpeneProfile::MAX_INTENSITY)
    {
        Some(value) => Err(CatalogError::TerpeneOutOfRange {
            product: product.to_string(),
            value,
        }),
        None => Ok(()),
    }
}
