//! Cart line items

use crate::{
    accessories::{Accessory, AccessoryKey},
    pricing::{AccessoryQuote, WeightQuote, accessory_price_for, price_for},
    products::{Product, ProductKey},
    promotions::samples::SAMPLE_WEIGHT,
    weights::Grams,
};

/// A weight of one product. At most one line per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowerLine {
    /// Product in the line
    pub product: ProductKey,

    /// Weight ordered, always positive
    pub weight: Grams,
}

/// A number of units of one accessory. At most one line per accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessoryLine {
    /// Accessory in the line
    pub accessory: AccessoryKey,

    /// Units ordered, always positive
    pub quantity: u32,
}

/// A free 1g sample of one flower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLine {
    /// Sampled product
    pub product: ProductKey,
}

impl SampleLine {
    /// Sample weight, always one gram.
    pub fn weight(&self) -> Grams {
        SAMPLE_WEIGHT
    }
}

/// A flower line resolved against the catalog and priced.
#[derive(Debug, Clone, Copy)]
pub struct FlowerLineQuote<'a> {
    /// Product key
    pub key: ProductKey,

    /// Product in the line
    pub product: &'a Product<'a>,

    /// Weight ordered
    pub weight: Grams,

    /// Tier pricing for the line
    pub quote: WeightQuote<'a>,
}

impl<'a> FlowerLineQuote<'a> {
    pub(crate) fn new(key: ProductKey, product: &'a Product<'a>, weight: Grams) -> Self {
        FlowerLineQuote {
            key,
            product,
            weight,
            quote: price_for(&product.price, weight),
        }
    }
}

/// An accessory line resolved against the catalog and priced.
#[derive(Debug, Clone, Copy)]
pub struct AccessoryLineQuote<'a> {
    /// Accessory key
    pub key: AccessoryKey,

    /// Accessory in the line
    pub accessory: &'a Accessory<'a>,

    /// Units ordered
    pub quantity: u32,

    /// Bulk pricing for the line
    pub quote: AccessoryQuote<'a>,
}

impl<'a> AccessoryLineQuote<'a> {
    pub(crate) fn new(key: AccessoryKey, accessory: &'a Accessory<'a>, quantity: u32) -> Self {
        AccessoryLineQuote {
            key,
            accessory,
            quantity,
            quote: accessory_price_for(&accessory.price, quantity),
        }
    }
}
