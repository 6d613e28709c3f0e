//! Catalog Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    accessories::{Accessory, AccessoryCategory},
    catalog::CatalogError,
    products::{Product, ProductCategory, TerpeneProfile},
    recommendations::{Intention, Taste},
};

/// Top-level catalog document
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO code every price is expressed in
    pub currency: String,

    /// Products in display order
    pub products: Vec<ProductFixture>,

    /// Ids of featured products
    #[serde(default)]
    pub featured: Vec<String>,

    /// Accessories in display order
    #[serde(default)]
    pub accessories: Vec<AccessoryFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Catalog id
    pub id: String,

    /// Product name
    pub name: String,

    /// Strain type or origin
    pub subtitle: String,

    /// Marketing copy
    pub description: String,

    /// Price per gram (e.g., "14.00 EUR")
    pub price: String,

    /// CBD content (e.g., "22%")
    pub cbd: String,

    /// Image asset reference
    pub image: String,

    /// Aromatic profile
    pub terpenes: TerpeneProfile,

    /// Mood label
    pub mood: String,

    /// Product family
    pub category: ProductCategory,

    /// Intentions the product suits
    #[serde(default)]
    pub intentions: Vec<Intention>,

    /// Tastes the product suits
    #[serde(default)]
    pub tastes: Vec<Taste>,
}

impl ProductFixture {
    /// Build the product once its price has been parsed and checked.
    pub fn into_product<'a>(self, price: Money<'a, Currency>) -> Product<'a> {
        Product {
            id: self.id,
            name: self.name,
            subtitle: self.subtitle,
            description: self.description,
            price,
            cbd: self.cbd,
            image: self.image,
            terpenes: self.terpenes,
            mood: self.mood,
            category: self.category,
            intentions: SmallVec::from_vec(self.intentions),
            tastes: SmallVec::from_vec(self.tastes),
        }
    }
}

/// Accessory Fixture
#[derive(Debug, Deserialize)]
pub struct AccessoryFixture {
    /// Catalog id
    pub id: String,

    /// Accessory name
    pub name: String,

    /// Price per unit (e.g., "3.00 EUR")
    pub price: String,

    /// Image asset reference
    pub image: String,

    /// Short description
    pub description: String,

    /// Accessory family
    pub category: AccessoryCategory,
}

impl AccessoryFixture {
    /// Build the accessory once its price has been parsed and checked.
    pub fn into_accessory<'a>(self, price: Money<'a, Currency>) -> Accessory<'a> {
        Accessory {
            id: self.id,
            name: self.name,
            price,
            image: self.image,
            description: self.description,
            category: self.category,
        }
    }
}

/// Parse price string (e.g., "2.99 EUR") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(CatalogError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(currency_code)?))
}

/// Resolve an ISO currency code.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownCurrency`] for codes outside GBP, USD and EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, CatalogError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(CatalogError::UnknownCurrency(other.to_string())),
    }
}
