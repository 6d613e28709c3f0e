//! Products

use clap::ValueEnum;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::recommendations::{Intention, Taste};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ProductCategory {
    /// CBD flowers
    #[serde(rename = "fleur")]
    #[value(name = "flower")]
    Flower,

    /// CBD resins
    #[serde(rename = "resine")]
    #[value(name = "resin")]
    Resin,
}

impl ProductCategory {
    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::Flower => "Fleur",
            ProductCategory::Resin => "Résine",
        }
    }
}

/// Intensity of the four aromatic families, each from 0 to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerpeneProfile {
    /// Woody notes
    #[serde(rename = "boise")]
    pub woody: u8,

    /// Fruity notes
    #[serde(rename = "fruite")]
    pub fruity: u8,

    /// Spicy notes
    #[serde(rename = "epice")]
    pub spicy: u8,

    /// Earthy notes
    #[serde(rename = "terreux")]
    pub earthy: u8,
}

impl TerpeneProfile {
    /// Highest valid intensity.
    pub const MAX_INTENSITY: u8 = 100;

    /// The four intensities in a fixed order.
    pub fn intensities(&self) -> [u8; 4] {
        [self.woody, self.fruity, self.spicy, self.earthy]
    }
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Stable catalog id, e.g. `"og-kush"`
    pub id: String,

    /// Product name
    pub name: String,

    /// Strain type or origin
    pub subtitle: String,

    /// Marketing copy
    pub description: String,

    /// Price per gram
    pub price: Money<'a, Currency>,

    /// CBD content as displayed, e.g. `"22%"`
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
    pub intentions: SmallVec<[Intention; 2]>,

    /// Tastes the product suits
    pub tastes: SmallVec<[Taste; 2]>,
}

impl Product<'_> {
    /// CBD content as a number of percent, e.g. `22` for `"22%"`.
    pub fn cbd_percentage(&self) -> Option<Decimal> {
        let trimmed = self.cbd.trim();

        trimmed
            .strip_suffix('%')
            .unwrap_or(trimmed)
            .trim()
            .parse()
            .ok()
    }

    /// Whether the product is a flower.
    pub fn is_flower(&self) -> bool {
        self.category == ProductCategory::Flower
    }
}
