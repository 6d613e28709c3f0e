//! Accessories

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::weights::Grams;

new_key_type! {
    /// Accessory Key
    pub struct AccessoryKey;
}

/// Accessory family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessoryCategory {
    /// Storage pouches
    #[serde(rename = "pochon")]
    Pouch,

    /// Smoking accessories
    #[serde(rename = "accessoire")]
    Accessory,
}

/// Accessory sold by the unit.
#[derive(Debug, Clone)]
pub struct Accessory<'a> {
    /// Stable catalog id, e.g. `"briquet-hsb"`
    pub id: String,

    /// Accessory name
    pub name: String,

    /// Price per unit
    pub price: Money<'a, Currency>,

    /// Image asset reference
    pub image: String,

    /// Short description
    pub description: String,

    /// Accessory family
    pub category: AccessoryCategory,
}

/// Pouch size suited to a weight of product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PouchSize {
    /// Under 10g
    Small,

    /// From 10g, under 30g
    Medium,

    /// 30g and over
    Large,
}

impl PouchSize {
    /// The pouch that fits `weight` grams.
    pub fn for_weight(weight: Grams) -> Self {
        if weight < Grams::whole(10) {
            PouchSize::Small
        } else if weight < Grams::whole(30) {
            PouchSize::Medium
        } else {
            PouchSize::Large
        }
    }

    /// Id of the matching catalog accessory.
    pub fn accessory_id(self) -> &'static str {
        match self {
            PouchSize::Small => "pochon-petit",
            PouchSize::Medium => "pochon-moyen",
            PouchSize::Large => "pochon-grand",
        }
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            PouchSize::Small => "Petit Pochon",
            PouchSize::Medium => "Moyen Pochon",
            PouchSize::Large => "Grand Pochon",
        }
    }
}
