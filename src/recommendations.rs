//! Recommendations
//!
//! The sommelier quiz: an intention and a taste pick exactly one product per
//! category.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::Catalog,
    products::{Product, ProductCategory, ProductKey},
};

/// What the customer wants from the moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Intention {
    /// Unwinding after a long day
    #[serde(rename = "detente")]
    Relaxation,

    /// Freeing up ideas
    #[serde(rename = "creativite")]
    Creativity,

    /// Preparing for a restful night
    #[serde(rename = "sommeil")]
    Sleep,

    /// Starting the day with vitality
    #[serde(rename = "energie")]
    Energy,
}

impl Intention {
    /// Every intention, in quiz order.
    pub const ALL: [Intention; 4] = [
        Intention::Relaxation,
        Intention::Creativity,
        Intention::Sleep,
        Intention::Energy,
    ];

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Intention::Relaxation => "Détente",
            Intention::Creativity => "Créativité",
            Intention::Sleep => "Sommeil",
            Intention::Energy => "Énergie",
        }
    }
}

/// Preferred aromatic family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Taste {
    /// Woody and earthy
    #[serde(rename = "boise")]
    Woody,

    /// Fruity and sweet
    #[serde(rename = "fruite")]
    Fruity,

    /// Floral and spicy
    #[serde(rename = "floral")]
    Floral,
}

impl Taste {
    /// Every taste, in quiz order.
    pub const ALL: [Taste; 3] = [Taste::Woody, Taste::Fruity, Taste::Floral];

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Taste::Woody => "Boisé & Terreux",
            Taste::Fruity => "Fruité & Sucré",
            Taste::Floral => "Floral & Épicé",
        }
    }
}

/// Id of the product recommended for an intention and a taste.
pub fn recommended_id(category: ProductCategory, intention: Intention, taste: Taste) -> &'static str {
    match category {
        ProductCategory::Flower => flower_recommendation(intention, taste),
        ProductCategory::Resin => resin_recommendation(intention, taste),
    }
}

fn flower_recommendation(intention: Intention, taste: Taste) -> &'static str {
    match (intention, taste) {
        (Intention::Relaxation, Taste::Woody) => "og-kush",
        (Intention::Relaxation, Taste::Fruity) => "strawberry-kush",
        (Intention::Relaxation, Taste::Floral) => "wedding-cake",
        (Intention::Creativity, Taste::Woody) => "ak-47",
        (Intention::Creativity, Taste::Fruity) => "purple-haze",
        (Intention::Creativity, Taste::Floral) => "girl-scout-cookies",
        (Intention::Sleep, Taste::Woody) => "gorilla-glue",
        (Intention::Sleep, Taste::Fruity) => "blue-dream",
        (Intention::Sleep, Taste::Floral) => "northern-lights",
        (Intention::Energy, Taste::Woody) => "jack-herer",
        (Intention::Energy, Taste::Fruity) => "lemon-haze",
        (Intention::Energy, Taste::Floral) => "white-widow",
    }
}

fn resin_recommendation(intention: Intention, taste: Taste) -> &'static str {
    match (intention, taste) {
        (Intention::Relaxation, Taste::Woody) => "afghan-hash",
        (Intention::Relaxation | Intention::Sleep, Taste::Fruity) => "rosin-press",
        (Intention::Relaxation, Taste::Floral) => "moroccan-hash",
        (Intention::Creativity | Intention::Energy, Taste::Woody) => "dry-sift",
        (Intention::Creativity, Taste::Fruity) => "live-rosin",
        (Intention::Creativity, Taste::Floral) => "charas",
        (Intention::Sleep, Taste::Woody) => "lebanese-hash",
        (Intention::Sleep, Taste::Floral) => "moonrocks",
        (Intention::Energy, Taste::Fruity) => "bubble-hash",
        (Intention::Energy, Taste::Floral) => "nepal-temple-ball",
    }
}

/// Look up the recommended product in `catalog`.
pub fn recommend<'c, 'a>(
    catalog: &'c Catalog<'a>,
    category: ProductCategory,
    intention: Intention,
    taste: Taste,
) -> Option<(ProductKey, &'c Product<'a>)> {
    catalog.product_by_id(recommended_id(category, intention, taste))
}
