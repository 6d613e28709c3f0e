//! Gift eligibility
//!
//! One "Pack Initié" is granted for every full 10g of flowers. From 100g the same
//! packs are presented as a reseller kit; the contents keep scaling linearly.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use smallvec::SmallVec;

use crate::weights::Grams;

/// Weight that earns one gift pack.
pub const GIFT_PACK_STEP: Grams = Grams::whole(10);

/// Weight from which gift packs are presented as a kit.
pub const KIT_THRESHOLD: Grams = Grams::whole(100);

/// How a gift bundle is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GiftTier {
    /// A numbered list of packs.
    Pack,

    /// The reseller kit, from 100g.
    Kit,
}

/// A single kind of item found in a gift pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GiftItem {
    /// Medium pouch
    MediumPouch,

    /// Pack of slim rolling papers
    SlimPapers,

    /// Branded lighter
    Lighter,

    /// Elastic band
    ElasticBand,
}

impl GiftItem {
    /// Every item in a pack, in display order.
    pub const ALL: [GiftItem; 4] = [
        GiftItem::MediumPouch,
        GiftItem::SlimPapers,
        GiftItem::Lighter,
        GiftItem::ElasticBand,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            GiftItem::MediumPouch => "Moyen Pochon",
            GiftItem::SlimPapers => "Feuilles Slim HSB",
            GiftItem::Lighter => "Briquet HSB",
            GiftItem::ElasticBand => "Élastique",
        }
    }

    /// Id of the catalog accessory this item is, if it is sold separately.
    pub fn accessory_id(self) -> Option<&'static str> {
        match self {
            GiftItem::MediumPouch => Some("pochon-moyen"),
            GiftItem::SlimPapers => Some("feuilles-slim"),
            GiftItem::Lighter => Some("briquet-hsb"),
            GiftItem::ElasticBand => None,
        }
    }
}

/// Itemised contents of a gift bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GiftContents {
    /// Medium pouches
    pub medium_pouches: u32,

    /// Slim paper packs
    pub slim_papers: u32,

    /// Lighters
    pub lighters: u32,

    /// Elastic bands
    pub elastic_bands: u32,
}

impl GiftContents {
    /// Contents of `packs` gift packs: one of each item per pack.
    pub fn for_packs(packs: u32) -> Self {
        GiftContents {
            medium_pouches: packs,
            slim_papers: packs,
            lighters: packs,
            elastic_bands: packs,
        }
    }

    /// Quantity of a single item.
    pub fn quantity(&self, item: GiftItem) -> u32 {
        match item {
            GiftItem::MediumPouch => self.medium_pouches,
            GiftItem::SlimPapers => self.slim_papers,
            GiftItem::Lighter => self.lighters,
            GiftItem::ElasticBand => self.elastic_bands,
        }
    }

    /// Non-zero items with their quantities, in display order.
    pub fn items(&self) -> SmallVec<[(GiftItem, u32); 4]> {
        GiftItem::ALL
            .into_iter()
            .map(|item| (item, self.quantity(item)))
            .filter(|(_, quantity)| *quantity > 0)
            .collect()
    }
}

/// Bonus items earned by a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiftBundle {
    tier: GiftTier,
    pack_count: u32,
    contents: GiftContents,
}

impl GiftBundle {
    /// Presentation tier.
    pub fn tier(&self) -> GiftTier {
        self.tier
    }

    /// Number of packs earned.
    pub fn pack_count(&self) -> u32 {
        self.pack_count
    }

    /// Itemised contents.
    pub fn contents(&self) -> &GiftContents {
        &self.contents
    }

    /// Display label, e.g. `"2 Packs Initié"` or `"Kit Revendeur HSB (10 Packs)"`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GiftBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tier {
            GiftTier::Kit => write!(f, "Kit Revendeur HSB ({} Packs)", self.pack_count),
            GiftTier::Pack if self.pack_count > 1 => {
                write!(f, "{} Packs Initié", self.pack_count)
            }
            GiftTier::Pack => write!(f, "{} Pack Initié", self.pack_count),
        }
    }
}

/// Resolve the gifts earned by `weight` grams of flowers.
///
/// Returns `None` below 10g.
pub fn gifts_for(weight: Grams) -> Option<GiftBundle> {
    if weight < GIFT_PACK_STEP {
        return None;
    }

    let pack_count = weight
        .value()
        .checked_div(GIFT_PACK_STEP.value())?
        .floor()
        .to_u32()
        .unwrap_or(u32::MAX);

    let tier = if weight >= KIT_THRESHOLD {
        GiftTier::Kit
    } else {
        GiftTier::Pack
    };

    Some(GiftBundle {
        tier,
        pack_count,
        contents: GiftContents::for_packs(pack_count),
    })
}
