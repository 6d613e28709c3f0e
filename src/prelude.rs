//! Comptoir prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    accessories::{Accessory, AccessoryCategory, AccessoryKey, PouchSize},
    cart::{
        AccessoryLine, AccessoryLineQuote, Cart, CartChange, CartError, CartObserver, CartSummary,
        FlowerLine, FlowerLineQuote, NoopObserver, SampleLine,
    },
    catalog::{Catalog, CatalogError, CatalogQuery, SortOrder},
    discounts::DiscountError,
    pricing::{
        AccessoryQuote, PRESET_WEIGHTS, WeightQuote, WeightTier, accessory_price_for,
        discount_label, price_for, tier_for,
    },
    products::{Product, ProductCategory, ProductKey, TerpeneProfile},
    promotions::{
        GiftBundle, GiftContents, GiftItem, GiftTier, SampleStatus, gifts_for, sample_allowance,
    },
    receipt::{Receipt, ReceiptError},
    recommendations::{Intention, Taste, recommend},
    similarity::similar_products,
    storage::{AgeGate, FileStore, KeyValueStore, MemoryStore, StorageError},
    weights::Grams,
};
