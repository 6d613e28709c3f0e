//! Promotions
//!
//! Bonus items derived from the flower weight in a cart: gift packs every 10g and
//! one free 1g sample every 12g.

pub mod gifts;
pub mod samples;

pub use gifts::{GiftBundle, GiftContents, GiftItem, GiftTier, gifts_for};
pub use samples::{SampleStatus, evict_excess_samples, sample_allowance};
