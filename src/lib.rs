//! Comptoir
//!
//! Comptoir is the pricing, promotion and cart engine behind a CBD flower and resin
//! shop: weight-tiered discounts, accessory bulk pricing, free gifts and samples,
//! and a persistent cart that keeps every derived total consistent.

pub mod accessories;
pub mod cart;
pub mod catalog;
pub mod discounts;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod receipt;
pub mod recommendations;
pub mod similarity;
pub mod storage;
pub mod weights;
