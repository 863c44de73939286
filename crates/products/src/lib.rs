//! Products domain module.
//!
//! This crate contains the product variants and their stock rules, implemented
//! purely as deterministic domain logic (no IO, no storage).

pub mod price;
pub mod product;

pub use price::UnitPrice;
pub use product::{
    Clothing, Electronics, Grocery, Product, ProductKind, ProductType, Stockable, today,
};
