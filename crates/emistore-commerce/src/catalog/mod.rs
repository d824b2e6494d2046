//! Product catalog module.
//!
//! Contains the wire payloads received from the catalog API and the
//! validated product, variant and EMI plan types built from them.

mod product;
mod wire;

pub use product::{
    validate_plans, validate_variants, EmiPlan, Product, ProductVariant, MAX_RATING,
};
pub use wire::{RawEmiPlan, RawProduct, RawVariant};
