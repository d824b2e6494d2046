//! Catalog, EMI pricing and selection logic for the EMI storefront.
//!
//! - **Catalog**: validated products, variants and EMI plans
//! - **Pricing**: lowest EMI, total payable, no-cost EMI, cashback
//! - **Selection**: the variant/plan state machine behind the detail page
//! - **Listing / Detail**: display summaries for the two storefront pages
//!
//! # Example
//!
//! ```rust,ignore
//! use emistore_commerce::prelude::*;
//!
//! let product: Product = serde_json::from_str(payload)?; // validated
//! let mut selection = Selection::new();
//! selection.load(product);
//! selection.select_plan(&PlanId::new("plan-12m"))?;
//!
//! let intent = selection.proceed()?;
//! println!("{}", intent.summary());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod detail;
pub mod listing;
pub mod pricing;
pub mod selection;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{CommerceError, CommerceResult};
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, CommerceResult};
    pub use crate::ids::*;
    pub use crate::money::Money;

    pub use crate::catalog::{EmiPlan, Product, ProductVariant, RawEmiPlan, RawProduct, RawVariant};
    pub use crate::detail::{PlanOption, ProductDetail, VariantOption};
    pub use crate::listing::{CategoryFilter, ProductCard, ProductQuery, DEFAULT_SWATCH_PREVIEW};
    pub use crate::pricing::{
        effective_cashback, is_no_cost_emi, lowest_monthly_amount, total_payable, PlanPricing,
    };
    pub use crate::selection::{CheckoutIntent, LoadedSelection, Selection};
    pub use crate::view::{PageState, RequestTicket, RequestTracker};
}
