//! Product detail page model.

use serde::Serialize;

use crate::ids::{PlanId, Slug, VariantId};
use crate::money::Money;
use crate::pricing::{self, PlanPricing};
use crate::selection::LoadedSelection;

/// A variant as offered on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantOption {
    pub id: VariantId,
    pub name: String,
    pub storage: Option<String>,
    pub color: String,
    pub color_code: String,
    pub price: Money,
    pub original_price: Money,
    pub discount_percent: u32,
    pub in_stock: bool,
    pub selected: bool,
}

/// An EMI plan as offered on the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanOption {
    pub id: PlanId,
    pub pricing: PlanPricing,
    pub selected: bool,
}

/// Everything the detail page shows for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub slug: Slug,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub rating: f64,
    pub review_count: u64,
    /// Sorted by attribute name.
    pub specifications: Vec<(String, String)>,
    pub image: String,
    pub variants: Vec<VariantOption>,
    pub plans: Vec<PlanOption>,
}

impl ProductDetail {
    pub fn from_selection(selection: &LoadedSelection) -> Self {
        let product = selection.product();

        let variants = product
            .variants()
            .iter()
            .map(|v| VariantOption {
                id: v.id().clone(),
                name: v.name().to_string(),
                storage: v.storage().map(str::to_string),
                color: v.color().to_string(),
                color_code: v.color_code().to_string(),
                price: v.price(),
                original_price: v.original_price(),
                discount_percent: pricing::discount_percent(v),
                in_stock: v.in_stock(),
                selected: v.id() == selection.variant_id(),
            })
            .collect();

        let plans = product
            .emi_plans()
            .iter()
            .map(|p| PlanOption {
                id: p.id().clone(),
                pricing: PlanPricing::for_plan(p),
                selected: p.id() == selection.plan_id(),
            })
            .collect();

        Self {
            slug: product.slug().clone(),
            name: product.name().to_string(),
            brand: product.brand().to_string(),
            description: product.description().to_string(),
            rating: product.rating(),
            review_count: product.review_count(),
            specifications: product
                .specifications()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            image: selection.variant().image().to_string(),
            variants,
            plans,
        }
    }

    pub fn selected_variant(&self) -> Option<&VariantOption> {
        self.variants.iter().find(|v| v.selected)
    }

    pub fn selected_plan(&self) -> Option<&PlanOption> {
        self.plans.iter().find(|p| p.selected)
    }
}
