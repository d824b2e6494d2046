//! Variant and EMI plan selection state machine.
//!
//! One `Selection` belongs to one product view. It is either empty or holds
//! the loaded product together with the chosen variant and plan ids, which
//! always reference entries of that product.

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{EmiPlan, Product, ProductVariant, RawProduct};
use crate::error::{CommerceError, CommerceResult};
use crate::ids::{PlanId, Slug, VariantId};
use crate::money::Money;
use crate::pricing;

/// Selection state of a product view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// No product loaded.
    #[default]
    Empty,
    /// A product is loaded with a current variant and plan.
    Loaded(LoadedSelection),
}

/// The loaded product and the ids currently chosen in it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSelection {
    product: Product,
    variant_id: VariantId,
    plan_id: PlanId,
}

impl LoadedSelection {
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn variant_id(&self) -> &VariantId {
        &self.variant_id
    }

    pub fn plan_id(&self) -> &PlanId {
        &self.plan_id
    }

    /// The chosen variant.
    ///
    /// `variant_id` is only ever set to an id the product contains, so the
    /// lookup always succeeds.
    pub fn variant(&self) -> &ProductVariant {
        self.product
            .variant(&self.variant_id)
            .unwrap_or_else(|| self.product.default_variant())
    }

    /// The chosen plan. `plan_id` always names one of the product's plans.
    pub fn plan(&self) -> &EmiPlan {
        self.product
            .plan(&self.plan_id)
            .unwrap_or_else(|| self.product.default_plan())
    }

    fn is_valid(&self) -> bool {
        self.product.has_variant(&self.variant_id) && self.product.has_plan(&self.plan_id)
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::Empty
    }

    /// Load a product, resetting the selection to its first variant and plan.
    ///
    /// Any previous choice is discarded, even when the same slug is reloaded.
    pub fn load(&mut self, product: Product) {
        let variant_id = product.default_variant().id().clone();
        let plan_id = product.default_plan().id().clone();
        debug!(
            slug = %product.slug(),
            variant = %variant_id,
            plan = %plan_id,
            "selection loaded"
        );
        *self = Selection::Loaded(LoadedSelection {
            product,
            variant_id,
            plan_id,
        });
    }

    /// Validate a raw catalog payload and load it.
    ///
    /// On validation failure the current state is left untouched.
    pub fn load_raw(&mut self, raw: RawProduct) -> CommerceResult<()> {
        let product = Product::try_from(raw).inspect_err(|e| {
            warn!(error = %e, "rejected product payload");
        })?;
        self.load(product);
        Ok(())
    }

    /// Choose a variant of the loaded product. The plan is left unchanged.
    pub fn select_variant(&mut self, id: &VariantId) -> CommerceResult<()> {
        let loaded = self.loaded_mut()?;
        if !loaded.product.has_variant(id) {
            warn!(slug = %loaded.product.slug(), variant = %id, "unknown variant");
            return Err(CommerceError::UnknownVariant(id.clone()));
        }
        debug!(slug = %loaded.product.slug(), variant = %id, "variant selected");
        loaded.variant_id = id.clone();
        Ok(())
    }

    /// Choose a plan of the loaded product. The variant is left unchanged.
    pub fn select_plan(&mut self, id: &PlanId) -> CommerceResult<()> {
        let loaded = self.loaded_mut()?;
        if !loaded.product.has_plan(id) {
            warn!(slug = %loaded.product.slug(), plan = %id, "unknown EMI plan");
            return Err(CommerceError::UnknownPlan(id.clone()));
        }
        debug!(slug = %loaded.product.slug(), plan = %id, "plan selected");
        loaded.plan_id = id.clone();
        Ok(())
    }

    /// Whether checkout may be initiated: both ids set and present in the product.
    pub fn can_proceed(&self) -> bool {
        match self {
            Selection::Empty => false,
            Selection::Loaded(loaded) => loaded.is_valid(),
        }
    }

    /// Drop the loaded product.
    pub fn reset(&mut self) {
        if let Selection::Loaded(loaded) = self {
            debug!(slug = %loaded.product.slug(), "selection reset");
        }
        *self = Selection::Empty;
    }

    /// Build the checkout intent for the current choice.
    pub fn proceed(&self) -> CommerceResult<CheckoutIntent> {
        let loaded = self.loaded()?;
        if !loaded.is_valid() {
            return Err(CommerceError::NoProductLoaded);
        }
        Ok(CheckoutIntent::new(&loaded.product, loaded.variant(), loaded.plan()))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Selection::Loaded(_))
    }

    pub fn loaded(&self) -> CommerceResult<&LoadedSelection> {
        match self {
            Selection::Loaded(loaded) => Ok(loaded),
            Selection::Empty => Err(CommerceError::NoProductLoaded),
        }
    }

    fn loaded_mut(&mut self) -> CommerceResult<&mut LoadedSelection> {
        match self {
            Selection::Loaded(loaded) => Ok(loaded),
            Selection::Empty => {
                warn!("selection change without a loaded product");
                Err(CommerceError::NoProductLoaded)
            }
        }
    }

    pub fn product(&self) -> Option<&Product> {
        self.loaded().ok().map(LoadedSelection::product)
    }

    pub fn selected_variant_id(&self) -> Option<&VariantId> {
        self.loaded().ok().map(LoadedSelection::variant_id)
    }

    pub fn selected_plan_id(&self) -> Option<&PlanId> {
        self.loaded().ok().map(LoadedSelection::plan_id)
    }

    pub fn selected_variant(&self) -> Option<&ProductVariant> {
        self.loaded().ok().map(LoadedSelection::variant)
    }

    pub fn selected_plan(&self) -> Option<&EmiPlan> {
        self.loaded().ok().map(LoadedSelection::plan)
    }
}

/// What the Buy action hands to checkout. No transaction is performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutIntent {
    pub slug: Slug,
    pub variant_id: VariantId,
    pub variant_name: String,
    pub plan_id: PlanId,
    pub monthly_amount: Money,
    pub tenure: u32,
    pub total_payable: Money,
}

impl CheckoutIntent {
    fn new(product: &Product, variant: &ProductVariant, plan: &EmiPlan) -> Self {
        Self {
            slug: product.slug().clone(),
            variant_id: variant.id().clone(),
            variant_name: variant.name().to_string(),
            plan_id: plan.id().clone(),
            monthly_amount: plan.monthly_amount(),
            tenure: plan.tenure(),
            total_payable: pricing::total_payable(plan),
        }
    }

    /// Human-readable confirmation text.
    pub fn summary(&self) -> String {
        format!(
            "Proceeding with:\n{}\nEMI: {} \u{00d7} {} months",
            self.variant_name, self.monthly_amount, self.tenure
        )
    }
}
