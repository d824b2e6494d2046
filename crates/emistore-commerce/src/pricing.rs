//! EMI pricing calculations.
//!
//! Pure functions over validated catalog values. All arithmetic is on whole
//! rupees, so results are exact.

use serde::Serialize;

use crate::catalog::{EmiPlan, Product, ProductVariant};
use crate::error::{CommerceError, CommerceResult};
use crate::money::Money;

/// Lowest monthly instalment across a product's plans.
///
/// Ties are not resolved here; only the amount is returned.
pub fn lowest_monthly_amount(product: &Product) -> CommerceResult<Money> {
    lowest_monthly_amount_of(product.emi_plans())
}

/// Lowest monthly instalment across an arbitrary plan slice.
pub fn lowest_monthly_amount_of(plans: &[EmiPlan]) -> CommerceResult<Money> {
    plans
        .iter()
        .map(EmiPlan::monthly_amount)
        .min()
        .ok_or(CommerceError::EmptyPlanSet)
}

/// Total paid over the plan's tenure (`monthly_amount * tenure`).
pub fn total_payable(plan: &EmiPlan) -> Money {
    // Validated amounts and tenures fit in 32 bits, so the product fits in 64.
    Money::new(plan.monthly_amount().amount() * u64::from(plan.tenure()))
}

/// A plan is "No Cost EMI" when it carries no interest.
pub fn is_no_cost_emi(plan: &EmiPlan) -> bool {
    plan.interest_rate() == 0.0
}

/// Cashback credited for the plan, zero when none is offered.
pub fn effective_cashback(plan: &EmiPlan) -> Money {
    plan.cashback().unwrap_or_default()
}

/// Whether a cashback badge should be shown (absent or zero is not advertised).
pub fn has_cashback(plan: &EmiPlan) -> bool {
    effective_cashback(plan).is_positive()
}

/// Whether a processing fee line should be shown.
pub fn has_processing_fee(plan: &EmiPlan) -> bool {
    plan.processing_fee().is_some_and(|fee| fee.is_positive())
}

/// "0% EMI" for no-cost plans, otherwise "<rate>% interest".
pub fn interest_label(plan: &EmiPlan) -> String {
    if is_no_cost_emi(plan) {
        "0% EMI".to_string()
    } else {
        format!("{}% interest", plan.interest_rate())
    }
}

/// "₹2,000 × 6 months".
pub fn plan_headline(plan: &EmiPlan) -> String {
    format!("{} \u{00d7} {} months", plan.monthly_amount(), plan.tenure())
}

/// Amount saved against the strike-through price.
pub fn savings(variant: &ProductVariant) -> Money {
    variant
        .original_price()
        .checked_sub(variant.price())
        .unwrap_or_default()
}

/// Whole-percent discount against the strike-through price, rounded down.
pub fn discount_percent(variant: &ProductVariant) -> u32 {
    let original = variant.original_price().amount();
    if original == 0 {
        return 0;
    }
    (savings(variant).amount() * 100 / original) as u32
}

/// Display-ready pricing of a single EMI plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanPricing {
    pub monthly_amount: Money,
    pub tenure: u32,
    pub total_payable: Money,
    pub no_cost: bool,
    pub interest_label: String,
    pub cashback: Option<Money>,
    pub processing_fee: Option<Money>,
}

impl PlanPricing {
    pub fn for_plan(plan: &EmiPlan) -> Self {
        Self {
            monthly_amount: plan.monthly_amount(),
            tenure: plan.tenure(),
            total_payable: total_payable(plan),
            no_cost: is_no_cost_emi(plan),
            interest_label: interest_label(plan),
            cashback: has_cashback(plan).then(|| effective_cashback(plan)),
            processing_fee: plan.processing_fee().filter(|fee| fee.is_positive()),
        }
    }

    pub fn headline(&self) -> String {
        format!("{} \u{00d7} {} months", self.monthly_amount, self.tenure)
    }

    /// Total payable net of cashback.
    pub fn net_payable(&self) -> Money {
        self.total_payable
            .checked_sub(self.cashback.unwrap_or_default())
            .unwrap_or_default()
    }
}
