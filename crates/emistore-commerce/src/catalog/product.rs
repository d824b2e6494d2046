//! Validated product, variant and EMI plan types.
//!
//! Fields are private: the only way to obtain these values is through
//! [`Product::try_from`] (or deserialization, which runs the same checks),
//! so every `Product` in the program satisfies the catalog invariants.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::wire::{RawEmiPlan, RawProduct, RawVariant};
use crate::error::{CommerceError, CommerceResult};
use crate::ids::{PlanId, ProductId, Slug, VariantId};
use crate::money::Money;

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVariant {
    id: VariantId,
    name: String,
    storage: Option<String>,
    color: String,
    color_code: String,
    price: Money,
    original_price: Money,
    image: String,
    in_stock: bool,
}

impl ProductVariant {
    pub fn id(&self) -> &VariantId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn storage(&self) -> Option<&str> {
        self.storage.as_deref()
    }

    /// Display name of the colour.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Swatch value for the colour (e.g. "#1f1f1f").
    pub fn color_code(&self) -> &str {
        &self.color_code
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Strike-through price; never lower than [`price`](Self::price).
    pub fn original_price(&self) -> Money {
        self.original_price
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    fn validate(slug: &Slug, raw: RawVariant) -> CommerceResult<Self> {
        if raw.id.is_empty() {
            return Err(CommerceError::malformed_for(slug, "variant with empty id"));
        }
        let what = format!("variant {}", raw.id);
        let price = amount(slug, &what, "price", raw.price)?;
        let original_price = amount(slug, &what, "originalPrice", raw.original_price)?;
        if price > original_price {
            return Err(CommerceError::malformed_for(
                slug,
                format!("{what}: price {price} exceeds originalPrice {original_price}"),
            ));
        }

        Ok(Self {
            id: VariantId::new(raw.id),
            name: raw.name,
            storage: raw.storage,
            color: raw.color,
            color_code: raw.color_code,
            price,
            original_price,
            image: raw.image,
            in_stock: raw.in_stock,
        })
    }

    fn into_raw(self) -> RawVariant {
        RawVariant {
            id: self.id.into_inner(),
            name: self.name,
            storage: self.storage,
            color: self.color,
            color_code: self.color_code,
            price: self.price.amount() as i64,
            original_price: self.original_price.amount() as i64,
            image: self.image,
            in_stock: self.in_stock,
        }
    }
}

/// An EMI plan offered for a product.
#[derive(Debug, Clone, PartialEq)]
pub struct EmiPlan {
    id: PlanId,
    monthly_amount: Money,
    tenure: u32,
    interest_rate: f64,
    cashback: Option<Money>,
    processing_fee: Option<Money>,
}

impl EmiPlan {
    pub fn id(&self) -> &PlanId {
        &self.id
    }

    /// Instalment paid each month.
    pub fn monthly_amount(&self) -> Money {
        self.monthly_amount
    }

    /// Number of monthly instalments.
    pub fn tenure(&self) -> u32 {
        self.tenure
    }

    /// Annual interest rate in percent.
    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn cashback(&self) -> Option<Money> {
        self.cashback
    }

    pub fn processing_fee(&self) -> Option<Money> {
        self.processing_fee
    }

    fn validate(slug: &Slug, raw: RawEmiPlan) -> CommerceResult<Self> {
        if raw.id.is_empty() {
            return Err(CommerceError::malformed_for(slug, "EMI plan with empty id"));
        }
        let what = format!("plan {}", raw.id);
        let monthly_amount = amount(slug, &what, "monthlyAmount", raw.monthly_amount)?;
        if monthly_amount.is_zero() {
            return Err(CommerceError::malformed_for(
                slug,
                format!("{what}: monthlyAmount must be positive"),
            ));
        }
        let tenure = u32::try_from(raw.tenure)
            .ok()
            .filter(|t| *t > 0)
            .ok_or_else(|| {
                CommerceError::malformed_for(
                    slug,
                    format!("{what}: tenure must be a positive month count, got {}", raw.tenure),
                )
            })?;
        if !raw.interest_rate.is_finite() || raw.interest_rate < 0.0 {
            return Err(CommerceError::malformed_for(
                slug,
                format!("{what}: interestRate must be non-negative, got {}", raw.interest_rate),
            ));
        }
        let cashback = raw
            .cashback
            .map(|v| amount(slug, &what, "cashback", v))
            .transpose()?;
        let processing_fee = raw
            .processing_fee
            .map(|v| amount(slug, &what, "processingFee", v))
            .transpose()?;

        Ok(Self {
            id: PlanId::new(raw.id),
            monthly_amount,
            tenure,
            interest_rate: raw.interest_rate,
            cashback,
            processing_fee,
        })
    }

    fn into_raw(self) -> RawEmiPlan {
        RawEmiPlan {
            id: self.id.into_inner(),
            monthly_amount: self.monthly_amount.amount() as i64,
            tenure: i64::from(self.tenure),
            interest_rate: self.interest_rate,
            cashback: self.cashback.map(|m| m.amount() as i64),
            processing_fee: self.processing_fee.map(|m| m.amount() as i64),
        }
    }
}

/// A validated catalog product.
///
/// `variants` and `emi_plans` are non-empty and keep the catalog's display
/// order; the first entry of each is the default selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProduct", into = "RawProduct")]
pub struct Product {
    id: ProductId,
    slug: Slug,
    name: String,
    brand: String,
    category: String,
    description: String,
    specifications: BTreeMap<String, String>,
    variants: Vec<ProductVariant>,
    emi_plans: Vec<EmiPlan>,
    rating: f64,
    review_count: u64,
    is_active: bool,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl Product {
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn specifications(&self) -> &BTreeMap<String, String> {
        &self.specifications
    }

    pub fn variants(&self) -> &[ProductVariant] {
        &self.variants
    }

    pub fn emi_plans(&self) -> &[EmiPlan] {
        &self.emi_plans
    }

    /// Rating between 0 and [`MAX_RATING`].
    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn review_count(&self) -> u64 {
        self.review_count
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    /// The variant shown before the customer picks one.
    pub fn default_variant(&self) -> &ProductVariant {
        &self.variants[0]
    }

    /// The plan shown before the customer picks one.
    pub fn default_plan(&self) -> &EmiPlan {
        &self.emi_plans[0]
    }

    pub fn variant(&self, id: &VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id() == id)
    }

    pub fn plan(&self, id: &PlanId) -> Option<&EmiPlan> {
        self.emi_plans.iter().find(|p| p.id() == id)
    }

    pub fn has_variant(&self, id: &VariantId) -> bool {
        self.variant(id).is_some()
    }

    pub fn has_plan(&self, id: &PlanId) -> bool {
        self.plan(id).is_some()
    }
}

impl TryFrom<RawProduct> for Product {
    type Error = CommerceError;

    fn try_from(raw: RawProduct) -> CommerceResult<Self> {
        let slug = Slug::new(raw.slug);
        if !slug.is_url_safe() {
            return Err(CommerceError::malformed_for(&slug, "slug is empty or not URL-safe"));
        }

        let id = raw
            .id
            .or(raw.document_id)
            .filter(|id| !id.is_empty())
            .map(ProductId::new)
            .ok_or_else(|| CommerceError::malformed_for(&slug, "missing product id"))?;

        if !raw.rating.is_finite() || !(0.0..=MAX_RATING).contains(&raw.rating) {
            return Err(CommerceError::malformed_for(
                &slug,
                format!("rating {} outside 0-{}", raw.rating, MAX_RATING),
            ));
        }
        let review_count = u64::try_from(raw.review_count).map_err(|_| {
            CommerceError::malformed_for(&slug, format!("negative reviewCount {}", raw.review_count))
        })?;

        let variants = validate_variants(&slug, raw.variants)?;
        let emi_plans = validate_plans(&slug, raw.emi_plans)?;

        Ok(Self {
            id,
            slug,
            name: raw.name,
            brand: raw.brand,
            category: raw.category,
            description: raw.description,
            specifications: raw.specifications,
            variants,
            emi_plans,
            rating: raw.rating,
            review_count,
            is_active: raw.is_active,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

impl From<Product> for RawProduct {
    fn from(product: Product) -> Self {
        RawProduct {
            document_id: None,
            id: Some(product.id.into_inner()),
            name: product.name,
            slug: product.slug.into_inner(),
            brand: product.brand,
            category: product.category,
            description: product.description,
            specifications: product.specifications,
            variants: product.variants.into_iter().map(ProductVariant::into_raw).collect(),
            emi_plans: product.emi_plans.into_iter().map(EmiPlan::into_raw).collect(),
            rating: product.rating,
            review_count: product.review_count as i64,
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Validate a variant sequence: non-empty, unique ids, sane amounts.
pub fn validate_variants(slug: &Slug, raw: Vec<RawVariant>) -> CommerceResult<Vec<ProductVariant>> {
    if raw.is_empty() {
        return Err(CommerceError::malformed_for(slug, "no variants"));
    }
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|v| {
            if !seen.insert(v.id.clone()) {
                return Err(CommerceError::malformed_for(
                    slug,
                    format!("duplicate variant id {}", v.id),
                ));
            }
            ProductVariant::validate(slug, v)
        })
        .collect()
}

/// Validate an EMI plan sequence: non-empty, unique ids, sane amounts.
pub fn validate_plans(slug: &Slug, raw: Vec<RawEmiPlan>) -> CommerceResult<Vec<EmiPlan>> {
    if raw.is_empty() {
        return Err(CommerceError::malformed_for(slug, "no EMI plans"));
    }
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|p| {
            if !seen.insert(p.id.clone()) {
                return Err(CommerceError::malformed_for(
                    slug,
                    format!("duplicate plan id {}", p.id),
                ));
            }
            EmiPlan::validate(slug, p)
        })
        .collect()
}

// Amounts are bounded to 32 bits so `monthly_amount * tenure` cannot overflow u64.
fn amount(slug: &Slug, what: &str, field: &str, value: i64) -> CommerceResult<Money> {
    u32::try_from(value).map(Money::from).map_err(|_| {
        let reason = if value < 0 {
            format!("{what}: negative {field} {value}")
        } else {
            format!("{what}: {field} {value} out of range")
        };
        CommerceError::malformed_for(slug, reason)
    })
}
