//! Product listing: catalog queries, category filter and product cards.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceResult;
use crate::ids::Slug;
use crate::money::Money;
use crate::pricing;

/// Number of colour swatches shown on a card before "+N more".
pub const DEFAULT_SWATCH_PREVIEW: usize = 3;

/// Filter parameters for a product listing request.
///
/// Only the parameters that are set are sent upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub limit: Option<u32>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query string pairs in a stable order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(brand) = &self.brand {
            params.push(("brand", brand.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Category chosen on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Filter options offered by the listing page, as `(value, label)`.
    pub const OPTIONS: &'static [(&'static str, &'static str)] =
        &[("all", "All Products"), ("smartphones", "Smartphones")];

    pub fn from_value(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(c) => c,
        }
    }

    /// Heading label; unknown categories are shown as their raw value.
    pub fn label(&self) -> &str {
        let value = self.value();
        Self::OPTIONS
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, label)| *label)
            .unwrap_or(value)
    }

    /// `All` sends no category parameter.
    pub fn to_query(&self) -> ProductQuery {
        match self {
            CategoryFilter::All => ProductQuery::new(),
            CategoryFilter::Category(c) => ProductQuery::new().with_category(c.clone()),
        }
    }
}

/// A colour swatch on a product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub color: String,
    pub color_code: String,
}

/// Summary of a product for the listing grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub slug: Slug,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub price: Money,
    pub original_price: Money,
    pub swatches: Vec<Swatch>,
    /// Variants beyond the swatch preview.
    pub more_variants: usize,
    pub lowest_emi: Money,
    pub emi_option_count: usize,
    pub rating: f64,
    /// Whole stars out of five.
    pub filled_stars: u8,
    pub review_count: u64,
    pub variant_count: usize,
}

impl ProductCard {
    /// Summarize a product; the default variant supplies image and price.
    pub fn from_product(product: &Product, swatch_preview: usize) -> CommerceResult<Self> {
        let default_variant = product.default_variant();
        let variants = product.variants();

        Ok(Self {
            slug: product.slug().clone(),
            name: product.name().to_string(),
            brand: product.brand().to_string(),
            image: default_variant.image().to_string(),
            price: default_variant.price(),
            original_price: default_variant.original_price(),
            swatches: variants
                .iter()
                .take(swatch_preview)
                .map(|v| Swatch {
                    color: v.color().to_string(),
                    color_code: v.color_code().to_string(),
                })
                .collect(),
            more_variants: variants.len().saturating_sub(swatch_preview),
            lowest_emi: pricing::lowest_monthly_amount(product)?,
            emi_option_count: product.emi_plans().len(),
            rating: product.rating(),
            filled_stars: product.rating().floor() as u8,
            review_count: product.review_count(),
            variant_count: variants.len(),
        })
    }

    /// "EMI starts from ₹X/month".
    pub fn emi_teaser(&self) -> String {
        format!("EMI starts from {}/month", self.lowest_emi)
    }

    /// "+N more" when some variants are not previewed.
    pub fn more_label(&self) -> Option<String> {
        (self.more_variants > 0).then(|| format!("+{} more", self.more_variants))
    }

    /// Five-character star bar, e.g. "★★★★☆".
    pub fn stars(&self) -> String {
        let filled = usize::from(self.filled_stars.min(5));
        format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(5 - filled))
    }
}

/// Build cards for a whole listing.
pub fn product_cards(products: &[Product], swatch_preview: usize) -> CommerceResult<Vec<ProductCard>> {
    products
        .iter()
        .map(|p| ProductCard::from_product(p, swatch_preview))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{product, raw_product, variant};

    #[test]
    fn test_query_params_only_include_set_fields() {
        assert!(ProductQuery::new().to_params().is_empty());

        let query = ProductQuery::new().with_category("smartphones").with_limit(12);
        assert_eq!(
            query.to_params(),
            vec![("category", "smartphones".to_string()), ("limit", "12".to_string())]
        );
    }

    #[test]
    fn test_category_filter() {
        assert_eq!(CategoryFilter::from_value("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.to_query(), ProductQuery::new());

        let phones = CategoryFilter::from_value("smartphones");
        assert_eq!(phones.label(), "Smartphones");
        assert_eq!(phones.to_query().category.as_deref(), Some("smartphones"));
        assert_eq!(CategoryFilter::from_value("tablets").label(), "tablets");
    }

    #[test]
    fn test_card_from_product() {
        let card = ProductCard::from_product(&product("phone-a"), DEFAULT_SWATCH_PREVIEW).unwrap();
        assert_eq!(card.price, Money::new(69999));
        assert_eq!(card.original_price, Money::new(79999));
        assert_eq!(card.lowest_emi, Money::new(1200));
        assert_eq!(card.emi_teaser(), "EMI starts from \u{20b9}1,200/month");
        assert_eq!(card.emi_option_count, 2);
        assert_eq!(card.filled_stars, 4);
        assert_eq!(card.stars(), "\u{2605}\u{2605}\u{2605}\u{2605}\u{2606}");
        assert_eq!(card.swatches.len(), 2);
        assert_eq!(card.more_label(), None);
    }

    #[test]
    fn test_card_swatch_overflow() {
        let mut raw = raw_product("phone-a");
        raw.variants = (0..5).map(|i| variant(&format!("v{i}"), 100, 100)).collect();
        let product = crate::catalog::Product::try_from(raw).unwrap();

        let card = ProductCard::from_product(&product, DEFAULT_SWATCH_PREVIEW).unwrap();
        assert_eq!(card.swatches.len(), 3);
        assert_eq!(card.more_label().as_deref(), Some("+2 more"));
        assert_eq!(card.variant_count, 5);
    }
}
