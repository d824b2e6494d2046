//! Fixtures shared by the unit tests.

use std::collections::BTreeMap;

use crate::catalog::{Product, RawEmiPlan, RawProduct, RawVariant};

pub(crate) fn variant(id: &str, price: i64, original_price: i64) -> RawVariant {
    RawVariant {
        id: id.to_string(),
        name: format!("Variant {id}"),
        storage: Some("128GB".to_string()),
        color: "Black".to_string(),
        color_code: "#111111".to_string(),
        price,
        original_price,
        image: format!("https://cdn.example.com/{id}.png"),
        in_stock: true,
    }
}

pub(crate) fn plan(id: &str, monthly_amount: i64, tenure: i64, interest_rate: f64) -> RawEmiPlan {
    RawEmiPlan {
        id: id.to_string(),
        monthly_amount,
        tenure,
        interest_rate,
        cashback: None,
        processing_fee: None,
    }
}

/// Two variants and two plans: 2000 x 6 at 14%, then 1200 x 12 at 0%.
pub(crate) fn raw_product(slug: &str) -> RawProduct {
    let mut no_cost = plan("p12", 1200, 12, 0.0);
    no_cost.cashback = Some(1500);

    let mut specifications = BTreeMap::new();
    specifications.insert("Display".to_string(), "6.1 inch OLED".to_string());
    specifications.insert("Battery".to_string(), "4000 mAh".to_string());

    RawProduct {
        document_id: None,
        id: Some(format!("id-{slug}")),
        name: "Phone A".to_string(),
        slug: slug.to_string(),
        brand: "Acme".to_string(),
        category: "smartphones".to_string(),
        description: "A dependable phone".to_string(),
        specifications,
        variants: vec![variant("v1", 69999, 79999), variant("v2", 74999, 84999)],
        emi_plans: vec![plan("p6", 2000, 6, 14.0), no_cost],
        rating: 4.6,
        review_count: 321,
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn product(slug: &str) -> Product {
    match Product::try_from(raw_product(slug)) {
        Ok(product) => product,
        Err(e) => panic!("fixture product is invalid: {e}"),
    }
}
