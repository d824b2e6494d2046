//! Catalog payloads as the upstream service sends them.
//!
//! These types mirror the JSON exactly and carry no guarantees: numbers are
//! signed so negative values can be detected, and ids may repeat. They only
//! become [`Product`](super::Product) values through validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A variant as received from the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    pub color: String,
    pub color_code: String,
    pub price: i64,
    pub original_price: i64,
    pub image: String,
    pub in_stock: bool,
}

/// An EMI plan as received from the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEmiPlan {
    pub id: String,
    pub monthly_amount: i64,
    pub tenure: i64,
    pub interest_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_fee: Option<i64>,
}

/// A product as received from the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Storage document id; used as the internal id when `id` is absent.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub specifications: BTreeMap<String, String>,
    pub variants: Vec<RawVariant>,
    pub emi_plans: Vec<RawEmiPlan>,
    pub rating: f64,
    pub review_count: i64,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
