//! Domain error types.

use crate::ids::{PlanId, Slug, VariantId};
use thiserror::Error;

/// Errors raised by the catalog domain, pricing and selection logic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Upstream product data failed validation.
    #[error("Malformed product {slug}: {reason}")]
    MalformedProduct { slug: String, reason: String },

    /// A plan set was empty where at least one plan is required.
    #[error("Product has no EMI plans")]
    EmptyPlanSet,

    /// The requested variant is not part of the loaded product.
    #[error("Unknown variant: {0}")]
    UnknownVariant(VariantId),

    /// The requested plan is not part of the loaded product.
    #[error("Unknown EMI plan: {0}")]
    UnknownPlan(PlanId),

    /// A selection operation was attempted before any product was loaded.
    #[error("No product loaded")]
    NoProductLoaded,
}

impl CommerceError {
    pub fn malformed(slug: impl Into<String>, reason: impl Into<String>) -> Self {
        CommerceError::MalformedProduct {
            slug: slug.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_for(slug: &Slug, reason: impl Into<String>) -> Self {
        Self::malformed(slug.as_str(), reason)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, CommerceError::MalformedProduct { .. })
    }
}

/// Result alias for domain operations.
pub type CommerceResult<T> = Result<T, CommerceError>;
