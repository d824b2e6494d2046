//! Money type for rupee amounts.
//!
//! Catalog prices and EMI amounts are whole rupees, so the amount is a plain
//! unsigned integer and every derived value is exact integer arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Currency symbol used by the storefront.
pub const RUPEE_SYMBOL: &str = "\u{20b9}";

/// A whole-rupee amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// The amount in whole rupees.
    pub const fn amount(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtract, returning `None` if the result would be negative.
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    pub fn checked_mul(&self, factor: u64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Format with the rupee symbol and Indian digit grouping (e.g. "₹1,23,456").
    pub fn display(&self) -> String {
        format!("{}{}", RUPEE_SYMBOL, self.display_amount())
    }

    /// Format without the symbol (e.g. "1,23,456").
    pub fn display_amount(&self) -> String {
        group_indian(self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl From<u32> for Money {
    fn from(amount: u32) -> Self {
        Money(u64::from(amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Group digits as lakh/crore: last three digits, then pairs.
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
