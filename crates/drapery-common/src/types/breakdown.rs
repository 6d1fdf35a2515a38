//! Itemized cost of one line item

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-component currency amounts for one line item
///
/// Components are per unit; `total` is their sum times the item quantity.
/// Amounts serialize as JSON numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub fabric: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sheer: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub lining: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub front_motor: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub back_motor: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub accessories: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub stitching: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fixing: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl CostBreakdown {
    /// All-zero breakdown, used for rows with no resolvable template
    pub fn zero() -> Self {
        Self::default()
    }

    /// Sum of the eight components, before quantity scaling, saturating at
    /// `Decimal::MAX`
    pub fn per_unit_sum(&self) -> Decimal {
        self.components()
            .iter()
            .fold(Decimal::ZERO, |sum, (_, amount)| sum.saturating_add(*amount))
    }

    /// Labelled components in display order
    pub fn components(&self) -> [(&'static str, Decimal); 8] {
        [
            ("fabric", self.fabric),
            ("sheer", self.sheer),
            ("lining", self.lining),
            ("frontMotor", self.front_motor),
            ("backMotor", self.back_motor),
            ("accessories", self.accessories),
            ("stitching", self.stitching),
            ("fixing", self.fixing),
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.total.is_zero() && self.per_unit_sum().is_zero()
    }
}
