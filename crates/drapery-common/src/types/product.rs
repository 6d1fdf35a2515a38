//! Products - priced materials and components
//!
//! A product is anything that can be selected into a line item slot:
//! curtain fabric, sheer, blackout lining, blinds, motors, or accessories.
//! Prices are per the product's [`ProductUnit`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::NONE_ID;

/// Product classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    /// Curtain fabric for the front layer
    Fabric,
    /// Sheer for the back layer
    Sheer,
    /// Blackout or dimout lining
    Blackout,
    /// Curtain motor
    Motor,
    /// Roller, roman, or venetian blinds (always priced by area)
    Blinds,
    /// Rods, tapes, tie-backs, and other hardware
    Accessory,
}

impl ProductCategory {
    /// Categories that are cut into panels and carry a fabric width
    pub fn is_textile(&self) -> bool {
        matches!(
            self,
            ProductCategory::Fabric | ProductCategory::Sheer | ProductCategory::Blackout
        )
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductCategory::Fabric => write!(f, "Fabric"),
            ProductCategory::Sheer => write!(f, "Sheer"),
            ProductCategory::Blackout => write!(f, "Blackout"),
            ProductCategory::Motor => write!(f, "Motor"),
            ProductCategory::Blinds => write!(f, "Blinds"),
            ProductCategory::Accessory => write!(f, "Accessory"),
        }
    }
}

/// Unit the product price is quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductUnit {
    #[serde(rename = "per-meter")]
    PerMeter,
    #[serde(rename = "per-sq-meter", alias = "per-square-meter")]
    PerSquareMeter,
    #[serde(rename = "per-item")]
    PerItem,
}

/// A priced material or component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog key
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// List price per unit
    pub price: Decimal,

    /// Promotional price, used instead of `price` when positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,

    pub category: ProductCategory,

    pub unit: ProductUnit,

    /// Roll width in meters, for per-meter textiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_width: Option<Decimal>,
}

impl Product {
    /// Create a product with no discount and no fabric width
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        category: ProductCategory,
        unit: ProductUnit,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            discount_price: None,
            category,
            unit,
            fabric_width: None,
        }
    }

    /// Set the promotional price
    pub fn with_discount_price(mut self, price: Decimal) -> Self {
        self.discount_price = Some(price);
        self
    }

    /// Set the roll width in meters
    pub fn with_fabric_width(mut self, width: Decimal) -> Self {
        self.fabric_width = Some(width);
        self
    }

    /// Price actually charged per unit
    ///
    /// The discount price wins only when present and strictly positive.
    pub fn effective_price(&self) -> Decimal {
        match self.discount_price {
            Some(discount) if discount > Decimal::ZERO => discount,
            _ => self.price,
        }
    }

    /// Roll width, falling back to `default` when absent or non-positive
    pub fn fabric_width_or(&self, default: Decimal) -> Decimal {
        self.fabric_width
            .filter(|w| *w > Decimal::ZERO)
            .unwrap_or(default)
    }

    /// Whether this is the "nothing selected" placeholder row
    pub fn is_sentinel(&self) -> bool {
        self.id == NONE_ID
    }
}
