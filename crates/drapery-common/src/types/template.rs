//! Templates - per-line-item calculation rules
//!
//! A template names a curtain style (eyelet, french pleat, roman blind, ...)
//! and carries the rules the pricing engine reads: the calculation type,
//! stitching charges per cut panel, the fixing charge per square meter, and
//! accessories that are always included. Fullness values and default
//! product ids only seed a line item when the template is selected.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::NONE_ID;

/// How the front layer is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationType {
    /// Linear fabric consumed: panels x cut length
    #[default]
    RunningMeter,
    /// Opening area
    SquareMeter,
}

/// A pricing and configuration ruleset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Front layer fullness seeded onto items
    #[serde(default)]
    pub fullness_front: Decimal,

    /// Back layer fullness seeded onto items
    #[serde(default)]
    pub fullness_back: Decimal,

    #[serde(default)]
    pub calculation_type: CalculationType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_fabric_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sheer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_lining_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_front_motor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_back_motor_id: Option<String>,

    /// Accessories priced on every item using this template
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_front_accessory_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_back_accessory_ids: Vec<String>,

    /// Currency per cut panel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stitching_price_per_panel_fabric: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stitching_price_per_panel_sheer: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stitching_price_per_panel_lining: Option<Decimal>,

    /// Installation charge per square meter of opening
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixing_price_per_sq_m: Option<Decimal>,
}

impl Template {
    /// Create a template with the given fullness and no extra charges
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        calculation_type: CalculationType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fullness_front: Decimal::ZERO,
            fullness_back: Decimal::ZERO,
            calculation_type,
            default_fabric_id: None,
            default_sheer_id: None,
            default_lining_id: None,
            default_front_motor_id: None,
            default_back_motor_id: None,
            default_front_accessory_ids: Vec::new(),
            default_back_accessory_ids: Vec::new(),
            stitching_price_per_panel_fabric: None,
            stitching_price_per_panel_sheer: None,
            stitching_price_per_panel_lining: None,
            fixing_price_per_sq_m: None,
        }
    }

    /// Set the fullness values seeded onto items
    pub fn with_fullness(mut self, front: Decimal, back: Decimal) -> Self {
        self.fullness_front = front;
        self.fullness_back = back;
        self
    }

    /// Set stitching charges per panel for the fabric, sheer, and lining layers
    pub fn with_stitching(
        mut self,
        fabric: Option<Decimal>,
        sheer: Option<Decimal>,
        lining: Option<Decimal>,
    ) -> Self {
        self.stitching_price_per_panel_fabric = fabric;
        self.stitching_price_per_panel_sheer = sheer;
        self.stitching_price_per_panel_lining = lining;
        self
    }

    /// Set the fixing charge per square meter
    pub fn with_fixing(mut self, price_per_sq_m: Decimal) -> Self {
        self.fixing_price_per_sq_m = Some(price_per_sq_m);
        self
    }

    /// Add a front accessory
    pub fn with_front_accessory(mut self, id: impl Into<String>) -> Self {
        self.default_front_accessory_ids.push(id.into());
        self
    }

    /// Add a back accessory
    pub fn with_back_accessory(mut self, id: impl Into<String>) -> Self {
        self.default_back_accessory_ids.push(id.into());
        self
    }

    /// Front then back accessory ids, duplicates kept
    pub fn accessory_ids(&self) -> impl Iterator<Item = &str> {
        self.default_front_accessory_ids
            .iter()
            .chain(self.default_back_accessory_ids.iter())
            .map(String::as_str)
    }

    /// Whether this is the "no template" placeholder
    pub fn is_sentinel(&self) -> bool {
        self.id == NONE_ID
    }

    /// Blind templates are matched by name, as the editor does
    pub fn is_blind_style(&self) -> bool {
        self.name.to_lowercase().contains("blind")
    }
}
