//! Line items - one quoted window or opening
//!
//! Dimensions are in centimeters. Every product slot holds either a catalog
//! id or the [`NONE_ID`] sentinel.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::{Product, ProductCategory};
use super::template::Template;
use crate::NONE_ID;

/// Values used for freshly added rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDefaults {
    /// Width in centimeters
    pub width: Decimal,
    /// Height in centimeters
    pub height: Decimal,
    pub quantity: u32,
}

impl Default for ItemDefaults {
    fn default() -> Self {
        Self {
            width: dec!(150),
            height: dec!(220),
            quantity: 1,
        }
    }
}

/// One quoted window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,

    /// Free-text room label
    #[serde(default)]
    pub room: String,

    #[serde(default = "none_id")]
    pub template_id: String,

    /// Opening width in centimeters
    pub width: Decimal,

    /// Opening height in centimeters
    pub height: Decimal,

    /// Front layer multiplier (fabric, blinds, and lining)
    #[serde(default)]
    pub fullness_front: Decimal,

    /// Back layer multiplier (sheer)
    #[serde(default)]
    pub fullness_back: Decimal,

    #[serde(default = "none_id")]
    pub fabric_id: String,
    #[serde(default = "none_id")]
    pub sheer_id: String,
    #[serde(default = "none_id")]
    pub lining_id: String,
    #[serde(default = "none_id")]
    pub front_motor_id: String,
    #[serde(default = "none_id")]
    pub back_motor_id: String,

    #[serde(default = "one")]
    pub quantity: u32,
}

fn none_id() -> String {
    NONE_ID.to_string()
}

fn one() -> u32 {
    1
}

impl LineItem {
    /// Create an empty row: no template, nothing selected, zero fullness
    pub fn blank(defaults: &ItemDefaults) -> Self {
        Self {
            id: Self::generate_id(),
            room: String::new(),
            template_id: none_id(),
            width: defaults.width,
            height: defaults.height,
            fullness_front: Decimal::ZERO,
            fullness_back: Decimal::ZERO,
            fabric_id: none_id(),
            sheer_id: none_id(),
            lining_id: none_id(),
            front_motor_id: none_id(),
            back_motor_id: none_id(),
            quantity: defaults.quantity,
        }
    }

    fn generate_id() -> String {
        format!("item-{}", Uuid::now_v7())
    }

    /// Set the opening size in centimeters
    pub fn with_size(mut self, width: Decimal, height: Decimal) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_fabric(mut self, id: impl Into<String>) -> Self {
        self.fabric_id = id.into();
        self
    }

    pub fn with_sheer(mut self, id: impl Into<String>) -> Self {
        self.sheer_id = id.into();
        self
    }

    pub fn with_lining(mut self, id: impl Into<String>) -> Self {
        self.lining_id = id.into();
        self
    }

    pub fn with_motors(mut self, front: impl Into<String>, back: impl Into<String>) -> Self {
        self.front_motor_id = front.into();
        self.back_motor_id = back.into();
        self
    }

    /// Select a template, seeding fullness and any default products it names
    pub fn apply_template(&mut self, template: &Template) {
        self.template_id = template.id.clone();
        self.fullness_front = template.fullness_front;
        self.fullness_back = template.fullness_back;

        let defaults = [
            (&template.default_fabric_id, &mut self.fabric_id),
            (&template.default_sheer_id, &mut self.sheer_id),
            (&template.default_lining_id, &mut self.lining_id),
            (&template.default_front_motor_id, &mut self.front_motor_id),
            (&template.default_back_motor_id, &mut self.back_motor_id),
        ];
        for (default, slot) in defaults {
            if let Some(id) = default.as_ref().filter(|id| !id.is_empty()) {
                *slot = id.clone();
            }
        }
    }

    /// Select a front product
    ///
    /// Blinds cannot be layered: picking one clears the sheer and lining
    /// slots, and moves the item onto the first blind-style template unless
    /// it already uses one.
    pub fn select_fabric<'a>(
        &mut self,
        product: &Product,
        templates: impl IntoIterator<Item = &'a Template>,
    ) {
        self.fabric_id = product.id.clone();
        if product.category != ProductCategory::Blinds {
            return;
        }

        let templates: Vec<&Template> = templates.into_iter().collect();
        let on_blind_template = templates
            .iter()
            .any(|t| t.id == self.template_id && t.is_blind_style());

        if !on_blind_template {
            if let Some(blind) = templates.iter().find(|t| t.is_blind_style()) {
                self.template_id = blind.id.clone();
                self.fullness_front = blind.fullness_front;
                self.fullness_back = blind.fullness_back;
            }
        }

        self.sheer_id = none_id();
        self.lining_id = none_id();
    }

    /// Copy this row under a fresh id
    pub fn duplicate(&self) -> Self {
        Self {
            id: Self::generate_id(),
            ..self.clone()
        }
    }
}
