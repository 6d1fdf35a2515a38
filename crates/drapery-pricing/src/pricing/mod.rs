//! Pricing module
//!
//! Per-item cost calculation:
//! - Running-meter panel pricing for fabric, sheer, and lining
//! - Square-meter pricing for area templates and blinds
//! - Flat motor and accessory charges, stitching and fixing adders

pub mod engine;

pub use engine::{
    compute_cost, panel_count, Dimensions, MaterialLayer, MaterialPricingMode, PricingEngine,
    PricingRules,
};
