//! # Drapery Common
//!
//! Shared types, catalogs, and errors for the Drapery curtain and blinds
//! quotation builder.
//!
//! ## Core Types
//!
//! - [`Product`]: priced material or component (fabric, sheer, lining, blinds, motor, accessory)
//! - [`Template`]: per-item calculation rules (running-meter or square-meter)
//! - [`LineItem`]: one quoted window, dimensions in centimeters
//! - [`CostBreakdown`]: itemized cost of one line item
//!
//! ## Catalogs
//!
//! - [`ProductLookup`]/[`TemplateLookup`]: keyed lookups that never resolve the sentinel id
//! - [`Catalog`]: concurrent in-memory catalog with a seeded starter set

pub mod catalog;
pub mod error;
pub mod types;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Re-export commonly used types at crate root
pub use catalog::{Catalog, CatalogSnapshot, ProductLookup, TemplateLookup};
pub use error::{CatalogError, DraperyError, Result};
pub use types::{
    breakdown::CostBreakdown,
    line_item::{ItemDefaults, LineItem},
    product::{Product, ProductCategory, ProductUnit},
    template::{CalculationType, Template},
};

/// Drapery version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reserved id meaning "nothing selected"
pub const NONE_ID: &str = "none";

/// Default roll width for fabric and lining (meters)
pub const DEFAULT_FABRIC_WIDTH_M: Decimal = dec!(1.4);

/// Default roll width for sheer (meters)
pub const DEFAULT_SHEER_WIDTH_M: Decimal = dec!(2.8);

/// Cutting and hem allowance added to each panel's drop (meters)
pub const PANEL_ALLOWANCE_M: Decimal = dec!(0.25);

/// Centimeters per meter
pub const CM_PER_METER: Decimal = dec!(100);

/// Whether `id` is the "nothing selected" sentinel
#[inline]
pub fn is_none_id(id: &str) -> bool {
    id == NONE_ID
}
