//! # Drapery Pricing
//!
//! Line item pricing and quotation totals for curtains and blinds.
//!
//! ## Pricing
//!
//! ```text
//! Item total = (Fabric + Sheer + Lining + Motors + Accessories + Stitching + Fixing) × Quantity
//! ```
//!
//! Where:
//! - Fabric/Sheer/Lining: cut panels × (drop + 25 cm) × price, or area × price
//!   for square-meter templates and blinds
//! - Stitching: per cut panel, per layer
//! - Fixing: per square meter of opening
//!
//! ## Quotation
//!
//! ```text
//! Grand total = (Subtotal - Discount) × (1 + Tax%)
//! ```

pub mod config;
pub mod pricing;
pub mod quotation;

use std::sync::Arc;

use chrono::NaiveDate;
use drapery_common::{Catalog, CostBreakdown, LineItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub use crate::config::QuoteSettings;
pub use crate::pricing::{compute_cost, PricingEngine, PricingRules};
pub use crate::quotation::{DiscountMode, QuotationAggregator, QuotationTotals};

/// A quotation to be priced
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRequest {
    pub items: Vec<LineItem>,
    /// Falls back to the configured default discount
    #[serde(default)]
    pub discount: Option<DiscountMode>,
    /// Falls back to the configured default tax percent
    #[serde(default)]
    pub tax_percent: Option<Decimal>,
    #[serde(default)]
    pub quotation_date: Option<NaiveDate>,
}

/// Priced quotation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationSummary {
    /// One breakdown per request item, same order
    pub items: Vec<PricedItem>,
    pub totals: QuotationTotals,
    pub currency: String,
    pub delivery_estimate: String,
    /// Terms with the delivery estimate filled in
    pub terms: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
}

/// One line item with its breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub item_id: String,
    pub room: String,
    pub breakdown: CostBreakdown,
}

/// Quotation pricing service
pub struct QuotationService {
    settings: QuoteSettings,
    catalog: Arc<Catalog>,
    aggregator: QuotationAggregator,
}

impl QuotationService {
    pub fn new(settings: QuoteSettings, catalog: Arc<Catalog>) -> Self {
        let aggregator = settings.aggregator();
        Self {
            settings,
            catalog,
            aggregator,
        }
    }

    pub fn settings(&self) -> &QuoteSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Blank row using the configured defaults
    pub fn new_item(&self) -> LineItem {
        LineItem::blank(&self.settings.item_defaults())
    }

    /// Price every item and total the quotation
    #[instrument(skip_all, fields(items = request.items.len()))]
    pub fn quote(&self, request: &QuotationRequest) -> QuotationSummary {
        let discount = request
            .discount
            .unwrap_or_else(|| self.settings.default_discount());
        let tax_percent = request
            .tax_percent
            .unwrap_or(self.settings.default_tax_percent);

        let catalog = self.catalog.as_ref();
        let (breakdowns, totals) =
            self.aggregator
                .aggregate_items(&request.items, catalog, catalog, discount, tax_percent);

        let items = request
            .items
            .iter()
            .zip(breakdowns)
            .map(|(item, breakdown)| PricedItem {
                item_id: item.id.clone(),
                room: item.room.clone(),
                breakdown,
            })
            .collect();

        let delivery_estimate =
            quotation::delivery_estimate(&request.items, &self.settings.delivery_tiers).to_string();
        let terms = quotation::render_terms(&self.settings.terms_and_conditions, &delivery_estimate);
        let expires_on = request.quotation_date.map(|date| {
            quotation::expiration_date(date, self.settings.default_expiration_days)
        });

        info!(
            grand_total = %totals.grand_total,
            delivery = %delivery_estimate,
            "Quotation priced"
        );

        QuotationSummary {
            items,
            totals,
            currency: self.settings.currency.clone(),
            delivery_estimate,
            terms,
            expires_on,
        }
    }
}
