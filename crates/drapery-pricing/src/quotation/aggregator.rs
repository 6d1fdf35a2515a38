//! Quotation totals
//!
//! Sums line item totals, then applies discount and tax:
//!
//! ```text
//! taxable     = subtotal - discount
//! tax         = taxable * tax% / 100
//! grand total = taxable + tax
//! ```
//!
//! Amounts stay unrounded; `rounded_grand_total` is the whole-currency
//! figure shown on printed quotations. Sums and products saturate at
//! `Decimal::MAX`.

use drapery_common::{CostBreakdown, LineItem, ProductLookup, TemplateLookup};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::pricing::PricingEngine;

/// How the quotation discount is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DiscountMode {
    /// Percent of the subtotal
    Percentage(Decimal),
    /// Fixed amount, capped at the subtotal
    Fixed(Decimal),
}

impl Default for DiscountMode {
    fn default() -> Self {
        DiscountMode::Percentage(Decimal::ZERO)
    }
}

impl DiscountMode {
    /// Discount amount for a subtotal
    pub fn amount(&self, subtotal: Decimal) -> Decimal {
        match *self {
            DiscountMode::Percentage(percent) => subtotal.saturating_mul(percent) / dec!(100),
            DiscountMode::Fixed(amount) => amount.max(Decimal::ZERO).min(subtotal.max(Decimal::ZERO)),
        }
    }
}

/// Totals of a whole quotation, serialized as JSON numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    /// Subtotal after discount
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
    /// Grand total rounded to the nearest whole currency unit
    #[serde(with = "rust_decimal::serde::float")]
    pub rounded_grand_total: Decimal,
}

/// Quotation aggregator
#[derive(Debug, Clone, Default)]
pub struct QuotationAggregator {
    engine: PricingEngine,
}

impl QuotationAggregator {
    pub fn new(engine: PricingEngine) -> Self {
        Self { engine }
    }

    /// Totals from already computed breakdowns
    pub fn aggregate(
        &self,
        breakdowns: &[CostBreakdown],
        discount: DiscountMode,
        tax_percent: Decimal,
    ) -> QuotationTotals {
        let subtotal = breakdowns
            .iter()
            .fold(Decimal::ZERO, |sum, b| sum.saturating_add(b.total));
        let discount = discount.amount(subtotal);
        let taxable = subtotal.saturating_sub(discount);
        let tax = taxable.saturating_mul(tax_percent) / dec!(100);
        let grand_total = taxable.saturating_add(tax);

        QuotationTotals {
            subtotal,
            discount,
            taxable,
            tax,
            grand_total,
            rounded_grand_total: round_currency(grand_total),
        }
    }

    /// Price each item, then total them
    #[instrument(skip_all, fields(items = items.len()))]
    pub fn aggregate_items(
        &self,
        items: &[LineItem],
        templates: &impl TemplateLookup,
        products: &impl ProductLookup,
        discount: DiscountMode,
        tax_percent: Decimal,
    ) -> (Vec<CostBreakdown>, QuotationTotals) {
        let breakdowns = self.engine.price_items(items, templates, products);
        let totals = self.aggregate(&breakdowns, discount, tax_percent);
        debug!(
            subtotal = %totals.subtotal,
            grand_total = %totals.grand_total,
            "Aggregated quotation"
        );
        (breakdowns, totals)
    }
}

/// Round to whole currency units, halves away from zero
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdowns(totals: &[Decimal]) -> Vec<CostBreakdown> {
        totals
            .iter()
            .map(|total| CostBreakdown {
                fabric: *total,
                total: *total,
                ..CostBreakdown::zero()
            })
            .collect()
    }

    #[test]
    fn test_percentage_discount_and_tax() {
        let aggregator = QuotationAggregator::default();
        let totals = aggregator.aggregate(
            &breakdowns(&[dec!(153.0), dec!(47)]),
            DiscountMode::Percentage(dec!(10)),
            dec!(10),
        );

        assert_eq!(totals.subtotal, dec!(200));
        assert_eq!(totals.discount, dec!(20));
        assert_eq!(totals.taxable, dec!(180));
        assert_eq!(totals.tax, dec!(18));
        assert_eq!(totals.grand_total, dec!(198));
        assert_eq!(totals.rounded_grand_total, dec!(198));
    }

    #[test]
    fn test_fixed_discount_is_capped() {
        let aggregator = QuotationAggregator::default();
        let totals = aggregator.aggregate(
            &breakdowns(&[dec!(50)]),
            DiscountMode::Fixed(dec!(80)),
            dec!(10),
        );

        assert_eq!(totals.discount, dec!(50));
        assert_eq!(totals.taxable, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn test_rounding_only_at_grand_total() {
        let aggregator = QuotationAggregator::default();
        let totals = aggregator.aggregate(
            &breakdowns(&[dec!(73.5)]),
            DiscountMode::default(),
            dec!(0),
        );

        assert_eq!(totals.grand_total, dec!(73.5));
        assert_eq!(totals.rounded_grand_total, dec!(74));
        assert_eq!(round_currency(dec!(73.49)), dec!(73));
    }

    #[test]
    fn test_oversized_totals_saturate() {
        let aggregator = QuotationAggregator::default();
        let totals = aggregator.aggregate(
            &breakdowns(&[Decimal::MAX, Decimal::MAX]),
            DiscountMode::default(),
            dec!(10),
        );

        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.taxable, Decimal::MAX);
        assert_eq!(totals.grand_total, Decimal::MAX);
        assert_eq!(totals.rounded_grand_total, Decimal::MAX);
    }

    #[test]
    fn test_empty_quotation() {
        let totals = QuotationAggregator::default().aggregate(&[], DiscountMode::default(), dec!(10));
        assert_eq!(totals, QuotationTotals::default());
    }

    #[test]
    fn test_totals_json_uses_numbers() {
        let totals = QuotationAggregator::default().aggregate(
            &breakdowns(&[dec!(153.0)]),
            DiscountMode::Percentage(dec!(10)),
            dec!(10),
        );
        let json = serde_json::to_value(totals).unwrap();

        assert_eq!(json["grandTotal"], serde_json::json!(151.47));
        assert_eq!(json["roundedGrandTotal"], serde_json::json!(151.0));
        assert!(json["tax"].is_number());
    }

    #[test]
    fn test_discount_mode_json() {
        let mode: DiscountMode = serde_json::from_str(r#"{"type":"fixed","value":25}"#).unwrap();
        assert_eq!(mode, DiscountMode::Fixed(dec!(25)));
    }
}
