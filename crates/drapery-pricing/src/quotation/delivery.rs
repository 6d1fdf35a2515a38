//! Delivery lead time estimates
//!
//! Lead time depends on how many windows a quotation covers, counted as the
//! sum of item quantities.

use drapery_common::LineItem;
use serde::{Deserialize, Serialize};

/// Placeholder replaced in the terms and conditions text
pub const DELIVERY_ESTIMATE_PLACEHOLDER: &str = "{delivery_estimate}";

/// Estimate used when no tier covers the window count
pub const FALLBACK_ESTIMATE: &str = "Contact for details";

/// Lead time for an inclusive range of window counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEstimateTier {
    pub id: String,
    pub min_windows: u32,
    pub max_windows: u32,
    /// Human-readable lead time, e.g. "3 - 4 weeks"
    pub timeframe: String,
}

impl DeliveryEstimateTier {
    pub fn new(id: &str, min_windows: u32, max_windows: u32, timeframe: &str) -> Self {
        Self {
            id: id.to_string(),
            min_windows,
            max_windows,
            timeframe: timeframe.to_string(),
        }
    }

    pub fn covers(&self, windows: u32) -> bool {
        (self.min_windows..=self.max_windows).contains(&windows)
    }

    /// Standard tiers from one window up to 999
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("tier-1", 1, 2, "3 - 4 weeks"),
            Self::new("tier-2", 3, 5, "4 - 5 weeks"),
            Self::new("tier-3", 6, 10, "5 - 6 weeks"),
            Self::new("tier-4", 11, 999, "6 - 7 weeks"),
        ]
    }
}

/// Total windows across all items, saturating at `u32::MAX`
pub fn window_count(items: &[LineItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |count, item| count.saturating_add(item.quantity))
}

/// Lead time of the first tier covering the quotation's window count
pub fn delivery_estimate<'a>(items: &[LineItem], tiers: &'a [DeliveryEstimateTier]) -> &'a str {
    let windows = window_count(items);
    tiers
        .iter()
        .find(|tier| tier.covers(windows))
        .map(|tier| tier.timeframe.as_str())
        .unwrap_or(FALLBACK_ESTIMATE)
}

/// Fill the first delivery estimate placeholder in a terms template
pub fn render_terms(terms: &str, estimate: &str) -> String {
    terms.replacen(DELIVERY_ESTIMATE_PLACEHOLDER, estimate, 1)
}
