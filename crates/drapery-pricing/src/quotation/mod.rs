//! Quotation module
//!
//! Everything computed over a whole quotation rather than a single item:
//! totals with discount and tax, delivery lead time, and numbering.

pub mod aggregator;
pub mod delivery;
pub mod numbering;

pub use aggregator::{round_currency, DiscountMode, QuotationAggregator, QuotationTotals};
pub use delivery::{delivery_estimate, render_terms, window_count, DeliveryEstimateTier};
pub use numbering::{expiration_date, QuotationNumberSequence};
